//! A regression test for the "couk_conservative" example
use regression::run_regression_test;

#[test]
fn test_regression_couk_conservative() {
    run_regression_test("couk_conservative");
}
