//! A regression test for the "couk_baseline" example
use regression::run_regression_test;

#[test]
fn test_regression_couk_baseline() {
    run_regression_test("couk_baseline");
}
