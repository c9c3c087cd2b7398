//! Integration tests for loading models.
use seedcov::input::load_model;
use seedcov::target::seeds_required;
use std::path::PathBuf;

/// An integration test which loads each of the example models
#[test]
fn test_load_example_models() {
    for name in [
        "uk_se",
        "two_three_hop",
        "couk_conservative",
        "couk_baseline",
        "couk_optimistic",
    ] {
        let model = load_model(PathBuf::from("demos").join(name)).unwrap();
        assert_eq!(model.countries.len(), 2);
        assert_eq!(model.parameters.coverage_targets, [0.8, 0.9, 0.95]);
    }
}

/// The .co.uk scenarios need fewer seeds as they become more optimistic
#[test]
fn test_couk_scenarios_seeds_ordering() {
    let seeds_for_90_percent = |name: &str, hops| {
        let model = load_model(PathBuf::from("demos").join(name)).unwrap();
        model
            .iter_countries()
            .map(|profile| seeds_required(profile.population, 0.9, model.graph(), hops).unwrap())
            .collect::<Vec<_>>()
    };

    for hops in [2, 3] {
        let conservative = seeds_for_90_percent("couk_conservative", hops);
        let baseline = seeds_for_90_percent("couk_baseline", hops);
        let optimistic = seeds_for_90_percent("couk_optimistic", hops);
        for i in 0..2 {
            assert!(conservative[i] > baseline[i]);
            assert!(baseline[i] > optimistic[i]);
        }

        // A larger active share needs more seeds
        assert!(baseline[1] > baseline[0]);
    }
}
