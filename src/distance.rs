//! Hop distance to the nearest seed and the Time-To-First-Index (TTFI) derived from it.
//!
//! The population is treated as a balanced tree rooted at the nearest seed. Each seed is
//! responsible for `N / n` domains on average, so the depth needed to hold them is roughly
//! `log_{b + 1}(N / n + 1)`, where `b` is the branching factor (never taken below 2).
use crate::error::{Result, check_population, check_seed_count};

/// The smallest branching factor used in the distance approximation
const MIN_EFFECTIVE_BRANCH: f64 = 2.0;

/// Distances are never reported below one hop
const MIN_DISTANCE: f64 = 1.0;

/// Approximate the expected hop distance from a random domain to its nearest seed.
///
/// # Arguments
///
/// * `d` - Effective branching factor
/// * `population` - Total number of addressable domains
/// * `seed_count` - Number of seed sites
pub fn expected_distance(d: f64, population: u64, seed_count: u64) -> Result<f64> {
    check_population(population)?;
    check_seed_count(seed_count)?;

    let effective_branch = d.max(MIN_EFFECTIVE_BRANCH);
    let share = population as f64 / seed_count as f64;
    let distance = (share + 1.0).ln() / (effective_branch + 1.0).ln();

    Ok(distance.max(MIN_DISTANCE))
}

/// Estimate the Time-To-First-Index in seconds.
///
/// If `k_horizon` is given, a crawler stops after that many hops, so the distance is truncated
/// to it. The horizon never extends the distance.
///
/// # Arguments
///
/// * `d` - Effective branching factor
/// * `population` - Total number of addressable domains
/// * `seed_count` - Number of seed sites
/// * `tau_hop` - Seconds spent per hop
/// * `k_horizon` - Optional maximum crawl depth
pub fn estimate_ttfi(
    d: f64,
    population: u64,
    seed_count: u64,
    tau_hop: f64,
    k_horizon: Option<u32>,
) -> Result<f64> {
    let mut distance = expected_distance(d, population, seed_count)?;
    if let Some(horizon) = k_horizon {
        distance = distance.min(f64::from(horizon));
    }

    Ok(tau_hop * distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    const D: f64 = 10.37;
    const TAU_HOP: f64 = 3.0;

    #[test]
    fn test_expected_distance_uk() {
        // log_{11.37}(1681)
        let expected = 1681.0_f64.ln() / 11.37_f64.ln();
        assert_approx_eq!(
            f64,
            expected_distance(D, 8_400_000, 5000).unwrap(),
            expected,
            ulps = 4
        );
        assert_approx_eq!(f64, expected, 3.0552, epsilon = 1e-4);
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(2.0)]
    #[case(-3.0)]
    fn test_expected_distance_branch_clamped(#[case] d: f64) {
        assert_approx_eq!(
            f64,
            expected_distance(d, 8_400_000, 5000).unwrap(),
            1681.0_f64.ln() / 3.0_f64.ln(),
            ulps = 4
        );
    }

    #[rstest]
    #[case(D, 10, 10)]
    #[case(D, 10, 1_000_000)]
    #[case(D, 8_400_000, 8_400_000)]
    #[case(1000.0, 8_400_000, 1)]
    fn test_expected_distance_at_least_one(
        #[case] d: f64,
        #[case] population: u64,
        #[case] seeds: u64,
    ) {
        assert!(expected_distance(d, population, seeds).unwrap() >= 1.0);
    }

    #[test]
    fn test_expected_distance_no_seeds() {
        assert_eq!(
            expected_distance(D, 8_400_000, 0),
            Err(DomainError::NoSeeds { seed_count: 0 })
        );
    }

    #[test]
    fn test_expected_distance_empty_population() {
        assert_eq!(
            expected_distance(D, 0, 10),
            Err(DomainError::EmptyPopulation { population: 0 })
        );
    }

    #[test]
    fn test_estimate_ttfi_no_horizon() {
        let distance = expected_distance(D, 1_500_000, 500).unwrap();
        assert_approx_eq!(
            f64,
            estimate_ttfi(D, 1_500_000, 500, TAU_HOP, None).unwrap(),
            TAU_HOP * distance
        );
    }

    #[rstest]
    #[case(Some(1), 3.0)]
    #[case(Some(2), 6.0)]
    fn test_estimate_ttfi_truncated(#[case] horizon: Option<u32>, #[case] expected: f64) {
        // Untruncated distance is just over 3 hops
        assert_approx_eq!(
            f64,
            estimate_ttfi(D, 8_400_000, 5000, TAU_HOP, horizon).unwrap(),
            expected
        );
    }

    #[rstest]
    #[case(8_400_000)]
    #[case(1_500_000)]
    fn test_estimate_ttfi_horizon_never_extends(#[case] population: u64) {
        for seeds in [1, 10, 500, 5000, 50_000] {
            let unbounded = estimate_ttfi(D, population, seeds, TAU_HOP, None).unwrap();
            for horizon in 0..=10 {
                let bounded =
                    estimate_ttfi(D, population, seeds, TAU_HOP, Some(horizon)).unwrap();
                assert!(bounded <= unbounded);
            }
        }
    }

    #[rstest]
    #[case(8_400_000, None)]
    #[case(8_400_000, Some(5))]
    #[case(1_500_000, None)]
    #[case(1_500_000, Some(2))]
    fn test_estimate_ttfi_non_increasing_in_seeds(
        #[case] population: u64,
        #[case] horizon: Option<u32>,
    ) {
        let mut previous = f64::INFINITY;
        for seeds in (1..=100_000).step_by(997) {
            let ttfi = estimate_ttfi(D, population, seeds, TAU_HOP, horizon).unwrap();
            assert!(ttfi <= previous);
            previous = ttfi;
        }
    }

    #[test]
    fn test_estimate_ttfi_no_seeds() {
        assert!(matches!(
            estimate_ttfi(D, 8_400_000, 0, TAU_HOP, Some(5)),
            Err(DomainError::NoSeeds { .. })
        ));
    }
}
