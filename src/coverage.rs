//! The coverage model: how much of a domain population seeds can reach within `k` hops.
//!
//! Reach from a single seed grows with a fixed-decay branching approximation. Hop 1 adds the full
//! branching factor `D`, hop 2 is discounted by the second-hop dedup factor `r` and every hop from
//! 3 onwards is discounted by the same flat factor `s`. The combined reach of all seeds is then
//! inflated by `1 / (1 - theta)` for cross-seed overlap and compared against the population.
use crate::error::{DomainError, Result, check_population};
use serde::Serialize;

/// The outcome of a single coverage evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CoverageResult {
    /// Share of the population discovered, clipped to at most 1
    pub coverage_fraction: f64,
    /// Number of domains discovered, before clipping.
    ///
    /// This can legitimately exceed the population.
    pub discovered: f64,
}

impl CoverageResult {
    /// Coverage as a percentage (unrounded)
    pub fn coverage_percent(&self) -> f64 {
        self.coverage_fraction * 100.0
    }
}

/// Expected number of distinct domains reachable from one seed within `k` hops.
///
/// The seed itself always counts, so `k == 0` gives 1.
///
/// # Arguments
///
/// * `d` - Effective branching factor
/// * `r` - Dedup factor applied at hop 2
/// * `s` - Dedup factor applied at every hop from 3 onwards
/// * `k` - Maximum number of hops
pub fn per_seed_reach(d: f64, r: f64, s: f64, k: u32) -> f64 {
    let mut reach = 1.0;
    if k >= 1 {
        reach += d;
    }
    if k >= 2 {
        reach += r * (d * d);
    }

    // D^h for h >= 3
    let mut term = d * d;
    for _ in 3..=k {
        term *= d;
        reach += s * term;
    }

    reach
}

/// Check that the overlap fraction lies in `[0, 1)`
pub(crate) fn check_overlap(theta: f64) -> Result<()> {
    if !(0.0..1.0).contains(&theta) {
        return Err(DomainError::OverlapOutOfRange { theta });
    }

    Ok(())
}

/// Estimate the share of a population discovered by `seed_count` seeds within `k` hops.
///
/// With no seeds nothing is discovered, whatever the other arguments are.
///
/// # Arguments
///
/// * `population` - Total number of addressable domains
/// * `seed_count` - Number of seed sites
/// * `d`, `r`, `s` - See [`per_seed_reach`]
/// * `theta` - Cross-seed overlap fraction in `[0, 1)`
/// * `k` - Maximum number of hops
pub fn estimate_coverage(
    population: u64,
    seed_count: u64,
    d: f64,
    r: f64,
    s: f64,
    theta: f64,
    k: u32,
) -> Result<CoverageResult> {
    if seed_count == 0 {
        return Ok(CoverageResult::default());
    }

    check_population(population)?;
    check_overlap(theta)?;

    let raw = seed_count as f64 * per_seed_reach(d, r, s, k);
    let discovered = raw / (1.0 - theta);
    if !discovered.is_finite() {
        return Err(DomainError::NonFiniteEstimate {
            hops: k,
            value: discovered,
        });
    }

    Ok(CoverageResult {
        coverage_fraction: (discovered / population as f64).min(1.0),
        discovered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    const D: f64 = 10.37;
    const R: f64 = 0.6;
    const S: f64 = 0.45;
    const THETA: f64 = 0.3;

    #[rstest]
    #[case(0, 1.0)]
    #[case(1, 1.0 + D)]
    #[case(2, 1.0 + D + R * D * D)]
    #[case(3, 1.0 + D + R * D * D + S * D * D * D)]
    #[case(4, 1.0 + D + R * D * D + S * D * D * D + S * D * D * D * D)]
    fn test_per_seed_reach(#[case] k: u32, #[case] expected: f64) {
        assert_approx_eq!(f64, per_seed_reach(D, R, S, k), expected, ulps = 4);
    }

    #[test]
    fn test_per_seed_reach_flat_deep_dedup() {
        // Each extra hop beyond 2 adds exactly s * D^k
        for k in 3..=10 {
            let gain = per_seed_reach(D, R, S, k) - per_seed_reach(D, R, S, k - 1);
            let expected = S * D.powf(f64::from(k));
            assert_approx_eq!(f64, gain, expected, epsilon = expected * 1e-12);
        }
    }

    #[rstest]
    #[case(D, R, S)]
    #[case(0.0, 0.0, 0.0)]
    #[case(0.5, 1.0, 1.0)]
    #[case(25.0, 0.6, 0.45)]
    fn test_per_seed_reach_monotone(#[case] d: f64, #[case] r: f64, #[case] s: f64) {
        for k in 1..=10 {
            assert!(per_seed_reach(d, r, s, k) >= per_seed_reach(d, r, s, k - 1));
        }
    }

    #[test]
    fn test_estimate_coverage_two_hop_uk() {
        let result = estimate_coverage(8_400_000, 5000, D, R, S, THETA, 2).unwrap();
        let reach = 1.0 + D + R * D * D;
        assert_approx_eq!(f64, reach, 75.892_14, epsilon = 1e-9);
        assert_approx_eq!(f64, result.discovered, 5000.0 * reach / 0.7, ulps = 4);
        assert_approx_eq!(f64, result.coverage_fraction, 0.064_534, epsilon = 1e-6);
        assert_approx_eq!(f64, result.coverage_percent(), 6.4534, epsilon = 1e-4);
    }

    #[rstest]
    #[case(1, D, R, S, THETA)]
    #[case(8_400_000, D, R, S, THETA)]
    #[case(100, 0.0, 0.0, 0.0, 0.99)]
    #[case(100, D, R, S, 5.0)] // overlap is irrelevant without seeds
    fn test_estimate_coverage_no_seeds(
        #[case] population: u64,
        #[case] d: f64,
        #[case] r: f64,
        #[case] s: f64,
        #[case] theta: f64,
    ) {
        for k in 0..=10 {
            assert_eq!(
                estimate_coverage(population, 0, d, r, s, theta, k).unwrap(),
                CoverageResult {
                    coverage_fraction: 0.0,
                    discovered: 0.0
                }
            );
        }
    }

    #[test]
    fn test_estimate_coverage_discovered_not_clipped() {
        let result = estimate_coverage(1_500_000, 5000, D, R, S, THETA, 10).unwrap();
        assert!(result.discovered > 1_500_000.0);
        assert_eq!(result.coverage_fraction, 1.0);
    }

    #[rstest]
    #[case(1_500_000, 500)]
    #[case(1_500_000, 5000)]
    #[case(8_400_000, 5000)]
    #[case(8_400_000, 50_000)]
    #[case(10, 1)]
    fn test_estimate_coverage_fraction_in_range(#[case] population: u64, #[case] seeds: u64) {
        for k in 0..=10 {
            let result = estimate_coverage(population, seeds, D, R, S, THETA, k).unwrap();
            assert!((0.0..=1.0).contains(&result.coverage_fraction));
            if result.discovered >= population as f64 {
                assert_approx_eq!(f64, result.coverage_fraction, 1.0);
            }
        }
    }

    #[rstest]
    #[case(1.0)]
    #[case(1.5)]
    #[case(-0.1)]
    #[case(-1e300)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn test_estimate_coverage_bad_overlap(#[case] theta: f64) {
        let err = estimate_coverage(8_400_000, 5000, D, R, S, theta, 2).unwrap_err();
        assert!(matches!(err, DomainError::OverlapOutOfRange { .. }));
    }

    #[test]
    fn test_estimate_coverage_overlap_just_below_one() {
        let result = estimate_coverage(8_400_000, 1, D, R, S, 1.0 - 1e-12, 2).unwrap();
        assert!(result.discovered.is_finite());
        assert_eq!(result.coverage_fraction, 1.0);
    }

    #[test]
    fn test_estimate_coverage_empty_population() {
        assert_eq!(
            estimate_coverage(0, 5000, D, R, S, THETA, 2),
            Err(DomainError::EmptyPopulation { population: 0 })
        );
    }

    #[test]
    fn test_estimate_coverage_overflow() {
        let err = estimate_coverage(8_400_000, 5000, 1e100, R, S, THETA, 10).unwrap_err();
        assert!(matches!(
            err,
            DomainError::NonFiniteEstimate { hops: 10, .. }
        ));
    }
}
