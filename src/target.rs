//! Inverse of the coverage model: how many seeds are needed to reach a target coverage.
use crate::country::{CountryID, CountryProfile};
use crate::coverage::check_overlap;
use crate::error::{DomainError, Result, check_population};
use crate::model::ModelParameters;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The number of seeds required for one country, hop depth and coverage target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedsRequiredRow {
    /// The country the row was evaluated for
    pub country: CountryID,
    /// Maximum number of hops from a seed
    pub hop_depth: u32,
    /// The coverage target as a percentage
    pub target_percent: f64,
    /// Smallest number of seeds meeting the target
    pub seeds: u64,
}

/// The smallest number of seeds whose coverage within `k` hops is at least `target`.
///
/// The closed-form answer `ceil(target * N * (1 - theta) / reach(k))` is computed first and then
/// nudged by single seeds, so that the result agrees exactly with
/// [`crate::coverage::estimate_coverage`] despite float rounding.
///
/// # Arguments
///
/// * `population` - Total number of addressable domains
/// * `target` - Coverage fraction to reach, in `(0, 1]`
/// * `params` - Parameters of the analytical model
/// * `k` - Maximum number of hops
pub fn seeds_required(
    population: u64,
    target: f64,
    params: &ModelParameters,
    k: u32,
) -> Result<u64> {
    if target.is_nan() || target <= 0.0 || target > 1.0 {
        return Err(DomainError::TargetOutOfRange { target });
    }
    check_population(population)?;
    check_overlap(params.seed_overlap)?;

    let reach = params.per_seed_reach(k);
    if reach.is_infinite() {
        return Err(DomainError::NonFiniteEstimate {
            hops: k,
            value: reach,
        });
    }
    if reach.is_nan() || reach <= 0.0 {
        return Err(DomainError::UnreachableTarget { target, hops: k });
    }

    let estimate = target * population as f64 * (1.0 - params.seed_overlap) / reach;
    let meets_target = |seeds: u64| -> Result<bool> {
        Ok(params.coverage(population, seeds, k)?.coverage_fraction >= target)
    };

    let mut seeds = estimate.ceil().max(1.0) as u64;
    while !meets_target(seeds)? {
        seeds = seeds
            .checked_add(1)
            .ok_or(DomainError::UnreachableTarget { target, hops: k })?;
    }
    while seeds > 1 && meets_target(seeds - 1)? {
        seeds -= 1;
    }

    Ok(seeds)
}

/// Tabulate the seeds required for every hop depth (outer loop) and target (inner loop)
pub fn build_seeds_required_table(
    profile: &CountryProfile,
    params: &ModelParameters,
    hop_depths: &[u32],
    targets: &[f64],
) -> Result<Vec<SeedsRequiredRow>> {
    hop_depths
        .iter()
        .cartesian_product(targets)
        .map(|(&hop_depth, &target)| {
            Ok(SeedsRequiredRow {
                country: profile.id.clone(),
                hop_depth,
                target_percent: target * 100.0,
                seeds: seeds_required(profile.population, target, params, hop_depth)?,
            })
        })
        .collect()
}
