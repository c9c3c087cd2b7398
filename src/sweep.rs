//! Coverage and TTFI curves over an evenly spaced range of seed counts.
use crate::country::{CountryID, CountryProfile};
use crate::error;
use crate::model::ModelParameters;
use anyhow::{Result, ensure};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The `[sweep]` section of `model.toml`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedSweep {
    /// Smallest seed count in the sweep
    pub min_seeds: u64,
    /// Largest seed count in the sweep
    pub max_seeds: u64,
    /// Number of evenly spaced points between `min_seeds` and `max_seeds`, inclusive
    pub steps: usize,
}

impl SeedSweep {
    /// Check that the sweep describes a usable range
    pub fn validate(&self) -> Result<()> {
        ensure!(self.min_seeds >= 1, "`min_seeds` must be at least 1");
        ensure!(
            self.max_seeds > self.min_seeds,
            "`max_seeds` must be greater than `min_seeds`"
        );
        ensure!(self.steps >= 2, "`steps` must be at least 2");

        Ok(())
    }

    /// The seed counts in the sweep.
    ///
    /// Points are spaced evenly between the two endpoints and truncated to integers. Where
    /// truncation makes neighbouring points equal, only the first is kept.
    pub fn seed_counts(&self) -> Vec<u64> {
        let min = self.min_seeds as f64;
        let span = self.max_seeds.saturating_sub(self.min_seeds) as f64;
        let last = self.steps.saturating_sub(1).max(1) as f64;
        (0..self.steps)
            .map(|i| (min + span * i as f64 / last) as u64)
            .dedup()
            .collect()
    }
}

/// One point on a coverage/TTFI curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    /// The country the row was evaluated for
    pub country: CountryID,
    /// Number of seed sites
    pub seeds: u64,
    /// Maximum number of hops from a seed
    pub hop_depth: u32,
    /// Coverage of the population as a percentage
    pub coverage_percent: f64,
    /// Time-To-First-Index in seconds, without a crawl horizon
    pub ttfi_seconds: f64,
}

/// Evaluate coverage and TTFI for one country at every point of a sweep.
///
/// Rows are ordered by hop depth (outer loop) and then seed count. TTFI is not truncated, so it
/// is the same for every hop depth.
pub fn build_sweep_table(
    profile: &CountryProfile,
    params: &ModelParameters,
    sweep: &SeedSweep,
    hop_depths: &[u32],
) -> error::Result<Vec<SweepRow>> {
    let seed_counts = sweep.seed_counts();
    hop_depths
        .iter()
        .cartesian_product(&seed_counts)
        .map(|(&hop_depth, &seeds)| {
            let coverage = params.coverage(profile.population, seeds, hop_depth)?;
            Ok(SweepRow {
                country: profile.id.clone(),
                seeds,
                hop_depth,
                coverage_percent: coverage.coverage_percent(),
                ttfi_seconds: params.ttfi(profile.population, seeds, None)?,
            })
        })
        .collect()
}
