//! Defines the `StudyParameters` struct, which represents the contents of `model.toml`, and the
//! `ModelParameters` shared by every formula.
use crate::coverage::{CoverageResult, estimate_coverage, per_seed_reach};
use crate::distance::{estimate_ttfi, expected_distance};
use crate::error;
use crate::input::{deserialise_proportion, input_err_msg, is_unique, read_toml};
use crate::sweep::SeedSweep;
use anyhow::{Context, Result, ensure};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

const MODEL_PARAMETERS_FILE_NAME: &str = "model.toml";

/// The largest hop depth accepted in `hop_depths`
pub const MAX_HOP_DEPTH: u32 = 30;

/// Hop depths above this produce reach estimates that dwarf any national population
const LARGE_HOP_DEPTH: u32 = 10;

macro_rules! define_param_default {
    ($name:ident, $type: ty, $value: expr) => {
        fn $name() -> $type {
            $value
        }
    };
}

define_param_default!(default_branching_factor, f64, 10.37);
define_param_default!(default_second_hop_dedup, f64, 0.6);
define_param_default!(default_deep_hop_dedup, f64, 0.45);
define_param_default!(default_seed_overlap, f64, 0.3);
define_param_default!(default_seconds_per_hop, f64, 3.0);
define_param_default!(default_coverage_targets, Vec<f64>, vec![0.8, 0.9, 0.95]);

/// Parameters of the analytical coverage and TTFI model.
///
/// The defaults are the values used in the UK/SE comparison study.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ModelParameters {
    /// Effective out-degree of a domain (`D`)
    #[serde(default = "default_branching_factor")]
    pub branching_factor: f64,
    /// Dedup factor applied to domains reached at hop 2 (`r`)
    #[serde(default = "default_second_hop_dedup")]
    #[serde(deserialize_with = "deserialise_proportion")]
    pub second_hop_dedup: f64,
    /// Dedup factor applied to domains reached at hop 3 and beyond (`s`)
    #[serde(default = "default_deep_hop_dedup")]
    #[serde(deserialize_with = "deserialise_proportion")]
    pub deep_hop_dedup: f64,
    /// Fraction of reachable mass shared between seeds (`theta`)
    #[serde(default = "default_seed_overlap")]
    pub seed_overlap: f64,
    /// Average latency of a single hop in seconds (`tau_hop`)
    #[serde(default = "default_seconds_per_hop")]
    pub seconds_per_hop: f64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            branching_factor: default_branching_factor(),
            second_hop_dedup: default_second_hop_dedup(),
            deep_hop_dedup: default_deep_hop_dedup(),
            seed_overlap: default_seed_overlap(),
            seconds_per_hop: default_seconds_per_hop(),
        }
    }
}

/// Check that the `branching_factor` parameter is valid
fn check_branching_factor(value: f64) -> Result<()> {
    ensure!(
        value.is_finite() && value > 0.0,
        "branching_factor must be a finite number greater than zero"
    );

    Ok(())
}

/// Check that the `seed_overlap` parameter is valid
fn check_seed_overlap(value: f64) -> Result<()> {
    ensure!(
        (0.0..1.0).contains(&value),
        "seed_overlap must be at least 0 and less than 1"
    );

    Ok(())
}

/// Check that the `seconds_per_hop` parameter is valid
fn check_seconds_per_hop(value: f64) -> Result<()> {
    ensure!(
        value.is_finite() && value > 0.0,
        "seconds_per_hop must be a finite number greater than zero"
    );

    Ok(())
}

impl ModelParameters {
    /// Validate parameters after reading in file
    pub fn validate(&self) -> Result<()> {
        check_branching_factor(self.branching_factor)?;

        // second_hop_dedup and deep_hop_dedup already validated with deserialise_proportion

        check_seed_overlap(self.seed_overlap)?;
        check_seconds_per_hop(self.seconds_per_hop)?;

        Ok(())
    }

    /// Expected reach of a single seed within `k` hops
    pub fn per_seed_reach(&self, k: u32) -> f64 {
        per_seed_reach(
            self.branching_factor,
            self.second_hop_dedup,
            self.deep_hop_dedup,
            k,
        )
    }

    /// Coverage of `population` achieved by `seed_count` seeds within `k` hops
    pub fn coverage(
        &self,
        population: u64,
        seed_count: u64,
        k: u32,
    ) -> error::Result<CoverageResult> {
        estimate_coverage(
            population,
            seed_count,
            self.branching_factor,
            self.second_hop_dedup,
            self.deep_hop_dedup,
            self.seed_overlap,
            k,
        )
    }

    /// Expected hop distance from a random domain to its nearest seed
    pub fn distance(&self, population: u64, seed_count: u64) -> error::Result<f64> {
        expected_distance(self.branching_factor, population, seed_count)
    }

    /// Time-To-First-Index in seconds, optionally truncated at a crawl horizon
    pub fn ttfi(
        &self,
        population: u64,
        seed_count: u64,
        k_horizon: Option<u32>,
    ) -> error::Result<f64> {
        estimate_ttfi(
            self.branching_factor,
            population,
            seed_count,
            self.seconds_per_hop,
            k_horizon,
        )
    }
}

/// Represents the contents of the entire model file.
#[derive(Debug, Deserialize, PartialEq)]
pub struct StudyParameters {
    /// Hop depths to tabulate, in the order they should be reported
    pub hop_depths: Vec<u32>,
    /// Coverage fractions for which to report the number of seeds required
    #[serde(default = "default_coverage_targets")]
    pub coverage_targets: Vec<f64>,
    /// Parameters of the analytical model
    #[serde(default)]
    pub graph: ModelParameters,
    /// Range of seed counts for coverage/TTFI curves, if wanted
    pub sweep: Option<SeedSweep>,
}

/// Check that the `hop_depths` parameter is valid
fn check_hop_depths(hop_depths: &[u32]) -> Result<()> {
    ensure!(!hop_depths.is_empty(), "`hop_depths` is empty");
    ensure!(
        is_unique(hop_depths),
        "`hop_depths` must be composed of unique values"
    );

    for &k in hop_depths {
        ensure!(
            k <= MAX_HOP_DEPTH,
            "Hop depth {k} is too large (maximum is {MAX_HOP_DEPTH})"
        );
        if k > LARGE_HOP_DEPTH {
            warn!("Hop depth {k} is large: per-seed reach grows as D^{k}");
        }
    }

    Ok(())
}

/// Check that the `coverage_targets` parameter is valid
fn check_coverage_targets(targets: &[f64]) -> Result<()> {
    for &target in targets {
        ensure!(
            target > 0.0 && target <= 1.0,
            "Coverage targets must be greater than 0 and at most 1 (got {target})"
        );
    }

    let mut sorted = targets.to_vec();
    sorted.sort_by(f64::total_cmp);
    ensure!(
        sorted.windows(2).all(|pair| pair[0] < pair[1]),
        "`coverage_targets` must be composed of unique values"
    );

    Ok(())
}

impl StudyParameters {
    /// Read a model file from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `model_dir` - Folder containing model configuration files
    ///
    /// # Returns
    ///
    /// The model file contents as a [`StudyParameters`] struct or an error if the file is invalid
    pub fn from_path<P: AsRef<Path>>(model_dir: P) -> Result<StudyParameters> {
        let file_path = model_dir.as_ref().join(MODEL_PARAMETERS_FILE_NAME);
        let study_params: StudyParameters = read_toml(&file_path)?;

        study_params
            .validate()
            .with_context(|| input_err_msg(file_path))?;

        Ok(study_params)
    }

    /// Validate parameters after reading in file
    fn validate(&self) -> Result<()> {
        check_hop_depths(&self.hop_depths)?;
        check_coverage_targets(&self.coverage_targets)?;
        self.graph.validate()?;
        if let Some(sweep) = &self.sweep {
            sweep.validate()?;
        }

        Ok(())
    }
}
