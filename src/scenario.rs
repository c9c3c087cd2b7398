//! Scenario tables: the coverage and TTFI models evaluated over seed counts and hop depths.
use crate::country::CountryProfile;
use crate::error::Result;
use crate::model::ModelParameters;
use anyhow::Context;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One evaluated combination of country, seed count and hop depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRow {
    /// Display name of the country the row was evaluated for
    pub country: String,
    /// Number of seed sites
    pub seeds: u64,
    /// Maximum number of hops from a seed
    pub hop_depth: u32,
    /// Coverage of the population as a percentage (unrounded)
    pub coverage_percent: f64,
    /// Number of domains discovered before clipping to the population
    pub discovered: f64,
    /// Time-To-First-Index in seconds, with the crawl horizon set to `hop_depth`
    pub ttfi_seconds: f64,
}

/// Build the scenario table for one country.
///
/// Rows are produced for every seed count (outer loop) and every hop depth (inner loop), in the
/// order given. Consumers may rely on this order.
///
/// # Arguments
///
/// * `profile` - The country to evaluate
/// * `params` - Parameters of the analytical model
/// * `hop_depths` - Hop depths to evaluate; each is also used as the TTFI horizon
pub fn build_scenario_table(
    profile: &CountryProfile,
    params: &ModelParameters,
    hop_depths: &[u32],
) -> Result<Vec<ScenarioRow>> {
    profile
        .seed_counts
        .iter()
        .cartesian_product(hop_depths)
        .map(|(&seeds, &hop_depth)| {
            let coverage = params.coverage(profile.population, seeds, hop_depth)?;
            let ttfi_seconds = params.ttfi(profile.population, seeds, Some(hop_depth))?;

            Ok(ScenarioRow {
                country: profile.name.clone(),
                seeds,
                hop_depth,
                coverage_percent: coverage.coverage_percent(),
                discovered: coverage.discovered,
                ttfi_seconds,
            })
        })
        .collect()
}

/// Index rows by `(seeds, hop_depth)`
fn index_rows(rows: &[ScenarioRow]) -> HashMap<(u64, u32), &ScenarioRow> {
    rows.iter()
        .map(|row| ((row.seeds, row.hop_depth), row))
        .collect()
}

/// Coverage and TTFI at one hop depth, as it appears in a [`MultiHopTable`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiHopCell {
    /// Coverage of the population as a percentage
    pub coverage_percent: f64,
    /// Time-To-First-Index in seconds
    pub ttfi_seconds: f64,
}

/// One line of a [`MultiHopTable`]
#[derive(Debug, Clone, PartialEq)]
pub struct MultiHopRecord {
    /// Country label
    pub country: String,
    /// Number of seed sites
    pub seeds: u64,
    /// One cell per hop depth, in the table's hop depth order
    pub cells: Vec<MultiHopCell>,
}

/// Scenario rows pivoted so that each line holds every hop depth for one seed count.
///
/// Columns are `Country, Seeds` followed by `Coverage_<k>hop_%, TTFI_<k>hop_s` for each hop
/// depth `k`.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiHopTable {
    hop_depths: Vec<u32>,
    records: Vec<MultiHopRecord>,
}

impl MultiHopTable {
    /// Create an empty table with a pair of columns for each hop depth
    pub fn new(hop_depths: &[u32]) -> Self {
        Self {
            hop_depths: hop_depths.to_vec(),
            records: Vec::new(),
        }
    }

    /// The column headers
    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec!["Country".to_string(), "Seeds".to_string()];
        for k in &self.hop_depths {
            headers.push(format!("Coverage_{k}hop_%"));
            headers.push(format!("TTFI_{k}hop_s"));
        }

        headers
    }

    /// Append the rows for one country.
    ///
    /// Rows are matched up by `(seeds, hop_depth)` rather than by position. Seed counts are
    /// reported in the order they first appear in `rows`.
    pub fn add_country(
        &mut self,
        profile: &CountryProfile,
        rows: &[ScenarioRow],
    ) -> anyhow::Result<()> {
        let index = index_rows(rows);
        for seeds in rows.iter().map(|row| row.seeds).unique() {
            let cells = self
                .hop_depths
                .iter()
                .map(|&k| {
                    let row = index.get(&(seeds, k)).with_context(|| {
                        format!(
                            "No scenario for {} with {seeds} seeds and {k} hops",
                            profile.id
                        )
                    })?;
                    Ok(MultiHopCell {
                        coverage_percent: row.coverage_percent,
                        ttfi_seconds: row.ttfi_seconds,
                    })
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            self.records.push(MultiHopRecord {
                country: profile.name.clone(),
                seeds,
                cells,
            });
        }

        Ok(())
    }

    /// Iterate over the records in the order they were added
    pub fn records(&self) -> impl Iterator<Item = &MultiHopRecord> {
        self.records.iter()
    }

    /// Number of records in the table
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// How much coverage an extra few hops buys at a given seed count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HopGain {
    /// Number of seed sites
    pub seeds: u64,
    /// Coverage percentage at the shallower depth
    pub shallow_percent: f64,
    /// Coverage percentage at the deeper depth
    pub deep_percent: f64,
}

impl HopGain {
    /// The gain in percentage points
    pub fn gain(&self) -> f64 {
        self.deep_percent - self.shallow_percent
    }
}

/// Compare coverage at two hop depths for every seed count in `rows`.
///
/// Seed counts for which either depth is missing are skipped.
pub fn hop_gains(rows: &[ScenarioRow], shallow: u32, deep: u32) -> Vec<HopGain> {
    let index = index_rows(rows);
    rows.iter()
        .map(|row| row.seeds)
        .unique()
        .filter_map(|seeds| {
            let shallow_row = index.get(&(seeds, shallow))?;
            let deep_row = index.get(&(seeds, deep))?;
            Some(HopGain {
                seeds,
                shallow_percent: shallow_row.coverage_percent,
                deep_percent: deep_row.coverage_percent,
            })
        })
        .collect()
}
