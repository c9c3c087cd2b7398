//! Functionality for running a study: every country evaluated against the model parameters.
use crate::country::CountryProfile;
use crate::model::{Model, StudyParameters};
use crate::output::DataWriter;
use crate::output::metadata::write_metadata;
use crate::scenario::{MultiHopTable, ScenarioRow, build_scenario_table, hop_gains};
use crate::sweep::{SweepRow, build_sweep_table};
use crate::target::{SeedsRequiredRow, build_seeds_required_table};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;

/// Everything evaluated for a single country
#[derive(Debug, Clone, PartialEq)]
pub struct CountryResults {
    /// Coverage and TTFI for every seed count and hop depth
    pub scenarios: Vec<ScenarioRow>,
    /// Seeds needed to meet each coverage target at each hop depth
    pub seeds_required: Vec<SeedsRequiredRow>,
    /// Coverage/TTFI curves (empty if no sweep was requested)
    pub sweep: Vec<SweepRow>,
}

/// Evaluate one country
pub fn evaluate_country(
    profile: &CountryProfile,
    parameters: &StudyParameters,
) -> Result<CountryResults> {
    let params = &parameters.graph;
    let scenarios = build_scenario_table(profile, params, &parameters.hop_depths)?;
    let seeds_required = build_seeds_required_table(
        profile,
        params,
        &parameters.hop_depths,
        &parameters.coverage_targets,
    )?;
    let sweep = match &parameters.sweep {
        Some(sweep) => build_sweep_table(profile, params, sweep, &parameters.hop_depths)?,
        None => Vec::new(),
    };

    Ok(CountryResults {
        scenarios,
        seeds_required,
        sweep,
    })
}

/// Log how much coverage the deepest hop depth buys over the shallowest
fn log_hop_gains(profile: &CountryProfile, rows: &[ScenarioRow], hop_depths: &[u32]) {
    let (Some(&shallow), Some(&deep)) = (hop_depths.iter().min(), hop_depths.iter().max()) else {
        return;
    };
    if shallow == deep {
        return;
    }

    for gain in hop_gains(rows, shallow, deep) {
        info!(
            "{}, {} seeds: {shallow} hops {:.2}% -> {deep} hops {:.2}% (+{:.2} points)",
            profile.name,
            gain.seeds,
            gain.shallow_percent,
            gain.deep_percent,
            gain.gain()
        );
    }
}

/// Log the seeds required for each coverage target
fn log_seeds_required(profile: &CountryProfile, rows: &[SeedsRequiredRow]) {
    for row in rows {
        info!(
            "{}: {} seeds needed for {:.2}% coverage within {} hops",
            profile.name, row.seeds, row.target_percent, row.hop_depth
        );
    }
}

/// Run the study, writing results to `output_path`.
///
/// # Arguments
///
/// * `model` - The model to run
/// * `output_path` - The folder to which output files will be written
pub fn run(model: &Model, output_path: &Path) -> Result<()> {
    let parameters = &model.parameters;
    let mut writer = DataWriter::create(output_path, parameters.sweep.is_some())?;
    let mut table = MultiHopTable::new(&parameters.hop_depths);

    for profile in model.iter_countries() {
        info!(
            "Evaluating {} ({} domains, {} seed counts)",
            profile.name,
            profile.population,
            profile.seed_counts.len()
        );

        let results = evaluate_country(profile, parameters)
            .with_context(|| format!("Failed to evaluate country {}", profile.id))?;
        debug!(
            "{}: {} scenarios, {} sweep points",
            profile.id,
            results.scenarios.len(),
            results.sweep.len()
        );

        table.add_country(profile, &results.scenarios)?;
        log_hop_gains(profile, &results.scenarios, &parameters.hop_depths);
        log_seeds_required(profile, &results.seeds_required);

        writer.write_scenarios(&results.scenarios)?;
        writer.write_seeds_required(&results.seeds_required)?;
        writer.write_sweep(&results.sweep)?;
    }

    writer.write_multi_hop_table(&table)?;
    writer.flush()?;
    write_metadata(output_path, model).context("Failed to save metadata")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::CountryMap;
    use crate::fixture::{se_profile, uk_profile};
    use crate::model::ModelParameters;
    use crate::sweep::SeedSweep;
    use indexmap::indexmap;
    use rstest::{fixture, rstest};
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[fixture]
    fn study_parameters() -> StudyParameters {
        StudyParameters {
            hop_depths: vec![2, 3],
            coverage_targets: vec![0.8, 0.9],
            graph: ModelParameters::default(),
            sweep: None,
        }
    }

    #[rstest]
    fn test_evaluate_country(uk_profile: CountryProfile, study_parameters: StudyParameters) {
        let results = evaluate_country(&uk_profile, &study_parameters).unwrap();
        assert_eq!(results.scenarios.len(), 8);
        assert_eq!(results.seeds_required.len(), 4);
        assert_eq!(results.seeds_required[1].seeds, 69_731);
        assert!(results.sweep.is_empty());
    }

    #[rstest]
    fn test_evaluate_country_with_sweep(
        se_profile: CountryProfile,
        mut study_parameters: StudyParameters,
    ) {
        study_parameters.sweep = Some(SeedSweep {
            min_seeds: 100,
            max_seeds: 1000,
            steps: 10,
        });
        let results = evaluate_country(&se_profile, &study_parameters).unwrap();
        assert_eq!(results.sweep.len(), 20);
    }

    #[rstest]
    fn test_evaluate_country_invalid(
        mut uk_profile: CountryProfile,
        study_parameters: StudyParameters,
    ) {
        uk_profile.seed_counts.push(0);
        assert_eq!(
            evaluate_country(&uk_profile, &study_parameters)
                .unwrap_err()
                .to_string(),
            "seed count must be greater than zero, got 0"
        );
    }

    #[rstest]
    fn test_run(
        uk_profile: CountryProfile,
        se_profile: CountryProfile,
        study_parameters: StudyParameters,
    ) {
        let countries: CountryMap = indexmap! {
            uk_profile.id.clone() => uk_profile,
            se_profile.id.clone() => se_profile,
        };
        let model = Model {
            model_path: PathBuf::from("uk_se"),
            parameters: study_parameters,
            countries,
        };

        let dir = tempdir().unwrap();
        run(&model, dir.path()).unwrap();
        for file_name in [
            "scenarios.csv",
            "multi_hop_table.csv",
            "seeds_required.csv",
            "metadata.toml",
        ] {
            assert!(dir.path().join(file_name).is_file(), "{file_name} missing");
        }
        assert!(!dir.path().join("seed_sweep.csv").exists());

        let num_rows = csv::Reader::from_path(dir.path().join("multi_hop_table.csv"))
            .unwrap()
            .records()
            .count();
        assert_eq!(num_rows, 8);
    }
}
