//! The module responsible for writing output data to disk.
use crate::scenario::{MultiHopTable, ScenarioRow};
use crate::sweep::SweepRow;
use crate::target::SeedsRequiredRow;
use anyhow::{Context, Result, ensure};
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

pub mod metadata;

/// The root folder in which model-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "seedcov_results";

/// The output file name for the scenario table
const SCENARIOS_FILE_NAME: &str = "scenarios.csv";

/// The output file name for the multi-hop comparison table
const MULTI_HOP_TABLE_FILE_NAME: &str = "multi_hop_table.csv";

/// The output file name for seeds required to meet coverage targets
const SEEDS_REQUIRED_FILE_NAME: &str = "seeds_required.csv";

/// The output file name for coverage/TTFI curves
const SEED_SWEEP_FILE_NAME: &str = "seed_sweep.csv";

/// Get the default output folder for the model in the specified directory
pub fn get_output_dir(model_dir: &Path) -> Result<PathBuf> {
    // Canonicalise in case the user has specified "."
    let model_dir = model_dir
        .canonicalize()
        .context("Could not resolve path to model")?;

    let model_name = model_dir
        .file_name()
        .context("Model cannot be in root folder")?
        .to_str()
        .context("Invalid chars in model dir name")?;

    Ok([OUTPUT_DIRECTORY_ROOT, model_name].iter().collect())
}

/// Create a new output directory.
///
/// An existing directory is only reused if it is empty or `allow_overwrite` is set.
///
/// # Returns
///
/// Whether an existing, non-empty directory will be overwritten
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    if output_dir.is_dir() {
        let is_empty = output_dir.read_dir()?.next().is_none();
        if is_empty {
            return Ok(false);
        }

        ensure!(
            allow_overwrite,
            "Output folder already exists and is not empty. Use --overwrite to overwrite it."
        );

        fs::remove_dir_all(output_dir)?;
        fs::create_dir_all(output_dir)?;
        return Ok(true);
    }

    // Try to create the directory, with parents
    fs::create_dir_all(output_dir)?;

    Ok(false)
}

/// An object for writing study results to CSV files
pub struct DataWriter {
    scenarios_writer: csv::Writer<File>,
    multi_hop_writer: csv::Writer<File>,
    seeds_required_writer: csv::Writer<File>,
    sweep_writer: Option<csv::Writer<File>>,
}

impl DataWriter {
    /// Open CSV files to write output data to
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where files will be saved
    /// * `write_sweep` - Whether to create a file for the seed sweep
    pub fn create(output_path: &Path, write_sweep: bool) -> Result<Self> {
        let new_writer = |file_name| {
            let file_path = output_path.join(file_name);
            csv::Writer::from_path(file_path)
        };

        let sweep_writer = if write_sweep {
            Some(new_writer(SEED_SWEEP_FILE_NAME)?)
        } else {
            None
        };

        Ok(Self {
            scenarios_writer: new_writer(SCENARIOS_FILE_NAME)?,
            multi_hop_writer: new_writer(MULTI_HOP_TABLE_FILE_NAME)?,
            seeds_required_writer: new_writer(SEEDS_REQUIRED_FILE_NAME)?,
            sweep_writer,
        })
    }

    /// Write scenario rows to a CSV file
    pub fn write_scenarios(&mut self, rows: &[ScenarioRow]) -> Result<()> {
        for row in rows {
            self.scenarios_writer.serialize(row)?;
        }

        Ok(())
    }

    /// Write the multi-hop table, including its header, to a CSV file
    pub fn write_multi_hop_table(&mut self, table: &MultiHopTable) -> Result<()> {
        self.multi_hop_writer.write_record(table.headers())?;
        for record in table.records() {
            let mut fields = vec![record.country.clone(), record.seeds.to_string()];
            for cell in &record.cells {
                fields.push(cell.coverage_percent.to_string());
                fields.push(cell.ttfi_seconds.to_string());
            }
            self.multi_hop_writer.write_record(fields)?;
        }

        Ok(())
    }

    /// Write the seeds required for each coverage target to a CSV file
    pub fn write_seeds_required(&mut self, rows: &[SeedsRequiredRow]) -> Result<()> {
        for row in rows {
            self.seeds_required_writer.serialize(row)?;
        }

        Ok(())
    }

    /// Write seed sweep rows to a CSV file, if one was requested
    pub fn write_sweep(&mut self, rows: &[SweepRow]) -> Result<()> {
        if let Some(wtr) = &mut self.sweep_writer {
            for row in rows {
                wtr.serialize(row)?;
            }
        }

        Ok(())
    }

    /// Flush the underlying streams
    pub fn flush(&mut self) -> Result<()> {
        self.scenarios_writer.flush()?;
        self.multi_hop_writer.flush()?;
        self.seeds_required_writer.flush()?;
        if let Some(wtr) = &mut self.sweep_writer {
            wtr.flush()?;
        }

        Ok(())
    }
}
