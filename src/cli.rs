//! The command line interface for seedcov.
use crate::input::load_model;
use crate::log;
use crate::model::ModelParameters;
use crate::output::{create_output_directory, get_output_dir};
use crate::settings::Settings;
use ::log::{debug, info, warn};
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};

pub mod example;
use example::ExampleSubcommands;
pub mod settings;
use settings::SettingsSubcommands;

/// The command line interface for seedcov.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Options for the run command
#[derive(Args, Default)]
pub struct RunOpts {
    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Whether to overwrite the output directory if it already exists
    #[arg(long)]
    pub overwrite: bool,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Run a coverage study.
    Run {
        /// Path to the model directory.
        model_dir: PathBuf,
        /// Other run options
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Validate a model.
    Validate {
        /// The path to the model directory.
        model_dir: PathBuf,
    },
    /// Evaluate coverage and TTFI for a single population and seed count.
    Estimate {
        /// Number of addressable domains.
        #[arg(long)]
        population: u64,
        /// Number of seed sites.
        #[arg(long)]
        seeds: u64,
        /// Maximum number of hops from a seed.
        #[arg(long, default_value_t = 2)]
        hops: u32,
    },
    /// Manage example models.
    Example {
        /// The available subcommands for managing example models.
        #[command(subcommand)]
        subcommand: ExampleSubcommands,
    },
    /// Manage program settings.
    Settings {
        /// The subcommands for managing the settings file
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Run { model_dir, opts } => handle_run_command(&model_dir, &opts, None),
            Self::Validate { model_dir } => handle_validate_command(&model_dir, None),
            Self::Estimate {
                population,
                seeds,
                hops,
            } => handle_estimate_command(population, seeds, hops),
            Self::Example { subcommand } => subcommand.execute(),
            Self::Settings { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and start seedcov
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Invoked as: `$ seedcov --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Load program settings, if not provided
fn load_settings(settings: Option<Settings>) -> Result<Settings> {
    match settings {
        Some(settings) => Ok(settings),
        None => Settings::load().context("Failed to load settings."),
    }
}

/// Handle the `run` command.
pub fn handle_run_command(
    model_path: &Path,
    opts: &RunOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = load_settings(settings)?;

    // Get path to output folder
    let pathbuf: PathBuf;
    let output_path = if let Some(p) = opts.output_dir.as_deref() {
        p
    } else {
        pathbuf = get_output_dir(model_path)?;
        &pathbuf
    };

    // The command-line flag can only enable overwriting, not disable it
    let allow_overwrite = opts.overwrite || settings.overwrite;
    let overwrite =
        create_output_directory(output_path, allow_overwrite).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                output_path.display()
            )
        })?;

    log::init(&settings.log_level, Some(output_path))
        .context("Failed to initialise logging.")?;

    let model = load_model(model_path).context("Failed to load model.")?;
    info!("Loaded model from {}", model_path.display());
    info!("Output folder: {}", output_path.display());

    // NB: We have to wait until the logger is initialised to display this warning
    if overwrite {
        warn!("Output folder will be overwritten");
    }

    crate::study::run(&model, output_path)?;
    info!("Study complete!");

    Ok(())
}

/// Handle the `validate` command.
pub fn handle_validate_command(model_path: &Path, settings: Option<Settings>) -> Result<()> {
    let settings = load_settings(settings)?;

    // Log files are only written for the run command
    log::init(&settings.log_level, None).context("Failed to initialise logging.")?;

    let model = load_model(model_path).context("Failed to validate model.")?;
    info!(
        "Model validation successful! ({} countries, hop depths {:?})",
        model.countries.len(),
        model.parameters.hop_depths
    );
    debug!("Graph parameters: {:?}", model.graph());

    Ok(())
}

/// Handle the `estimate` command.
fn handle_estimate_command(population: u64, seeds: u64, hops: u32) -> Result<()> {
    let params = ModelParameters::default();
    let coverage = params.coverage(population, seeds, hops)?;
    let distance = params.distance(population, seeds)?;
    let ttfi = params.ttfi(population, seeds, Some(hops))?;

    println!("Per-seed reach ({hops} hops): {:.3}", params.per_seed_reach(hops));
    println!("Domains discovered: {:.0}", coverage.discovered);
    println!("Coverage: {:.2}%", coverage.coverage_percent());
    println!("Expected distance to nearest seed: {distance:.3} hops");
    println!("TTFI: {ttfi:.2} s");

    Ok(())
}
