//! CLI entry point for ProScan
//!
//! Provides command-line interface for:
//! - Generating a probe scan motion program
//! - Converting a recorded points file into geometry
//! - Creating and inspecting the configuration file
//!
//! # Usage
//!
//! ```bash
//! proscan gcode --scan-length 150 --main-zone-step 2.5
//! proscan geometry points.txt --mode delta --format point-table
//! proscan config init
//! ```

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use proscan::commands::{export_geometry, generate_gcode, ParameterOverrides};
use proscan::{init_logging, Config, GeometryFormat, PointsFormat, BUILD_DATE, VERSION};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "proscan")]
#[command(about = "Probe scan program generator and points to polyline converter", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Configuration file (.toml or .json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for generated files, overriding the configuration
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the probe scan motion program
    Gcode {
        #[command(flatten)]
        parameters: ParameterOverrides,

        /// Exact output file, bypassing the timestamped name
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Interleave operator comments with the codes
        #[arg(long)]
        comments: bool,

        /// Decimal places for numeric words
        #[arg(long, conflicts_with = "shortest")]
        decimals: Option<usize>,

        /// Print numbers in their shortest exact form
        #[arg(long)]
        shortest: bool,
    },

    /// Convert a points file into geometry
    Geometry {
        /// Points file recorded during the scan
        points: PathBuf,

        /// Points file grammar: absolute or delta
        #[arg(long)]
        mode: Option<PointsFormat>,

        /// Output encoding: dxf, entity-text or point-table
        #[arg(long)]
        format: Option<GeometryFormat>,

        /// Exact output file, bypassing the timestamped name
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a configuration file holding the defaults
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file location
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    init_logging(directive)?;
    tracing::debug!(version = VERSION, build_date = BUILD_DATE, "proscan starting");

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };

    if let Commands::Config { action } = &cli.command {
        return run_config(action, &config_path, cli.output_dir);
    }

    let mut config = Config::load_or_default(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    if let Some(dir) = cli.output_dir {
        config.output.directory = dir;
    }
    let now = Local::now().naive_local();

    match cli.command {
        Commands::Gcode {
            parameters,
            output,
            comments,
            decimals,
            shortest,
        } => {
            let params = parameters.apply(config.parameters);
            if comments {
                config.program.include_comments = true;
            }
            if shortest {
                config.program.decimal_places = None;
            } else if decimals.is_some() {
                config.program.decimal_places = decimals;
            }

            let outcome = generate_gcode(&config, &params, output.as_deref(), now)?;
            println!("Program saved to {}", outcome.path.display());
            println!("{}", outcome.summary);
        }
        Commands::Geometry {
            points,
            mode,
            format,
            output,
        } => {
            let mode = mode.unwrap_or(config.points.format);
            let format = format.unwrap_or(config.points.geometry_format);

            let outcome = export_geometry(&config, &points, mode, format, output.as_deref(), now)?;
            println!("Geometry saved to {}", outcome.path.display());
            println!("Points: {}", outcome.point_count);
            if outcome.skipped_lines > 0 {
                println!("Skipped lines: {}", outcome.skipped_lines);
            }
            println!("Format: {}", outcome.format);
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn run_config(action: &ConfigAction, path: &Path, output_dir: Option<PathBuf>) -> Result<()> {
    match action {
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists, use --force to replace it",
                    path.display()
                );
            }
            let mut config = Config::new();
            if let Some(dir) = output_dir {
                config.output.directory = dir;
            }
            config
                .save_to_file(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Configuration written to {}", path.display());
        }
        ConfigAction::Show => {
            let mut config = Config::load_or_default(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            if let Some(dir) = output_dir {
                config.output.directory = dir;
            }
            print!("{}", config.to_toml_string()?);
        }
        ConfigAction::Path => println!("{}", path.display()),
    }
    Ok(())
}
