//! Command line entry point.

use std::path::PathBuf;

use bubble_pointing::config::{ExperimentConfig, NamedSetup};
use bubble_pointing::data::latin_square::balanced_square;
use bubble_pointing::data::layout_gen::{generate_uniform, generate_with_radius_list, LayoutBounds};
use bubble_pointing::data::setup::SetupFile;
use bubble_pointing::{run_experiment, Settings, TechniqueKind};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Pointing experiment: raw pointing vs. Bubble Cursor
#[derive(Parser, Debug)]
#[command(name = "bubble-pointing")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Subcommand to run (defaults to `run` with no setups)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the experiment window
    Run {
        /// Setup files; one condition per technique and setup
        #[arg(short, long)]
        setup: Vec<PathBuf>,

        /// Participant id (default: last id + 1)
        #[arg(short, long)]
        participant: Option<u32>,

        /// Techniques to compare, comma separated
        #[arg(short, long, value_delimiter = ',')]
        techniques: Vec<TechniqueKind>,

        /// CSV trial log
        #[arg(short, long)]
        log: Option<PathBuf>,

        /// Highlight ring width for the bubble cursor
        #[arg(long)]
        border: Option<f64>,

        /// Skip the results chart at the end
        #[arg(long)]
        no_results: bool,
    },

    /// Write a random target layout
    GenerateLayout {
        /// Number of targets
        #[arg(short = 'n', long)]
        count: usize,

        /// Target radius; several comma separated values write a radius list
        #[arg(short, long, value_delimiter = ',', required = true)]
        radius: Vec<f64>,

        /// Output setup file
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = 800)]
        width: u32,

        #[arg(long, default_value_t = 600)]
        height: u32,
    },

    /// Print balanced Latin square condition orders
    LatinSquare {
        /// Number of conditions
        #[arg(short, long)]
        conditions: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    match cli.command.unwrap_or(Commands::Run {
        setup: Vec::new(),
        participant: None,
        techniques: Vec::new(),
        log: None,
        border: None,
        no_results: false,
    }) {
        Commands::Run {
            setup,
            participant,
            techniques,
            log,
            border,
            no_results,
        } => {
            let settings = Settings::load_or_default();
            let mut cfg = ExperimentConfig::from_settings(&settings);
            for path in &setup {
                cfg.setups.push(NamedSetup::from_path(path, SetupFile::load(path)?));
            }
            if let Some(p) = participant {
                cfg.participant_id = p;
            }
            if !techniques.is_empty() {
                cfg.techniques = techniques;
            }
            if let Some(path) = log {
                cfg.log_path = path;
            }
            if let Some(b) = border {
                cfg.highlight_border = b;
            }
            cfg.show_results = !no_results;
            run_experiment(cfg, settings)?;
        }
        Commands::GenerateLayout {
            count,
            radius,
            output,
            seed,
            width,
            height,
        } => {
            let mut rng = match seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            };
            let bounds = LayoutBounds { width, height };
            let setup = if radius.len() == 1 {
                generate_uniform(&mut rng, bounds, count, radius[0])?
            } else {
                generate_with_radius_list(&mut rng, bounds, count, radius)?
            };
            setup.save(&output)?;
            log::info!("Wrote {} targets to {:?}", count, output);
        }
        Commands::LatinSquare { conditions } => {
            for row in balanced_square(conditions) {
                let cells: Vec<String> = row.iter().map(|c| (c + 1).to_string()).collect();
                println!("{}", cells.join(" "));
            }
        }
    }
    Ok(())
}
