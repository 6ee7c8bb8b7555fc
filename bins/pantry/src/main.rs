//! pantry: fuzzy recipe search from the command line.
//!
//! Loads a JSON recipe export and runs ranked searches, autocomplete
//! suggestions, or an index summary against it.

use clap::{Parser, Subcommand};
use pantry_cli::output::Status;
use pantry_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::{inspect, search, suggest};

/// Fuzzy recipe search
#[derive(Parser)]
#[command(name = "pantry")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a pantry.toml configuration file
    #[arg(short, long, global = true, env = "PANTRY_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Print timing metrics as JSON on exit
    #[arg(long, global = true)]
    stats: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank recipes against a query
    Search {
        /// JSON file holding an array of recipes (or {"recipes": [...]})
        file: PathBuf,

        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,

        /// Drop results scoring worse than this (0 = exact, 1 = anything)
        #[arg(long)]
        min_score: Option<f64>,

        /// Enable the extended query syntax (=, ', !, ^, $, |)
        #[arg(short, long)]
        extended: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Show scores and matched fields
        #[arg(long)]
        scores: bool,
    },

    /// Autocomplete titles, tags and categories
    Suggest {
        /// JSON file holding the recipes
        file: PathBuf,

        /// Partial query
        query: String,

        /// Maximum number of suggestions
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize how a collection indexes
    Inspect {
        /// JSON file holding the recipes
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut telemetry = if cli.verbose {
        TelemetryConfig::verbose()
    } else {
        TelemetryConfig::default()
    };
    telemetry.json = cli.log_json;
    if let Err(e) = pantry_telemetry::init_with_config(telemetry) {
        Status::warning(&format!("Logging disabled: {}", e));
    }

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Search {
            file,
            query,
            limit,
            min_score,
            extended,
            json,
            scores,
        } => search::run(
            config,
            &file,
            &query,
            search::Flags {
                limit,
                min_score,
                extended,
                json,
                scores,
            },
        ),
        Commands::Suggest {
            file,
            query,
            limit,
            json,
        } => suggest::run(config, &file, &query, limit, json),
        Commands::Inspect { file, json } => inspect::run(config, &file, json),
    };

    if cli.stats {
        let metrics = pantry_telemetry::metrics().export_json();
        match serde_json::to_string_pretty(&metrics) {
            Ok(text) => eprintln!("{}", text),
            Err(e) => Status::warning(&format!("Could not export metrics: {}", e)),
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Status::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
