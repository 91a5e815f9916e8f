// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mingle - a bounded, rate-limited engagement session scheduler.
//!
//! This is the binary entry point for the Mingle engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod logexec;
mod replay;
mod run;
mod shutdown;
mod status;

/// Mingle - a bounded, rate-limited engagement session scheduler.
#[derive(Parser, Debug)]
#[command(name = "mingle", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an engagement session against a replay fixture file.
    Run {
        /// JSONL file of scripted discovery batches.
        #[arg(long)]
        fixtures: PathBuf,

        /// Fraction of actions the dry-run executor declines, 0.0..=1.0.
        #[arg(long)]
        refusal_odds: Option<f64>,
    },
    /// Print a summary of the persisted session state.
    Status {
        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Manage Mingle configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Validate the configuration and exit.
    Check,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let load_result = match &cli.config {
        Some(path) => mingle_config::load_and_validate_path(path),
        None => mingle_config::load_and_validate(),
    };
    let config = match load_result {
        Ok(config) => config,
        Err(errors) => {
            mingle_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Run {
            fixtures,
            refusal_odds,
        }) => run::run_session(config, &fixtures, refusal_odds).await,
        Some(Commands::Status { json }) => status::run(&config, json).await,
        Some(Commands::Config {
            command: ConfigCommands::Check,
        }) => {
            println!("mingle: configuration is valid (engine.name={})", config.engine.name);
            Ok(())
        }
        None => {
            println!("mingle: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
