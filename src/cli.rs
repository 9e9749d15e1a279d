//! Command-line argument parsing
//!
//! Supports:
//! - Replaying a recorded touch script against a layout
//! - Printing the effective configuration
//! - Printing the embedded default layout

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gesture engine for swipe soft keyboards
#[derive(Parser, Debug)]
#[command(name = "flickboard", version, about = "Gesture engine for swipe soft keyboards")]
pub struct CliArgs {
    /// Config file (defaults to ~/.config/flickboard/config.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Replay a touch script and print the composed text
    Replay {
        /// Script file (YAML)
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Layout file (defaults to the user or embedded layout)
        #[arg(long, value_name = "FILE")]
        layout: Option<PathBuf>,

        /// Print the event log as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration
    Config,
    /// Print the embedded default layout
    Layout,
}
