//! CLI command structure using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "brint")]
#[command(version, about = "Version-gated symbol substitution", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the current version from the closest Brint.toml
    Version {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a gate version has arrived
    Check {
        /// Gate version (e.g., "3.0.0")
        version: String,

        #[arg(long)]
        json: bool,
    },

    /// List gate declarations found in Rust sources
    List {
        /// File or directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
