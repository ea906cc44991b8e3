//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::config::ConfigArgs;
use super::commands::generate::GenerateArgs;
use super::commands::hooks::HooksArgs;

#[derive(Parser, Debug)]
#[command(name = "dead-air")]
#[command(about = "Dead Air - two-host cold case podcast script generator", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .dead-air/
    #[arg(long, global = true, env = "DEAD_AIR_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate an episode transcript for a case file
    Generate(GenerateArgs),

    /// Extract promotional highlights from a saved transcript
    Hooks(HooksArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}
