//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use anyhow::Result;

use crate::domain::models::Config;

/// Dispatch a parsed command.
pub async fn run(command: Commands, config: &Config, json_mode: bool) -> Result<()> {
    match command {
        Commands::Generate(args) => commands::generate::execute(args, config, json_mode).await,
        Commands::Hooks(args) => commands::hooks::execute(&args, config, json_mode),
        Commands::Config(args) => commands::config::execute(&args, config, json_mode),
    }
}

/// Print `err` with its cause chain and exit non-zero.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let body = serde_json::json!({ "error": err.to_string(), "causes": causes });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("{} {err}", console::style("error:").red().bold());
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
    }
    std::process::exit(1);
}
