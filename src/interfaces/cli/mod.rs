//! CLI interface module

pub mod commands;

use crate::cli::{Commands, ConfigCommands};
use commands::{audit_pages, config_generate, show_leads, write_sitemaps};
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    ContentError(String),
    IoError(String),
    CommandError(String),
}

impl CliError {
    pub fn format_simple(&self) -> String {
        match self {
            CliError::ContentError(msg) => format!("Content error: {}", msg),
            CliError::IoError(msg) => format!("I/O error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::ContentError(msg) => {
                format!("{} {}", "Content error:".red().bold(), msg.white())
            }
            CliError::IoError(msg) => format!("{} {}", "I/O error:".yellow().bold(), msg.white()),
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::NestleadError> for CliError {
    fn from(err: crate::errors::NestleadError) -> Self {
        match err {
            crate::errors::NestleadError::FileOperation(msg) => CliError::IoError(msg),
            other => CliError::ContentError(other.format_simple()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError(err.to_string())
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        Commands::Audit { county, json } => audit_pages(county, json).await,
        Commands::Sitemap { out } => write_sitemaps(out).await,
        Commands::Leads { limit, json } => show_leads(limit, json).await,
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force).await,
        Commands::Serve => Err(CliError::CommandError(
            "serve is handled by server mode".to_string(),
        )),
    }
}
