//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// nestlead - lead intake and SEO server for a family-focused brokerage site
#[derive(Parser, Debug)]
#[command(name = "nestlead")]
#[command(version)]
#[command(about = "Lead intake API, content quality gate and SEO artifact server", long_about = None)]
pub struct Cli {
    /// Path to the TOML config file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Print the quality report for every city page
    Audit {
        /// Only audit pages of this county
        #[arg(long)]
        county: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the sitemap files and robots.txt to a directory
    Sitemap {
        /// Output directory
        #[arg(long, default_value = "public")]
        out: String,
    },

    /// List the most recent leads
    Leads {
        /// Number of leads to show
        #[arg(long, default_value_t = 20)]
        limit: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// 未指定子命令时运行服务器
    pub fn command_or_default(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_serve() {
        let cli = Cli::parse_from(["nestlead"]);
        assert_eq!(cli.command_or_default(), &Commands::Serve);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["nestlead", "audit", "--config", "prod.toml", "--json"]);
        assert_eq!(cli.config.as_deref(), Some("prod.toml"));
        assert_eq!(
            cli.command,
            Some(Commands::Audit {
                county: None,
                json: true
            })
        );
    }

    #[test]
    fn test_sitemap_and_config_generate() {
        let cli = Cli::parse_from(["nestlead", "sitemap", "--out", "dist"]);
        assert_eq!(
            cli.command,
            Some(Commands::Sitemap {
                out: "dist".to_string()
            })
        );

        let cli = Cli::parse_from(["nestlead", "leads", "--limit", "5"]);
        assert_eq!(
            cli.command,
            Some(Commands::Leads {
                limit: 5,
                json: false
            })
        );

        let cli = Cli::parse_from(["nestlead", "config", "generate", "x.toml", "--force"]);
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                action: ConfigCommands::Generate {
                    output_path: Some("x.toml".to_string()),
                    force: true
                }
            })
        );
    }
}
