//! `nestlead config generate`

use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::StaticConfig;
use crate::interfaces::cli::CliError;

pub async fn config_generate(output_path: Option<String>, force: bool) -> Result<(), CliError> {
    let path = output_path.unwrap_or_else(|| "config.example.toml".to_string());

    // 文件已存在且未指定 --force 时交互确认
    if !force && Path::new(&path).exists() {
        print!(
            "{} {} {}",
            "File already exists:".yellow(),
            path.blue(),
            "Overwrite? [y/N] ".yellow()
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("{}", "Aborted.".red());
            return Ok(());
        }
    }

    StaticConfig::default()
        .save_to_file(&path)
        .map_err(|e| CliError::IoError(format!("Failed to write {}: {}", path, e)))?;

    println!(
        "  {} {}",
        "Configuration file generated:".green(),
        path.blue()
    );
    println!(
        "  {}",
        "Environment variables override it with the NL__ prefix, e.g. NL__SERVER__PORT=9000"
            .dimmed()
    );
    Ok(())
}
