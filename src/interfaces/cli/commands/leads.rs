//! `nestlead leads`

use colored::Colorize;
use std::sync::Arc;

use crate::interfaces::cli::CliError;
use crate::storage::{Lead, SeaOrmStorage, StorageFactory};

/// 单行摘要：时间、意向、联系人、区域
pub fn lead_summary(lead: &Lead) -> String {
    let area = match lead.city.as_deref() {
        Some(city) => format!("{} / {}", lead.area, city),
        None => lead.area.clone(),
    };
    format!(
        "{}  {:<7}  {} <{}>  {}  via {}",
        lead.created_at.format("%Y-%m-%d %H:%M UTC"),
        lead.intent.as_ref(),
        lead.name,
        lead.email,
        area,
        lead.attribution.utm_source.as_deref().unwrap_or("direct")
    )
}

pub async fn list_leads(storage: Arc<SeaOrmStorage>, limit: u64, json: bool) -> Result<(), CliError> {
    let leads = storage
        .recent_leads(limit)
        .await
        .map_err(|e| CliError::CommandError(format!("Failed to load leads: {}", e)))?;

    if json {
        let out = serde_json::to_string_pretty(&leads)
            .map_err(|e| CliError::CommandError(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    if leads.is_empty() {
        println!("{} No leads yet", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Recent leads:".bold().green());
    println!();
    for lead in &leads {
        println!("  {}", lead_summary(lead));
    }
    println!();
    println!(
        "{} Showing {} most recent",
        "ℹ".bold().blue(),
        leads.len().to_string().green()
    );
    Ok(())
}

pub async fn show_leads(limit: u64, json: bool) -> Result<(), CliError> {
    let storage = StorageFactory::create()
        .await
        .map_err(|e| CliError::CommandError(format!("Failed to open storage: {}", e)))?;
    list_leads(storage, limit, json).await
}
