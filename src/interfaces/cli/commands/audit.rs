//! `nestlead audit`

use colored::Colorize;

use crate::content::ContentStore;
use crate::interfaces::cli::CliError;
use crate::seo::{QualityReport, assess};

#[derive(Debug, Default)]
pub struct AuditSummary {
    pub reports: Vec<QualityReport>,
    /// (page path, error)
    pub failures: Vec<(String, String)>,
}

impl AuditSummary {
    pub fn indexable(&self) -> usize {
        self.reports.iter().filter(|r| r.is_indexable()).count()
    }
}

/// 遍历城市页生成质量报告，单页加载失败不影响其余页面
pub fn collect_reports(store: &ContentStore, county: Option<&str>) -> Result<AuditSummary, CliError> {
    let counties: Vec<String> = match county {
        Some(slug) => {
            let county = store
                .get_county(slug)?
                .ok_or_else(|| CliError::CommandError(format!("County not found: {}", slug)))?;
            vec![county.slug]
        }
        None => store.list_counties()?.into_iter().map(|c| c.slug).collect(),
    };

    let mut summary = AuditSummary::default();
    for county in &counties {
        for city in store.list_city_slugs(county)? {
            let path = format!("/areas/{}/{}", county, city);
            match store.get_city(county, &city) {
                Ok(Some(page)) => summary.reports.push(assess(&page)),
                Ok(None) => summary
                    .failures
                    .push((path, "page disappeared while auditing".to_string())),
                Err(e) => summary.failures.push((path, e.format_simple())),
            }
        }
    }
    Ok(summary)
}

fn print_report(report: &QualityReport) {
    let robots = if report.is_indexable() {
        report.robots.as_ref().green()
    } else {
        report.robots.as_ref().yellow()
    };
    let checklist = if report.checklist.all_requirements_met {
        "checklist ok".green()
    } else {
        "checklist incomplete".red()
    };

    println!(
        "{} {:>3}  {}  {}",
        report.path.blue(),
        report.score,
        robots,
        checklist
    );
    println!(
        "    {} words, {} faqs, {} internal links, {} value modules",
        report.metrics.word_count,
        report.metrics.faq_count,
        report.metrics.internal_link_count,
        report.metrics.value_module_count
    );
    for issue in &report.checklist.issues {
        println!("    {} {}", "-".dimmed(), issue);
    }
}

pub async fn audit_pages(county: Option<String>, json: bool) -> Result<(), CliError> {
    let store = ContentStore::from_config();
    let summary = tokio::task::spawn_blocking(move || collect_reports(&store, county.as_deref()))
        .await
        .map_err(|e| CliError::CommandError(format!("Audit task failed: {}", e)))??;

    if json {
        let out = serde_json::to_string_pretty(&summary.reports)
            .map_err(|e| CliError::CommandError(e.to_string()))?;
        println!("{}", out);
    } else {
        for report in &summary.reports {
            print_report(report);
        }
        println!(
            "\n{} {} pages, {} indexable",
            "Audit complete:".bold(),
            summary.reports.len(),
            summary.indexable()
        );
    }

    if summary.failures.is_empty() {
        return Ok(());
    }

    for (path, err) in &summary.failures {
        eprintln!("{} {}: {}", "Failed:".red().bold(), path, err);
    }
    Err(CliError::ContentError(format!(
        "{} page(s) failed to load",
        summary.failures.len()
    )))
}
