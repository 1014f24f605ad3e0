mod audit;
mod config_gen;
mod leads;
mod sitemap;

pub use audit::{AuditSummary, audit_pages, collect_reports};
pub use config_gen::config_generate;
pub use leads::{lead_summary, list_leads, show_leads};
pub use sitemap::{write_artifacts, write_sitemaps};
