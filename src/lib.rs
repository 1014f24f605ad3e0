//! nestlead - lead intake and SEO backend for a family-focused real-estate site
//!
//! The crate serves two request paths from one actix-web server:
//! form submissions that become persisted leads, and SEO artifacts built
//! from a read-only JSON content directory gated by a quality score.
//!
//! # Architecture
//! - `api`: HTTP handlers and middleware
//! - `services`: lead validation and the per-IP rate limiter
//! - `content`: file-based county / city / guide content store
//! - `seo`: quality gate, checklist, sitemaps and robots.txt
//! - `storage`: sea-orm persistence for leads and form events
//! - `interfaces`: CLI commands (audit, sitemap, config)
//! - `config`: TOML + environment configuration
//! - `runtime`: application lifecycle and execution modes
//! - `system`: logging and panic handling

pub mod api;
pub mod cli;
pub mod config;
pub mod content;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod seo;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
