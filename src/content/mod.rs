//! Read-only JSON content store
//!
//! County, city and guide data lives in plain JSON files under
//! `site.content_dir`. Pages are parsed on demand and cached.

pub mod models;
pub mod store;

pub use models::{CityPage, County, Faq, Guide, MarketSnapshot, Neighborhood, PageSection};
pub use store::ContentStore;
