use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::content::ContentStore;
use crate::services::{FixedWindowLimiter, LeadService};
use crate::storage::{LeadSink, SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub sink: Arc<dyn LeadSink>,
    pub content: ContentStore,
    pub lead_service: Arc<LeadService>,
    pub limiter_cleanup: JoinHandle<()>,
}

/// 准备服务器启动的上下文
/// 包括存储、内容仓库和线索服务
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let config = crate::config::get_config();

    url::Url::parse(&config.site.base_url)
        .with_context(|| format!("Invalid site.base_url: {}", config.site.base_url))?;

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!(
        "Using storage backend: {}",
        storage.get_backend_config().storage_type
    );
    let sink: Arc<dyn LeadSink> = storage.clone();

    if !Path::new(&config.site.content_dir).is_dir() {
        warn!(
            "Content directory '{}' does not exist; area pages and guides will be empty",
            config.site.content_dir
        );
    }
    let content = ContentStore::from_config();

    let limiter = Arc::new(FixedWindowLimiter::from_config(&config.lead));
    let limiter_cleanup = limiter.spawn_cleanup();
    info!(
        "Lead form rate limit: {} requests per {}s",
        config.lead.rate_limit_max_requests, config.lead.rate_limit_window_secs
    );

    let lead_service = Arc::new(LeadService::new(sink.clone(), limiter));

    debug!("Pre-startup processing completed in {:?}", start_time.elapsed());

    Ok(StartupContext {
        storage,
        sink,
        content,
        lead_service,
        limiter_cleanup,
    })
}
