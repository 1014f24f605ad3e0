use actix_web::{HttpResponse, Responder, http::StatusCode, web};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, trace};

use crate::content::ContentStore;
use crate::storage::LeadSink;
use crate::utils::format_duration_human;

// 应用启动时间
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct StorageCheck {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leads_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContentCheck {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counties: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime: u64,
    pub uptime_human: String,
    pub storage: StorageCheck,
    pub content: ContentCheck,
    pub response_time_ms: u64,
}

/// Health Service
///
/// 直接调用 LeadSink 和 ContentStore，探针需要快速返回
pub struct HealthService;

impl HealthService {
    async fn check_storage(sink: &Arc<dyn LeadSink>) -> StorageCheck {
        match tokio::time::timeout(Duration::from_secs(5), sink.count_leads()).await {
            Ok(Ok(count)) => StorageCheck {
                status: "healthy",
                leads_count: Some(count),
                error: None,
            },
            Ok(Err(e)) => {
                error!("Storage health check failed: {}", e);
                StorageCheck {
                    status: "unhealthy",
                    leads_count: None,
                    error: Some(format!("database error: {}", e)),
                }
            }
            Err(_) => {
                error!("Storage health check timeout");
                StorageCheck {
                    status: "unhealthy",
                    leads_count: None,
                    error: Some("timeout".to_string()),
                }
            }
        }
    }

    async fn check_content(store: Arc<ContentStore>) -> ContentCheck {
        match web::block(move || store.list_counties()).await {
            Ok(Ok(counties)) => ContentCheck {
                status: "healthy",
                counties: Some(counties.len()),
                error: None,
            },
            Ok(Err(e)) => ContentCheck {
                status: "unhealthy",
                counties: None,
                error: Some(e.to_string()),
            },
            Err(e) => ContentCheck {
                status: "unhealthy",
                counties: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub async fn health_check(
        sink: web::Data<Arc<dyn LeadSink>>,
        store: web::Data<ContentStore>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let storage = Self::check_storage(sink.get_ref()).await;
        let content = Self::check_content(store.into_inner()).await;

        let now = chrono::Utc::now();
        let uptime = (now - app_start_time.start_datetime).num_seconds().max(0) as u64;
        let is_healthy = storage.status == "healthy" && content.status == "healthy";

        let body = HealthResponse {
            status: if is_healthy { "healthy" } else { "unhealthy" },
            timestamp: now.to_rfc3339(),
            uptime,
            uptime_human: format_duration_human(app_start_time.start_datetime, now),
            storage,
            content,
            response_time_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Health check completed in {:?}, status: {}, uptime: {}",
            start_time.elapsed(),
            body.status,
            body.uptime_human
        );

        let status = if is_healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        HttpResponse::build(status).json(body)
    }

    pub async fn readiness_check() -> impl Responder {
        trace!("Received readiness check request");
        HttpResponse::Ok().content_type("text/plain").body("OK")
    }

    pub async fn liveness_check() -> impl Responder {
        trace!("Received liveness check request");
        HttpResponse::NoContent().finish()
    }
}

/// Health 路由配置
pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/ready", web::get().to(HealthService::readiness_check))
        .route("/ready", web::head().to(HealthService::readiness_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/live", web::head().to(HealthService::liveness_check))
}
