//! Server mode
//!
//! Builds the actix-web application and runs it until Ctrl+C.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    http::{Method, header},
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::middleware::RequestIdMiddleware;
use crate::api::services::{AppStartTime, configure_routes};
use crate::runtime::lifetime;

/// 线索表单允许跨域提交；为空时使用浏览器同源策略
fn build_cors_middleware(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::default();
    }

    let mut cors = if allowed_origins.iter().any(|o| o == "*") {
        Cors::default().allow_any_origin()
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors = cors
        .allowed_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allowed_header(header::CONTENT_TYPE)
        .allowed_header(header::ACCEPT)
        .expose_headers(["x-request-id", "retry-after"])
        .max_age(3600);
    cors
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let startup = lifetime::startup::prepare_server_startup()
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {:#}", e))?;

    let config = crate::config::get_config();
    let sink = startup.sink.clone();
    let content = startup.content.clone();
    let lead_service = web::Data::from(startup.lead_service.clone());
    let allowed_origins = config.site.allowed_origins.clone();
    let max_body_bytes = config.lead.max_body_bytes;

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    if config.server.trusted_proxies.is_empty() {
        warn!(
            "Rate limiting: auto-detect mode. Connections from private IPs will use \
             X-Forwarded-For. Configure server.trusted_proxies to pin the proxy list."
        );
    } else {
        warn!(
            "Rate limiting: trusted proxies configured: {:?}",
            config.server.trusted_proxies
        );
    }

    let server = HttpServer::new(move || {
        // 最后注册的中间件在最外层：RequestId 需要覆盖 CORS 直接返回的响应
        App::new()
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .wrap(Compress::default())
            .wrap(build_cors_middleware(&allowed_origins))
            .wrap(RequestIdMiddleware)
            .app_data(web::Data::new(sink.clone()))
            .app_data(web::Data::new(content.clone()))
            .app_data(lead_service.clone())
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(web::PayloadConfig::new(max_body_bytes))
            .configure(configure_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    let db = startup.storage.get_db().clone();
    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(db, vec![startup.limiter_cleanup]) => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}
