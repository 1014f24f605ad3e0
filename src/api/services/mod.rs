pub mod health;
pub mod lead;
pub mod seo;

pub use health::{AppStartTime, HealthService, health_routes};
pub use lead::{LeadApi, LeadResponse, lead_routes};
pub use seo::{SeoService, quality_routes, seo_routes};

use actix_web::web;

/// `/api` 作用域：线索表单与页面质量报告
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .service(lead_routes())
        .service(quality_routes())
}

/// 挂载全部路由，server 与集成测试共用
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_routes())
        .service(api_routes())
        .configure(seo_routes);
}
