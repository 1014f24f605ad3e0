use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use tracing::{error, trace};

use crate::api::constants::{MSG_PAGE_NOT_FOUND, SEO_CACHE_CONTROL};
use crate::config::get_config;
use crate::content::ContentStore;
use crate::seo::{SeoArtifact, assess};

pub struct SeoService;

impl SeoService {
    /// 内容目录读取是阻塞 IO，放到 blocking 线程池
    async fn serve(artifact: SeoArtifact, store: web::Data<ContentStore>) -> HttpResponse {
        trace!("Rendering {}", artifact.file_name());
        let store = store.into_inner();
        let rendered = web::block(move || {
            let config = get_config();
            artifact.render(&store, &config.site)
        })
        .await;

        match rendered {
            Ok(Ok(body)) => HttpResponse::Ok()
                .content_type(artifact.content_type())
                .insert_header(("Cache-Control", SEO_CACHE_CONTROL))
                .body(body),
            Ok(Err(e)) => {
                error!("Failed to render {}: {}", artifact.file_name(), e.format_colored());
                HttpResponse::InternalServerError().finish()
            }
            Err(e) => {
                error!("Blocking task for {} failed: {}", artifact.file_name(), e);
                HttpResponse::InternalServerError().finish()
            }
        }
    }

    pub async fn sitemap_index(store: web::Data<ContentStore>) -> impl Responder {
        Self::serve(SeoArtifact::SitemapIndex, store).await
    }

    pub async fn sitemap_main(store: web::Data<ContentStore>) -> impl Responder {
        Self::serve(SeoArtifact::SitemapMain, store).await
    }

    pub async fn sitemap_areas(store: web::Data<ContentStore>) -> impl Responder {
        Self::serve(SeoArtifact::SitemapAreas, store).await
    }

    pub async fn sitemap_guides(store: web::Data<ContentStore>) -> impl Responder {
        Self::serve(SeoArtifact::SitemapGuides, store).await
    }

    pub async fn robots_txt(store: web::Data<ContentStore>) -> impl Responder {
        Self::serve(SeoArtifact::Robots, store).await
    }

    /// `GET /api/areas/{county}/{city}/quality`
    pub async fn page_quality(
        path: web::Path<(String, String)>,
        store: web::Data<ContentStore>,
    ) -> impl Responder {
        let (county, city) = path.into_inner();
        let store = store.into_inner();
        let page = web::block(move || store.get_city(&county, &city)).await;

        match page {
            Ok(Ok(Some(page))) => HttpResponse::Ok().json(assess(&page)),
            Ok(Ok(None)) => {
                HttpResponse::NotFound().json(json!({ "ok": false, "error": MSG_PAGE_NOT_FOUND }))
            }
            Ok(Err(e)) => {
                error!("Failed to load city page: {}", e.format_colored());
                HttpResponse::InternalServerError().json(json!({ "ok": false, "error": "Failed to load page" }))
            }
            Err(e) => {
                error!("Blocking task for quality report failed: {}", e);
                HttpResponse::InternalServerError().finish()
            }
        }
    }
}

/// sitemap 与 robots.txt 路由
pub fn seo_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/sitemap.xml", web::get().to(SeoService::sitemap_index))
        .route("/sitemap-main.xml", web::get().to(SeoService::sitemap_main))
        .route("/sitemap-areas.xml", web::get().to(SeoService::sitemap_areas))
        .route("/sitemap-guides.xml", web::get().to(SeoService::sitemap_guides))
        .route("/robots.txt", web::get().to(SeoService::robots_txt));
}

/// 页面质量报告路由（挂载在 /api 下）
pub fn quality_routes() -> actix_web::Resource {
    web::resource("/areas/{county}/{city}/quality").route(web::get().to(SeoService::page_quality))
}
