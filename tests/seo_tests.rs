//! SEO endpoint integration tests
//!
//! Sitemaps, robots.txt, the quality report endpoint and health checks,
//! served from a temporary content directory.

use std::sync::{Arc, Once};
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};
use tempfile::TempDir;

use nestlead::api::middleware::RequestIdMiddleware;
use nestlead::api::services::{AppStartTime, configure_routes};
use nestlead::config::{SiteConfig, StaticConfig, init_config_with};
use nestlead::content::ContentStore;
use nestlead::services::{FixedWindowLimiter, LeadService};
use nestlead::storage::{LeadSink, SeaOrmStorage};

static INIT: Once = Once::new();

fn init_static_config() {
    INIT.call_once(|| {
        init_config_with(StaticConfig {
            site: SiteConfig {
                base_url: "https://nest.example".to_string(),
                ..Default::default()
            },
            ..Default::default()
        });
    });
}

fn words(n: usize) -> String {
    vec!["home"; n].join(" ")
}

/// 满分页面：字数、FAQ、站内链接、价值模块全部达标，清单齐全
fn strong_page() -> Value {
    json!({
        "name": "Irvine",
        "countyName": "Orange County",
        "intro": words(1250),
        "neighborhoods": (0..6).map(|i| json!({"name": format!("Village {}", i), "description": "Quiet streets"})).collect::<Vec<_>>(),
        "schoolsNotes": "Highly rated public schools",
        "commuteNotes": "I-5 and I-405 access",
        "amenitiesNotes": "Parks and pools",
        "marketSnapshot": {"medianPrice": 1350000, "summary": "Steady demand", "asOf": "2025-02-01"},
        "faqs": (0..5).map(|i| json!({"question": format!("Question {}?", i), "answer": "Answer."})).collect::<Vec<_>>(),
        "internalLinks": (0..10).map(|i| format!("/resources/guide-{}", i)).collect::<Vec<_>>(),
        "valueModules": ["mortgage-calculator", "school-map"],
        "updatedAt": "2025-03-01"
    })
}

fn thin_page() -> Value {
    json!({
        "name": "Tustin",
        "intro": words(300),
        "faqs": [{"question": "Is it nice?", "answer": "Yes."}]
    })
}

fn write(dir: &TempDir, path: &str, body: &Value) {
    let full = dir.path().join(path);
    std::fs::create_dir_all(full.parent().unwrap()).unwrap();
    std::fs::write(full, serde_json::to_vec_pretty(body).unwrap()).unwrap();
}

fn content_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(
        &dir,
        "counties.json",
        &json!([
            {"slug": "orange-county", "name": "Orange County", "updatedAt": "2025-01-20"},
            {"slug": "los-angeles-county", "name": "Los Angeles County"}
        ]),
    );
    write(
        &dir,
        "guides.json",
        &json!([
            {"slug": "buying-with-a-newborn", "title": "Buying with a newborn", "updatedAt": "2025-02-14"},
            {"slug": "Bad Slug", "title": "Ignored"}
        ]),
    );
    write(&dir, "orange-county/irvine.json", &strong_page());
    write(&dir, "orange-county/tustin.json", &thin_page());
    dir
}

async fn sqlite_sink(dir: &TempDir) -> Arc<dyn LeadSink> {
    let db_url = format!("sqlite://{}?mode=rwc", dir.path().join("seo_test.db").display());
    Arc::new(
        SeaOrmStorage::new(&db_url, "sqlite")
            .await
            .expect("Failed to create storage"),
    )
}

macro_rules! site_app {
    ($content:expr, $sink:expr) => {{
        let store = ContentStore::new($content.path(), Duration::from_secs(60), 100);
        let limiter = Arc::new(FixedWindowLimiter::new(5, Duration::from_secs(60)));
        let lead_service = web::Data::new(LeadService::new($sink.clone(), limiter));
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new(store))
                .app_data(web::Data::new($sink.clone()))
                .app_data(lead_service)
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .configure(configure_routes),
        )
        .await
    }};
}

macro_rules! get_text {
    ($app:expr, $uri:expr) => {{
        let resp = test::call_service(&$app, TestRequest::get().uri($uri).to_request()).await;
        let status = resp.status();
        let content_type = resp
            .headers()
            .get("content-type")
            .map(|h| h.to_str().unwrap().to_string())
            .unwrap_or_default();
        let body = test::read_body(resp).await;
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }};
}

#[actix_rt::test]
async fn test_sitemap_areas_lists_only_indexable_pages() {
    init_static_config();
    let content = content_dir();
    let sink = sqlite_sink(&content).await;
    let app = site_app!(content, sink);

    let (status, content_type, body) = get_text!(app, "/sitemap-areas.xml");
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("application/xml"));

    assert!(body.contains("<loc>https://nest.example/areas/orange-county</loc>"));
    assert!(body.contains("<loc>https://nest.example/areas/los-angeles-county</loc>"));
    assert!(body.contains("<loc>https://nest.example/areas/orange-county/irvine</loc>"));
    assert!(body.contains("<lastmod>2025-03-01</lastmod>"));
    assert!(!body.contains("tustin"));
}

#[actix_rt::test]
async fn test_sitemap_areas_survives_broken_city_page() {
    init_static_config();
    let content = content_dir();
    std::fs::write(
        content.path().join("orange-county/costa-mesa.json"),
        "{\"name\": \"Costa Mesa\", ",
    )
    .unwrap();
    let sink = sqlite_sink(&content).await;
    let app = site_app!(content, sink);

    let (status, _, body) = get_text!(app, "/sitemap-areas.xml");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<loc>https://nest.example/areas/orange-county</loc>"));
    assert!(body.contains("<loc>https://nest.example/areas/orange-county/irvine</loc>"));
    assert!(!body.contains("costa-mesa"));

    // 质量报告接口对坏页面仍返回错误
    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/api/areas/orange-county/costa-mesa/quality")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_rt::test]
async fn test_sitemap_index_main_and_guides() {
    init_static_config();
    let content = content_dir();
    let sink = sqlite_sink(&content).await;
    let app = site_app!(content, sink);

    let (status, _, index) = get_text!(app, "/sitemap.xml");
    assert_eq!(status, StatusCode::OK);
    for child in ["sitemap-main.xml", "sitemap-areas.xml", "sitemap-guides.xml"] {
        assert!(index.contains(&format!("<loc>https://nest.example/{}</loc>", child)));
    }

    let (_, _, main) = get_text!(app, "/sitemap-main.xml");
    for page in ["/", "/buy", "/sell", "/areas", "/resources", "/about", "/contact"] {
        assert!(main.contains(&format!("<loc>https://nest.example{}</loc>", page)));
    }

    let (_, _, guides) = get_text!(app, "/sitemap-guides.xml");
    assert!(guides.contains("<loc>https://nest.example/resources</loc>"));
    assert!(guides.contains("<loc>https://nest.example/resources/buying-with-a-newborn</loc>"));
    assert!(!guides.contains("Bad Slug"));
}

#[actix_rt::test]
async fn test_robots_txt() {
    init_static_config();
    let content = content_dir();
    let sink = sqlite_sink(&content).await;
    let app = site_app!(content, sink);

    let resp = test::call_service(&app, TestRequest::get().uri("/robots.txt").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("cache-control").unwrap(),
        "public, max-age=3600"
    );
    assert!(resp.headers().contains_key("x-request-id"));

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("User-agent: *"));
    assert!(body.contains("Disallow: /api/"));
    assert!(body.contains("Sitemap: https://nest.example/sitemap.xml"));
    assert!(body.contains("Sitemap: https://nest.example/sitemap-areas.xml"));
}

#[actix_rt::test]
async fn test_quality_endpoint() {
    init_static_config();
    let content = content_dir();
    let sink = sqlite_sink(&content).await;
    let app = site_app!(content, sink);

    let req = TestRequest::get()
        .uri("/api/areas/orange-county/irvine/quality")
        .to_request();
    let report: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(report["score"], 100);
    assert_eq!(report["robots"], "index,follow");
    assert_eq!(report["checklist"]["allRequirementsMet"], true);

    let req = TestRequest::get()
        .uri("/api/areas/orange-county/tustin/quality")
        .to_request();
    let report: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(report["robots"], "noindex,follow");
    assert_eq!(report["checklist"]["allRequirementsMet"], false);
    assert!(!report["checklist"]["issues"].as_array().unwrap().is_empty());

    for uri in [
        "/api/areas/orange-county/anaheim/quality",
        "/api/areas/orange-county/..%2Fcounties/quality",
        "/api/areas/Orange-County/irvine/quality",
    ] {
        let resp = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[actix_rt::test]
async fn test_health_endpoints() {
    init_static_config();
    let content = content_dir();
    let sink = sqlite_sink(&content).await;
    let app = site_app!(content, sink);

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"]["leads_count"], 0);
    assert_eq!(body["content"]["counties"], 2);

    let resp = test::call_service(&app, TestRequest::get().uri("/health/ready").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, TestRequest::get().uri("/health/live").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}
