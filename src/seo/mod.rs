//! 内容质量闸门与 SEO 产物（sitemap / robots.txt）

pub mod checklist;
pub mod quality;
pub mod robots;
pub mod sitemap;

pub use checklist::{ChecklistReport, validate_checklist};
pub use quality::{
    INDEX_THRESHOLD, QualityMetrics, QualityReport, RobotsDirective, assess, quality_score,
    robots_directive, word_count,
};

use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::errors::Result;

/// 站点对外输出的 SEO 文件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeoArtifact {
    SitemapIndex,
    SitemapMain,
    SitemapAreas,
    SitemapGuides,
    Robots,
}

impl SeoArtifact {
    pub const ALL: [SeoArtifact; 5] = [
        SeoArtifact::SitemapIndex,
        SeoArtifact::SitemapMain,
        SeoArtifact::SitemapAreas,
        SeoArtifact::SitemapGuides,
        SeoArtifact::Robots,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SeoArtifact::SitemapIndex => sitemap::SITEMAP_INDEX,
            SeoArtifact::SitemapMain => sitemap::SITEMAP_MAIN,
            SeoArtifact::SitemapAreas => sitemap::SITEMAP_AREAS,
            SeoArtifact::SitemapGuides => sitemap::SITEMAP_GUIDES,
            SeoArtifact::Robots => "robots.txt",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            SeoArtifact::Robots => "text/plain; charset=utf-8",
            _ => "application/xml; charset=utf-8",
        }
    }

    /// 渲染文件内容，需要读取内容目录的产物会走 ContentStore
    pub fn render(self, store: &ContentStore, site: &SiteConfig) -> Result<String> {
        let base = site.base_url.as_str();
        Ok(match self {
            SeoArtifact::SitemapIndex => sitemap::render_index(base),
            SeoArtifact::SitemapMain => {
                sitemap::render_urlset(base, &sitemap::main_urls(&site.main_pages))
            }
            SeoArtifact::SitemapAreas => {
                let counties = store.list_counties()?;
                let pages = store.all_city_pages()?;
                sitemap::render_urlset(base, &sitemap::area_urls(&counties, &pages))
            }
            SeoArtifact::SitemapGuides => {
                sitemap::render_urlset(base, &sitemap::guide_urls(&store.list_guides()?))
            }
            SeoArtifact::Robots => robots::render_robots(base),
        })
    }
}
