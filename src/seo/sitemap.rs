//! sitemap.xml 生成
//!
//! 站点拆成一个索引和三个子 sitemap：
//! - sitemap-main.xml：静态主页面
//! - sitemap-areas.xml：县页面 + 通过质量检查的城市页
//! - sitemap-guides.xml：资源文章

use std::borrow::Cow;
use std::fmt::Write;
use std::sync::Arc;

use chrono::NaiveDate;

use super::quality::assess;
use crate::content::{CityPage, County, Guide};
use crate::utils::time::parse_content_date;

pub const SITEMAP_INDEX: &str = "sitemap.xml";
pub const SITEMAP_MAIN: &str = "sitemap-main.xml";
pub const SITEMAP_AREAS: &str = "sitemap-areas.xml";
pub const SITEMAP_GUIDES: &str = "sitemap-guides.xml";

pub const CHILD_SITEMAPS: [&str; 3] = [SITEMAP_MAIN, SITEMAP_AREAS, SITEMAP_GUIDES];

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapUrl {
    pub path: String,
    pub lastmod: Option<NaiveDate>,
}

impl SitemapUrl {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            lastmod: None,
        }
    }

    fn with_lastmod(mut self, updated_at: Option<&str>) -> Self {
        self.lastmod = updated_at.and_then(parse_content_date);
        self
    }
}

pub fn escape_xml(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 16);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// 拼接绝对地址，兼容 base_url 末尾的斜杠
pub fn absolute_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

pub fn render_urlset(base_url: &str, urls: &[SitemapUrl]) -> String {
    let mut xml = String::with_capacity(128 + urls.len() * 96);
    xml.push_str(XML_HEADER);
    let _ = write!(xml, "\n<urlset xmlns=\"{}\">\n", SITEMAP_NS);

    for url in urls {
        let loc = absolute_url(base_url, &url.path);
        let _ = write!(xml, "  <url>\n    <loc>{}</loc>\n", escape_xml(&loc));
        if let Some(lastmod) = url.lastmod {
            let _ = writeln!(xml, "    <lastmod>{}</lastmod>", lastmod.format("%Y-%m-%d"));
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

pub fn render_index(base_url: &str) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_HEADER);
    let _ = write!(xml, "\n<sitemapindex xmlns=\"{}\">\n", SITEMAP_NS);

    for name in CHILD_SITEMAPS {
        let loc = absolute_url(base_url, name);
        let _ = write!(
            xml,
            "  <sitemap>\n    <loc>{}</loc>\n  </sitemap>\n",
            escape_xml(&loc)
        );
    }

    xml.push_str("</sitemapindex>\n");
    xml
}

pub fn main_urls(main_pages: &[String]) -> Vec<SitemapUrl> {
    main_pages.iter().map(SitemapUrl::new).collect()
}

/// 县页面全部收录，城市页只收录质量检查通过（index,follow）的
pub fn area_urls(counties: &[County], pages: &[Arc<CityPage>]) -> Vec<SitemapUrl> {
    let mut urls: Vec<SitemapUrl> = counties
        .iter()
        .map(|c| {
            SitemapUrl::new(format!("/areas/{}", c.slug)).with_lastmod(c.updated_at.as_deref())
        })
        .collect();

    urls.extend(
        pages
            .iter()
            .filter(|page| assess(page).is_indexable())
            .map(|page| SitemapUrl::new(page.path()).with_lastmod(page.updated_at.as_deref())),
    );
    urls
}

pub fn guide_urls(guides: &[Guide]) -> Vec<SitemapUrl> {
    std::iter::once(SitemapUrl::new("/resources"))
        .chain(guides.iter().map(|g| {
            SitemapUrl::new(format!("/resources/{}", g.slug)).with_lastmod(g.updated_at.as_deref())
        }))
        .collect()
}
