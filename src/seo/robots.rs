use std::fmt::Write;

use super::sitemap::{CHILD_SITEMAPS, SITEMAP_INDEX, absolute_url};

pub fn render_robots(base_url: &str) -> String {
    let mut out = String::from("User-agent: *\nAllow: /\nDisallow: /api/\n\n");
    for name in std::iter::once(SITEMAP_INDEX).chain(CHILD_SITEMAPS) {
        let _ = writeln!(out, "Sitemap: {}", absolute_url(base_url, name));
    }
    out
}
