use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::{CityPage, County, Guide};
use crate::errors::{NestleadError, Result};
use crate::utils::validators::is_valid_slug;

const COUNTIES_FILE: &str = "counties.json";
const GUIDES_FILE: &str = "guides.json";

/// 文件型内容仓库
///
/// 目录结构：
/// ```text
/// counties.json
/// guides.json
/// <county>/<city>.json
/// ```
/// 所有读取都是同步文件 IO，HTTP 层通过 `web::block` 调用
#[derive(Clone)]
pub struct ContentStore {
    root: PathBuf,
    pages: Cache<String, Arc<CityPage>>,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>, ttl: Duration, capacity: u64) -> Self {
        let root = root.into();
        debug!(
            "ContentStore at {} (ttl {:?}, capacity {})",
            root.display(),
            ttl,
            capacity
        );
        Self {
            root,
            pages: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(capacity)
                .build(),
        }
    }

    pub fn from_config() -> Self {
        let config = crate::config::get_config();
        Self::new(
            &config.site.content_dir,
            Duration::from_secs(config.site.content_cache_ttl),
            config.site.content_cache_capacity,
        )
    }

    /// 读取 JSON 文件，文件不存在时返回 None
    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(NestleadError::file_operation(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        serde_json::from_str(&raw).map(Some).map_err(|e| {
            NestleadError::content(format!("Invalid JSON in {}: {}", path.display(), e))
        })
    }

    pub fn list_counties(&self) -> Result<Vec<County>> {
        let counties: Vec<County> = self
            .read_json(&self.root.join(COUNTIES_FILE))?
            .unwrap_or_else(|| {
                warn!("{} not found under {}", COUNTIES_FILE, self.root.display());
                Vec::new()
            });

        Ok(counties
            .into_iter()
            .filter(|c| {
                let ok = is_valid_slug(&c.slug);
                if !ok {
                    warn!("Skipping county with invalid slug '{}'", c.slug);
                }
                ok
            })
            .collect())
    }

    pub fn get_county(&self, slug: &str) -> Result<Option<County>> {
        if !is_valid_slug(slug) {
            return Ok(None);
        }
        Ok(self.list_counties()?.into_iter().find(|c| c.slug == slug))
    }

    /// 某个县下所有城市页的 slug，按字母序
    pub fn list_city_slugs(&self, county: &str) -> Result<Vec<String>> {
        if !is_valid_slug(county) {
            return Ok(Vec::new());
        }

        let dir = self.root.join(county);
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut slugs = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && is_valid_slug(stem)
            {
                slugs.push(stem.to_string());
            }
        }
        slugs.sort();
        Ok(slugs)
    }

    pub fn get_city(&self, county: &str, city: &str) -> Result<Option<Arc<CityPage>>> {
        if !is_valid_slug(county) || !is_valid_slug(city) {
            return Ok(None);
        }

        let key = format!("{}/{}", county, city);
        if let Some(page) = self.pages.get(&key) {
            return Ok(Some(page));
        }

        let path = self.root.join(county).join(format!("{}.json", city));
        let Some(mut page) = self.read_json::<CityPage>(&path)? else {
            return Ok(None);
        };

        // 路径决定页面身份
        page.county = county.to_string();
        page.city = city.to_string();

        let page = Arc::new(page);
        self.pages.insert(key, page.clone());
        Ok(Some(page))
    }

    pub fn list_guides(&self) -> Result<Vec<Guide>> {
        let guides: Vec<Guide> = self
            .read_json(&self.root.join(GUIDES_FILE))?
            .unwrap_or_default();

        Ok(guides
            .into_iter()
            .filter(|g| is_valid_slug(&g.slug))
            .collect())
    }

    /// 所有县下的所有城市页
    ///
    /// 单个页面无法解析时记录警告并跳过，其余页面照常返回
    pub fn all_city_pages(&self) -> Result<Vec<Arc<CityPage>>> {
        let mut pages = Vec::new();
        for county in self.list_counties()? {
            for city in self.list_city_slugs(&county.slug)? {
                match self.get_city(&county.slug, &city) {
                    Ok(Some(page)) => pages.push(page),
                    Ok(None) => {}
                    Err(e) => warn!(
                        "Skipping /areas/{}/{}: {}",
                        county.slug,
                        city,
                        e.format_simple()
                    ),
                }
            }
        }
        Ok(pages)
    }

    pub fn invalidate(&self) {
        self.pages.invalidate_all();
    }
}
