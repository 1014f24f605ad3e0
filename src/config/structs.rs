use serde::{Deserialize, Serialize};

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含：
/// - server: 服务器地址、端口、CPU 数量、可信代理
/// - database: 数据库连接配置
/// - logging: 日志配置
/// - site: 站点地址、内容目录、主页面列表
/// - lead: 线索表单限流与请求体上限
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub lead: LeadConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：NL，分隔符：__
    /// 示例：NL__SERVER__PORT=9999
    pub fn load(path: Option<&str>) -> Self {
        use config::{Config, Environment, File};

        let path = path.unwrap_or("config.toml");

        let builder = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖，前缀 NL，分隔符 __
            .add_source(
                Environment::with_prefix("NL")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.trusted_proxies")
                    .with_list_parse_key("site.main_pages")
                    .with_list_parse_key("site.allowed_origins"),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
    /// 可信代理（单 IP 或 CIDR）。为空时自动信任私有地址
    #[serde(default)]
    pub trusted_proxies: Vec<String>,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// 站点与内容配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// 站点公开地址，用于生成 sitemap 和 robots.txt 中的绝对 URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// JSON 内容目录（counties.json / guides.json / <county>/<city>.json）
    #[serde(default = "default_content_dir")]
    pub content_dir: String,
    /// 已解析页面的缓存时间（秒）
    #[serde(default = "default_content_cache_ttl")]
    pub content_cache_ttl: u64,
    #[serde(default = "default_content_cache_capacity")]
    pub content_cache_capacity: u64,
    /// 出现在 sitemap-main.xml 中的静态页面
    #[serde(default = "default_main_pages")]
    pub main_pages: Vec<String>,
    /// 允许跨域提交线索表单的来源，为空时只允许同源
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// 线索接口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadConfig {
    #[serde(default = "default_rate_limit_window_secs")]
    pub rate_limit_window_secs: u64,
    #[serde(default = "default_rate_limit_max_requests")]
    pub rate_limit_max_requests: u32,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "leads.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_content_dir() -> String {
    "content".to_string()
}

fn default_content_cache_ttl() -> u64 {
    300
}

fn default_content_cache_capacity() -> u64 {
    1000
}

fn default_main_pages() -> Vec<String> {
    ["/", "/buy", "/sell", "/areas", "/resources", "/about", "/contact"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_rate_limit_window_secs() -> u64 {
    60
}

fn default_rate_limit_max_requests() -> u32 {
    5
}

fn default_max_body_bytes() -> usize {
    16 * 1024
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
            trusted_proxies: Vec::new(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            content_dir: default_content_dir(),
            content_cache_ttl: default_content_cache_ttl(),
            content_cache_capacity: default_content_cache_capacity(),
            main_pages: default_main_pages(),
            allowed_origins: Vec::new(),
        }
    }
}

impl Default for LeadConfig {
    fn default() -> Self {
        Self {
            rate_limit_window_secs: default_rate_limit_window_secs(),
            rate_limit_max_requests: default_rate_limit_max_requests(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lead_limits() {
        let config = StaticConfig::default();
        assert_eq!(config.lead.rate_limit_window_secs, 60);
        assert_eq!(config.lead.rate_limit_max_requests, 5);
    }

    #[test]
    fn test_sample_config_round_trips_through_toml() {
        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[site]"));
        assert!(sample.contains("[lead]"));

        let parsed: StaticConfig = toml::from_str(&sample).expect("sample config must parse");
        assert_eq!(parsed.site.main_pages, default_main_pages());
        assert_eq!(parsed.server.port, 8080);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: StaticConfig = toml::from_str(
            r#"
            [site]
            base_url = "https://example.com"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.site.base_url, "https://example.com");
        assert_eq!(parsed.site.content_dir, "content");
        assert_eq!(parsed.lead.max_body_bytes, 16 * 1024);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9191\n[lead]\nrate_limit_max_requests = 3\n",
        )
        .unwrap();

        let config = StaticConfig::load(Some(path.to_str().unwrap()));
        assert_eq!(config.server.port, 9191);
        assert_eq!(config.lead.rate_limit_max_requests, 3);
    }
}
