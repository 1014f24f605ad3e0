//! API 模块常量定义
//!
//! 响应头、缓存策略以及返回给前端的固定文案。

/// 请求 ID 响应头
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// sitemap / robots.txt 的缓存策略
pub const SEO_CACHE_CONTROL: &str = "public, max-age=3600";

pub const MSG_LEAD_ACCEPTED: &str = "Thank you! We'll be in touch soon.";
pub const MSG_RATE_LIMITED: &str = "Too many requests. Please try again later.";
pub const MSG_INVALID_JSON: &str = "Invalid request body";
/// 存储失败时的固定文案，不向客户端暴露内部错误
pub const MSG_SAVE_FAILED: &str = "Failed to save your information. Please try again.";
pub const MSG_PAGE_NOT_FOUND: &str = "Page not found";
