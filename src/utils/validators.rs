//! 表单与路径参数校验

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s\-()+]{10,}$").expect("valid phone regex"));

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

/// 邮箱：一个 @，不含空白，域名部分至少有一个点
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// 电话：至少 10 个字符，只允许数字、空白、- ( ) +
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// 内容 slug：小写字母数字，用单个连字符分隔
///
/// 文件路径由 slug 拼接而来，不合法的 slug 一律当作不存在
pub fn is_valid_slug(slug: &str) -> bool {
    slug.len() <= 100 && SLUG_RE.is_match(slug)
}
