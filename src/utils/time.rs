use chrono::{DateTime, NaiveDate, Utc};

/// 人类可读的时间间隔，如 "2d 3h"、"5m"
pub fn format_duration_human(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let secs = to.signed_duration_since(from).num_seconds().max(0);

    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;

    match (days, hours, minutes) {
        (d, 0, _) if d > 0 => format!("{}d", d),
        (d, h, _) if d > 0 => format!("{}d {}h", d, h),
        (_, h, 0) if h > 0 => format!("{}h", h),
        (_, h, m) if h > 0 => format!("{}h {}m", h, m),
        (_, _, m) if m > 0 => format!("{}m", m),
        _ => format!("{}s", secs),
    }
}

/// 解析内容文件中的日期（YYYY-MM-DD 或 RFC3339），返回 W3C 日期
pub fn parse_content_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| dt.date_naive())
    })
}
