use serde::{Deserialize, Deserializer, Serialize};

/// counties.json 中的一项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct County {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// guides.json 中的一项（资源文章元数据）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSection {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Neighborhood {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketSnapshot {
    /// 无法识别的价格记为 None，不影响整页解析
    #[serde(deserialize_with = "lenient_price")]
    pub median_price: Option<f64>,
    pub summary: Option<String>,
    /// 数据日期，YYYY-MM-DD
    pub as_of: Option<String>,
}

/// 接受任意 JSON 数字或 "$950,000" 形式的字符串
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s
            .chars()
            .filter(|c| !matches!(c, '$' | ',' | ' '))
            .collect::<String>()
            .parse::<f64>()
            .ok(),
        _ => None,
    }
    .filter(|price| price.is_finite() && *price >= 0.0))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// `<county>/<city>.json`
///
/// 字段缺失时取默认值，由质量检查负责报告缺项
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CityPage {
    pub county: String,
    pub city: String,
    pub name: String,
    pub county_name: String,
    pub intro: String,
    pub sections: Vec<PageSection>,
    pub neighborhoods: Vec<Neighborhood>,
    pub schools_notes: Option<String>,
    pub commute_notes: Option<String>,
    pub amenities_notes: Option<String>,
    pub market_snapshot: Option<MarketSnapshot>,
    pub faqs: Vec<Faq>,
    pub internal_links: Vec<String>,
    pub value_modules: Vec<String>,
    pub updated_at: Option<String>,
}

impl CityPage {
    /// 站内路径 /areas/<county>/<city>
    pub fn path(&self) -> String {
        format!("/areas/{}/{}", self.county, self.city)
    }

    /// 页面正文的所有文本块（用于字数统计）
    pub fn text_blocks(&self) -> impl Iterator<Item = &str> {
        let notes = [
            self.schools_notes.as_deref(),
            self.commute_notes.as_deref(),
            self.amenities_notes.as_deref(),
            self.market_snapshot
                .as_ref()
                .and_then(|m| m.summary.as_deref()),
        ];

        std::iter::once(self.intro.as_str())
            .chain(
                self.sections
                    .iter()
                    .flat_map(|s| [s.heading.as_str(), s.body.as_str()]),
            )
            .chain(self.neighborhoods.iter().map(|n| n.description.as_str()))
            .chain(notes.into_iter().flatten())
            .chain(
                self.faqs
                    .iter()
                    .flat_map(|f| [f.question.as_str(), f.answer.as_str()]),
            )
    }

    /// 去重后的站内链接数（只计 / 开头的路径）
    pub fn internal_link_count(&self) -> usize {
        let mut links: Vec<&str> = self
            .internal_links
            .iter()
            .map(|l| l.trim())
            .filter(|l| l.starts_with('/'))
            .collect();
        links.sort_unstable();
        links.dedup();
        links.len()
    }
}
