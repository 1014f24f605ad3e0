//! 城市页质量评分
//!
//! 评分决定页面是否允许被索引：
//! - 字数 >= 1200 得 40 分，>= 900 得 30 分
//! - FAQ >= 5 得 20 分
//! - 站内链接 >= 10 得 20 分
//! - 价值模块 >= 2 得 20 分
//!
//! 总分封顶 100，>= 80 分输出 `index,follow`

use serde::Serialize;
use strum::{AsRefStr, Display};

use super::checklist::{ChecklistReport, validate_checklist};
use crate::content::CityPage;

pub const INDEX_THRESHOLD: u32 = 80;
pub const MAX_SCORE: u32 = 100;

const LONG_FORM_WORDS: usize = 1200;
const STANDARD_WORDS: usize = 900;
const MIN_FAQS: usize = 5;
const MIN_INTERNAL_LINKS: usize = 10;
const MIN_VALUE_MODULES: usize = 2;

/// 评分输入
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub word_count: usize,
    pub faq_count: usize,
    pub internal_link_count: usize,
    pub value_module_count: usize,
}

impl QualityMetrics {
    pub fn from_page(page: &CityPage) -> Self {
        Self {
            word_count: word_count(page),
            faq_count: page.faqs.len(),
            internal_link_count: page.internal_link_count(),
            value_module_count: page
                .value_modules
                .iter()
                .filter(|m| !m.trim().is_empty())
                .count(),
        }
    }

    pub fn score(&self) -> u32 {
        quality_score(
            self.word_count,
            self.faq_count,
            self.internal_link_count,
            self.value_module_count,
        )
    }
}

pub fn quality_score(
    word_count: usize,
    faq_count: usize,
    internal_link_count: usize,
    value_module_count: usize,
) -> u32 {
    let mut score = 0;

    if word_count >= LONG_FORM_WORDS {
        score += 40;
    } else if word_count >= STANDARD_WORDS {
        score += 30;
    }
    if faq_count >= MIN_FAQS {
        score += 20;
    }
    if internal_link_count >= MIN_INTERNAL_LINKS {
        score += 20;
    }
    if value_module_count >= MIN_VALUE_MODULES {
        score += 20;
    }

    score.min(MAX_SCORE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr, Display)]
pub enum RobotsDirective {
    #[serde(rename = "index,follow")]
    #[strum(serialize = "index,follow")]
    Index,
    #[serde(rename = "noindex,follow")]
    #[strum(serialize = "noindex,follow")]
    NoIndex,
}

impl RobotsDirective {
    pub fn is_indexable(self) -> bool {
        self == RobotsDirective::Index
    }
}

pub fn robots_directive(score: u32) -> RobotsDirective {
    if score >= INDEX_THRESHOLD {
        RobotsDirective::Index
    } else {
        RobotsDirective::NoIndex
    }
}

fn words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 页面正文字数（按空白分词）
pub fn word_count(page: &CityPage) -> usize {
    page.text_blocks().map(words).sum()
}

/// 单个页面的完整质量报告
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub path: String,
    pub score: u32,
    pub robots: RobotsDirective,
    pub checklist: ChecklistReport,
    pub metrics: QualityMetrics,
}

impl QualityReport {
    pub fn is_indexable(&self) -> bool {
        self.robots.is_indexable()
    }
}

pub fn assess(page: &CityPage) -> QualityReport {
    let metrics = QualityMetrics::from_page(page);
    let score = metrics.score();
    QualityReport {
        path: page.path(),
        score,
        robots: robots_directive(score),
        checklist: validate_checklist(page),
        metrics,
    }
}
