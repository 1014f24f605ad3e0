use chrono::NaiveDate;
use serde::Serialize;

use crate::content::CityPage;

pub const NEIGHBORHOODS_MIN: usize = 6;
pub const NEIGHBORHOODS_MAX: usize = 10;
pub const FAQS_MIN: usize = 5;
pub const FAQS_MAX: usize = 8;

/// 城市页内容清单检查结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistReport {
    pub neighborhoods_in_range: bool,
    pub has_schools_notes: bool,
    pub has_commute_notes: bool,
    pub has_amenities_notes: bool,
    pub has_market_snapshot: bool,
    pub faqs_in_range: bool,
    pub all_requirements_met: bool,
    pub issues: Vec<String>,
}

fn present(field: Option<&str>) -> bool {
    field.is_some_and(|v| !v.trim().is_empty())
}

fn snapshot_dated(page: &CityPage) -> bool {
    page.market_snapshot
        .as_ref()
        .and_then(|s| s.as_of.as_deref())
        .map(str::trim)
        .is_some_and(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").is_ok())
}

pub fn validate_checklist(page: &CityPage) -> ChecklistReport {
    let neighborhoods = page.neighborhoods.len();
    let faqs = page.faqs.len();

    let neighborhoods_in_range = (NEIGHBORHOODS_MIN..=NEIGHBORHOODS_MAX).contains(&neighborhoods);
    let has_schools_notes = present(page.schools_notes.as_deref());
    let has_commute_notes = present(page.commute_notes.as_deref());
    let has_amenities_notes = present(page.amenities_notes.as_deref());
    let has_market_snapshot = snapshot_dated(page);
    let faqs_in_range = (FAQS_MIN..=FAQS_MAX).contains(&faqs);

    let mut issues = Vec::new();
    if !neighborhoods_in_range {
        issues.push(format!(
            "Expected {}-{} neighborhoods, found {}",
            NEIGHBORHOODS_MIN, NEIGHBORHOODS_MAX, neighborhoods
        ));
    }
    if !has_schools_notes {
        issues.push("Missing schools notes".to_string());
    }
    if !has_commute_notes {
        issues.push("Missing commute notes".to_string());
    }
    if !has_amenities_notes {
        issues.push("Missing amenities notes".to_string());
    }
    if !has_market_snapshot {
        issues.push("Missing market snapshot with a valid asOf date (YYYY-MM-DD)".to_string());
    }
    if !faqs_in_range {
        issues.push(format!(
            "Expected {}-{} FAQs, found {}",
            FAQS_MIN, FAQS_MAX, faqs
        ));
    }

    ChecklistReport {
        neighborhoods_in_range,
        has_schools_notes,
        has_commute_notes,
        has_amenities_notes,
        has_market_snapshot,
        faqs_in_range,
        all_requirements_met: issues.is_empty(),
        issues,
    }
}
