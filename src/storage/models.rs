use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// 访客意向
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LeadIntent {
    Buying,
    Selling,
    Both,
}

/// 投放归因字段
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
    pub referrer: Option<String>,
    pub landing_page: Option<String>,
}

/// 已通过校验、待写入的线索
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub intent: LeadIntent,
    pub timeline: String,
    pub budget: String,
    pub area: String,
    pub city: Option<String>,
    pub baby_status: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub preferred_contact: String,
    pub notes: Option<String>,
    pub consent: bool,
    pub attribution: Attribution,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub const LEAD_STATUS_NEW: &str = "new";
pub const EVENT_LEAD_SUBMITTED: &str = "lead_submitted";
pub const FORM_LEAD: &str = "lead_form";

/// 表单提交事件（分析用）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormEvent {
    pub event_type: String,
    pub form_name: String,
    pub lead_id: Option<String>,
    pub landing_page: Option<String>,
    pub utm_source: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FormEvent {
    pub fn lead_submitted(lead: &Lead) -> Self {
        Self {
            event_type: EVENT_LEAD_SUBMITTED.to_string(),
            form_name: FORM_LEAD.to_string(),
            lead_id: Some(lead.id.clone()),
            landing_page: lead.attribution.landing_page.clone(),
            utm_source: lead.attribution.utm_source.clone(),
            created_at: lead.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_intent_parses_case_insensitively() {
        assert_eq!(LeadIntent::from_str("buying").unwrap(), LeadIntent::Buying);
        assert_eq!(LeadIntent::from_str("SELLING").unwrap(), LeadIntent::Selling);
        assert_eq!(LeadIntent::from_str("Both").unwrap(), LeadIntent::Both);
        assert!(LeadIntent::from_str("renting").is_err());
    }

    #[test]
    fn test_intent_serializes_lowercase() {
        assert_eq!(LeadIntent::Both.as_ref(), "both");
        assert_eq!(
            serde_json::to_string(&LeadIntent::Buying).unwrap(),
            "\"buying\""
        );
    }
}
