//! Lead intake service
//!
//! Owns the ordered checks a form submission goes through after the
//! rate limiter: honeypot, required fields, format checks, consent,
//! length limits, then persistence of the lead and its form event.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use super::rate_limit::{FixedWindowLimiter, RateDecision};
use crate::errors::{NestleadError, Result};
use crate::storage::{Attribution, FormEvent, Lead, LeadIntent, LeadSink};
use crate::utils::validators::{is_valid_email, is_valid_phone};

pub const MSG_MISSING_FIELDS: &str = "Missing required fields";
pub const MSG_INVALID_INTENT: &str = "Invalid intent";
pub const MSG_INVALID_EMAIL: &str = "Invalid email address";
pub const MSG_INVALID_PHONE: &str = "Invalid phone number";
pub const MSG_CONSENT_REQUIRED: &str = "Consent is required";

const MAX_CONTACT_LEN: usize = 254;
const MAX_NOTES_LEN: usize = 5000;
const MAX_FIELD_LEN: usize = 500;

/// Raw JSON body of `POST /api/lead`
///
/// Every field is optional so that missing values surface as a validation
/// error instead of a decode error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub intent: Option<String>,
    pub timeline: Option<String>,
    pub budget: Option<String>,
    pub area: Option<String>,
    pub city: Option<String>,
    pub baby_status: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub phone: Option<String>,
    pub preferred_contact: Option<String>,
    pub notes: Option<String>,
    pub consent: Option<bool>,
    #[serde(rename = "utm_source")]
    pub utm_source: Option<String>,
    #[serde(rename = "utm_medium")]
    pub utm_medium: Option<String>,
    #[serde(rename = "utm_campaign")]
    pub utm_campaign: Option<String>,
    #[serde(rename = "utm_term")]
    pub utm_term: Option<String>,
    #[serde(rename = "utm_content")]
    pub utm_content: Option<String>,
    pub referrer: Option<String>,
    #[serde(rename = "landing_page")]
    pub landing_page: Option<String>,
    pub honeypot: Option<String>,
}

/// Phone numbers arrive as strings or, from some form builders, as bare numbers
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

/// Whether the raw body trips the honeypot
///
/// Checked on the untyped JSON so that a filled honeypot is discarded even
/// when other fields have the wrong type. Any non-null value counts except
/// a blank string.
pub fn honeypot_filled(body: &Value) -> bool {
    match body.get("honeypot") {
        None | Some(Value::Null) => false,
        Some(Value::String(text)) => !text.trim().is_empty(),
        Some(_) => true,
    }
}

/// Request metadata captured alongside the lead
#[derive(Debug, Clone, Default)]
pub struct ClientContext {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadOutcome {
    Accepted { lead_id: String },
    /// Honeypot filled in: reported as success, nothing stored
    Discarded,
}

/// Trimmed value, None when absent or blank
fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn check_len(field: &str, value: Option<&str>, max: usize) -> Result<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(NestleadError::validation(format!(
            "Field too long: {}",
            field
        ))),
        _ => Ok(()),
    }
}

impl LeadSubmission {
    pub fn is_spam(&self) -> bool {
        self.honeypot.as_deref().is_some_and(|h| !h.trim().is_empty())
    }

    /// Runs the field checks in order and builds a Lead ready for storage
    pub fn validate(&self, client: &ClientContext, now: DateTime<Utc>) -> Result<Lead> {
        let (
            Some(intent),
            Some(timeline),
            Some(budget),
            Some(area),
            Some(name),
            Some(email),
            Some(preferred_contact),
        ) = (
            non_blank(&self.intent),
            non_blank(&self.timeline),
            non_blank(&self.budget),
            non_blank(&self.area),
            non_blank(&self.name),
            non_blank(&self.email),
            non_blank(&self.preferred_contact),
        )
        else {
            return Err(NestleadError::validation(MSG_MISSING_FIELDS));
        };

        let intent = LeadIntent::from_str(&intent)
            .map_err(|_| NestleadError::validation(MSG_INVALID_INTENT))?;

        if !is_valid_email(&email) {
            return Err(NestleadError::validation(MSG_INVALID_EMAIL));
        }

        let phone = non_blank(&self.phone);
        if let Some(phone) = phone.as_deref()
            && !is_valid_phone(phone)
        {
            return Err(NestleadError::validation(MSG_INVALID_PHONE));
        }

        if self.consent != Some(true) {
            return Err(NestleadError::validation(MSG_CONSENT_REQUIRED));
        }

        let lead = Lead {
            id: Uuid::new_v4().to_string(),
            intent,
            timeline,
            budget,
            area,
            city: non_blank(&self.city),
            baby_status: non_blank(&self.baby_status),
            name,
            email,
            phone,
            preferred_contact,
            notes: non_blank(&self.notes),
            consent: true,
            attribution: Attribution {
                utm_source: non_blank(&self.utm_source),
                utm_medium: non_blank(&self.utm_medium),
                utm_campaign: non_blank(&self.utm_campaign),
                utm_term: non_blank(&self.utm_term),
                utm_content: non_blank(&self.utm_content),
                referrer: non_blank(&self.referrer),
                landing_page: non_blank(&self.landing_page),
            },
            ip_address: client.ip.clone(),
            user_agent: client.user_agent.clone(),
            created_at: now,
        };

        check_lengths(&lead)?;
        Ok(lead)
    }
}

fn check_lengths(lead: &Lead) -> Result<()> {
    check_len("name", Some(&lead.name), MAX_CONTACT_LEN)?;
    check_len("email", Some(&lead.email), MAX_CONTACT_LEN)?;
    check_len("notes", lead.notes.as_deref(), MAX_NOTES_LEN)?;

    let a = &lead.attribution;
    let others = [
        ("timeline", Some(lead.timeline.as_str())),
        ("budget", Some(lead.budget.as_str())),
        ("area", Some(lead.area.as_str())),
        ("city", lead.city.as_deref()),
        ("babyStatus", lead.baby_status.as_deref()),
        ("phone", lead.phone.as_deref()),
        ("preferredContact", Some(lead.preferred_contact.as_str())),
        ("utm_source", a.utm_source.as_deref()),
        ("utm_medium", a.utm_medium.as_deref()),
        ("utm_campaign", a.utm_campaign.as_deref()),
        ("utm_term", a.utm_term.as_deref()),
        ("utm_content", a.utm_content.as_deref()),
        ("referrer", a.referrer.as_deref()),
        ("landing_page", a.landing_page.as_deref()),
    ];
    for (field, value) in others {
        check_len(field, value, MAX_FIELD_LEN)?;
    }
    Ok(())
}

/// Lead intake: rate limiting plus validated persistence
pub struct LeadService {
    sink: Arc<dyn LeadSink>,
    limiter: Arc<FixedWindowLimiter>,
}

impl LeadService {
    pub fn new(sink: Arc<dyn LeadSink>, limiter: Arc<FixedWindowLimiter>) -> Self {
        Self { sink, limiter }
    }

    /// Counts the request against the client's window
    pub fn check_rate(&self, client: &ClientContext) -> RateDecision {
        let key = client.ip.as_deref().unwrap_or("unknown");
        let decision = self.limiter.check(key);
        if !decision.is_allowed() {
            warn!("Lead form rate limit hit for {}", key);
        }
        decision
    }

    /// Spam sink: reported to the client as accepted, nothing is stored
    pub fn discard(&self, client: &ClientContext) -> LeadOutcome {
        info!(
            "Honeypot triggered from {}",
            client.ip.as_deref().unwrap_or("unknown")
        );
        LeadOutcome::Discarded
    }

    pub async fn submit(
        &self,
        submission: LeadSubmission,
        client: ClientContext,
    ) -> Result<LeadOutcome> {
        if submission.is_spam() {
            return Ok(self.discard(&client));
        }

        let lead = submission.validate(&client, Utc::now())?;
        self.sink.insert_lead(&lead).await?;

        if let Err(e) = self
            .sink
            .record_form_event(&FormEvent::lead_submitted(&lead))
            .await
        {
            warn!("Failed to record form event for lead {}: {}", lead.id, e);
        }

        Ok(LeadOutcome::Accepted { lead_id: lead.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_submission() -> LeadSubmission {
        LeadSubmission {
            intent: Some("buying".to_string()),
            timeline: Some("3-6 months".to_string()),
            budget: Some("$800k-$1M".to_string()),
            area: Some("Orange County".to_string()),
            name: Some("Sam Rivera".to_string()),
            email: Some("sam@example.com".to_string()),
            preferred_contact: Some("email".to_string()),
            consent: Some(true),
            ..Default::default()
        }
    }

    fn validate(s: &LeadSubmission) -> Result<Lead> {
        s.validate(&ClientContext::default(), Utc::now())
    }

    fn rejection(s: &LeadSubmission) -> String {
        validate(s).unwrap_err().message().to_string()
    }

    #[test]
    fn test_valid_submission_builds_lead() {
        let mut s = valid_submission();
        s.phone = Some("(714) 555-0100".to_string());
        s.utm_source = Some(" google ".to_string());
        s.notes = Some("   ".to_string());

        let lead = s
            .validate(
                &ClientContext {
                    ip: Some("203.0.113.9".to_string()),
                    user_agent: Some("test-agent".to_string()),
                },
                Utc::now(),
            )
            .unwrap();

        assert_eq!(lead.intent, LeadIntent::Buying);
        assert_eq!(lead.attribution.utm_source.as_deref(), Some("google"));
        assert_eq!(lead.notes, None);
        assert_eq!(lead.ip_address.as_deref(), Some("203.0.113.9"));
        assert!(Uuid::parse_str(&lead.id).is_ok());
    }

    #[test]
    fn test_each_missing_required_field_is_rejected() {
        let clearers: [fn(&mut LeadSubmission); 7] = [
            |s| s.intent = None,
            |s| s.timeline = None,
            |s| s.budget = Some("  ".to_string()),
            |s| s.area = None,
            |s| s.name = Some(String::new()),
            |s| s.email = None,
            |s| s.preferred_contact = None,
        ];
        for clear in clearers {
            let mut s = valid_submission();
            clear(&mut s);
            assert_eq!(rejection(&s), MSG_MISSING_FIELDS);
        }
    }

    #[test]
    fn test_format_checks() {
        let mut s = valid_submission();
        s.intent = Some("renting".to_string());
        assert_eq!(rejection(&s), MSG_INVALID_INTENT);

        let mut s = valid_submission();
        s.email = Some("sam@example".to_string());
        assert_eq!(rejection(&s), MSG_INVALID_EMAIL);

        let mut s = valid_submission();
        s.phone = Some("555-01".to_string());
        assert_eq!(rejection(&s), MSG_INVALID_PHONE);

        let mut s = valid_submission();
        s.phone = Some("  ".to_string());
        assert!(validate(&s).is_ok());
    }

    #[test]
    fn test_consent_must_be_true() {
        for consent in [None, Some(false)] {
            let mut s = valid_submission();
            s.consent = consent;
            assert_eq!(rejection(&s), MSG_CONSENT_REQUIRED);
        }
    }

    #[test]
    fn test_length_limits() {
        let mut s = valid_submission();
        s.notes = Some("n".repeat(MAX_NOTES_LEN));
        assert!(validate(&s).is_ok());

        s.notes = Some("n".repeat(MAX_NOTES_LEN + 1));
        assert_eq!(rejection(&s), "Field too long: notes");

        let mut s = valid_submission();
        s.name = Some("a".repeat(MAX_CONTACT_LEN + 1));
        assert_eq!(rejection(&s), "Field too long: name");

        let mut s = valid_submission();
        s.landing_page = Some(format!("/{}", "x".repeat(MAX_FIELD_LEN)));
        assert_eq!(rejection(&s), "Field too long: landing_page");
    }

    #[test]
    fn test_json_keys() {
        let s: LeadSubmission = serde_json::from_str(
            r#"{"babyStatus":"expecting","preferredContact":"text","utm_campaign":"spring","landing_page":"/buy","honeypot":""}"#,
        )
        .unwrap();
        assert_eq!(s.baby_status.as_deref(), Some("expecting"));
        assert_eq!(s.preferred_contact.as_deref(), Some("text"));
        assert_eq!(s.utm_campaign.as_deref(), Some("spring"));
        assert_eq!(s.landing_page.as_deref(), Some("/buy"));
        assert!(!s.is_spam());
    }

    #[test]
    fn test_numeric_phone_is_accepted() {
        let s: LeadSubmission = serde_json::from_str(r#"{"phone":9495550142}"#).unwrap();
        assert_eq!(s.phone.as_deref(), Some("9495550142"));

        let s: LeadSubmission = serde_json::from_str(r#"{"phone":null}"#).unwrap();
        assert_eq!(s.phone, None);

        let s: LeadSubmission = serde_json::from_str("{}").unwrap();
        assert_eq!(s.phone, None);

        assert!(serde_json::from_str::<LeadSubmission>(r#"{"phone":[1]}"#).is_err());
    }

    #[test]
    fn test_honeypot_filled_on_raw_body() {
        use serde_json::json;

        assert!(!honeypot_filled(&json!({})));
        assert!(!honeypot_filled(&json!({"honeypot": null})));
        assert!(!honeypot_filled(&json!({"honeypot": "  "})));
        assert!(honeypot_filled(&json!({"honeypot": "bot"})));
        assert!(honeypot_filled(&json!({"honeypot": 1})));
        assert!(honeypot_filled(&json!({"honeypot": false})));
        assert!(honeypot_filled(&json!({"honeypot": {"url": "x"}})));
    }

    #[test]
    fn test_honeypot_whitespace_is_not_spam() {
        let mut s = valid_submission();
        s.honeypot = Some(" \t".to_string());
        assert!(!s.is_spam());
        s.honeypot = Some("http://spam".to_string());
        assert!(s.is_spam());
    }
}
