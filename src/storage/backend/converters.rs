use std::str::FromStr;

use crate::storage::models::LEAD_STATUS_NEW;
use crate::storage::{Attribution, FormEvent, Lead, LeadIntent};
use migration::entities::{form_event, lead};

/// 将 Lead 转换为 ActiveModel（只用于插入）
pub fn lead_to_active_model(lead: &Lead) -> lead::ActiveModel {
    use sea_orm::ActiveValue::Set;

    let attribution = &lead.attribution;
    lead::ActiveModel {
        id: Set(lead.id.clone()),
        intent: Set(lead.intent.as_ref().to_string()),
        timeline: Set(lead.timeline.clone()),
        budget: Set(lead.budget.clone()),
        area: Set(lead.area.clone()),
        city: Set(lead.city.clone()),
        baby_status: Set(lead.baby_status.clone()),
        name: Set(lead.name.clone()),
        email: Set(lead.email.clone()),
        phone: Set(lead.phone.clone()),
        preferred_contact: Set(lead.preferred_contact.clone()),
        notes: Set(lead.notes.clone()),
        consent: Set(lead.consent),
        utm_source: Set(attribution.utm_source.clone()),
        utm_medium: Set(attribution.utm_medium.clone()),
        utm_campaign: Set(attribution.utm_campaign.clone()),
        utm_term: Set(attribution.utm_term.clone()),
        utm_content: Set(attribution.utm_content.clone()),
        referrer: Set(attribution.referrer.clone()),
        landing_page: Set(attribution.landing_page.clone()),
        ip_address: Set(lead.ip_address.clone()),
        user_agent: Set(lead.user_agent.clone()),
        status: Set(LEAD_STATUS_NEW.to_string()),
        created_at: Set(lead.created_at),
    }
}

/// 将 Sea-ORM Model 转换为 Lead
///
/// 库中出现未知 intent 时按 `both` 处理
pub fn model_to_lead(model: lead::Model) -> Lead {
    Lead {
        intent: LeadIntent::from_str(&model.intent).unwrap_or(LeadIntent::Both),
        id: model.id,
        timeline: model.timeline,
        budget: model.budget,
        area: model.area,
        city: model.city,
        baby_status: model.baby_status,
        name: model.name,
        email: model.email,
        phone: model.phone,
        preferred_contact: model.preferred_contact,
        notes: model.notes,
        consent: model.consent,
        attribution: Attribution {
            utm_source: model.utm_source,
            utm_medium: model.utm_medium,
            utm_campaign: model.utm_campaign,
            utm_term: model.utm_term,
            utm_content: model.utm_content,
            referrer: model.referrer,
            landing_page: model.landing_page,
        },
        ip_address: model.ip_address,
        user_agent: model.user_agent,
        created_at: model.created_at,
    }
}

pub fn form_event_to_active_model(event: &FormEvent) -> form_event::ActiveModel {
    use sea_orm::ActiveValue::{NotSet, Set};

    form_event::ActiveModel {
        id: NotSet,
        event_type: Set(event.event_type.clone()),
        form_name: Set(event.form_name.clone()),
        lead_id: Set(event.lead_id.clone()),
        landing_page: Set(event.landing_page.clone()),
        utm_source: Set(event.utm_source.clone()),
        created_at: Set(event.created_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::ActiveValue;

    fn sample_lead() -> Lead {
        Lead {
            id: "0b6f3f7e-3c1e-4a55-9d0e-1d2b7f0c9a11".to_string(),
            intent: LeadIntent::Selling,
            timeline: "3-6 months".to_string(),
            budget: "$900k-$1.2M".to_string(),
            area: "Orange County".to_string(),
            city: Some("Irvine".to_string()),
            baby_status: Some("expecting".to_string()),
            name: "Jordan Lee".to_string(),
            email: "jordan@example.com".to_string(),
            phone: None,
            preferred_contact: "email".to_string(),
            notes: None,
            consent: true,
            attribution: Attribution {
                utm_source: Some("google".to_string()),
                landing_page: Some("/areas/orange-county/irvine".to_string()),
                ..Default::default()
            },
            ip_address: Some("203.0.113.9".to_string()),
            user_agent: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_lead_to_active_model_sets_status_new() {
        let lead = sample_lead();
        let model = lead_to_active_model(&lead);

        assert_eq!(model.status, ActiveValue::Set("new".to_string()));
        assert_eq!(model.intent, ActiveValue::Set("selling".to_string()));
        assert_eq!(model.utm_source, ActiveValue::Set(Some("google".to_string())));
    }

    #[test]
    fn test_form_event_leaves_id_unset() {
        let lead = sample_lead();
        let event = FormEvent::lead_submitted(&lead);
        let model = form_event_to_active_model(&event);

        assert!(matches!(model.id, ActiveValue::NotSet));
        assert_eq!(model.lead_id, ActiveValue::Set(Some(lead.id.clone())));
        assert_eq!(model.event_type, ActiveValue::Set("lead_submitted".to_string()));
    }

    #[test]
    fn test_model_to_lead_unknown_intent_defaults_to_both() {
        let lead = sample_lead();
        let model = lead::Model {
            id: lead.id.clone(),
            intent: "investing".to_string(),
            timeline: lead.timeline.clone(),
            budget: lead.budget.clone(),
            area: lead.area.clone(),
            city: None,
            baby_status: None,
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: None,
            preferred_contact: lead.preferred_contact.clone(),
            notes: None,
            consent: true,
            utm_source: None,
            utm_medium: None,
            utm_campaign: None,
            utm_term: None,
            utm_content: None,
            referrer: None,
            landing_page: None,
            ip_address: None,
            user_agent: None,
            status: "new".to_string(),
            created_at: lead.created_at,
        };

        let restored = model_to_lead(model);
        assert_eq!(restored.intent, LeadIntent::Both);
        assert_eq!(restored.email, "jordan@example.com");
    }
}
