//! Write operations for SeaOrmStorage

use async_trait::async_trait;
use sea_orm::{EntityTrait, PaginatorTrait};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::{form_event_to_active_model, lead_to_active_model};
use super::retry;
use crate::errors::{NestleadError, Result};
use crate::storage::{FormEvent, Lead, LeadSink};

use migration::entities::{form_event, lead};

#[async_trait]
impl LeadSink for SeaOrmStorage {
    async fn insert_lead(&self, lead_record: &Lead) -> Result<()> {
        let db = &self.db;

        retry::with_retry(
            &format!("insert_lead({})", lead_record.id),
            self.retry_config,
            || async {
                lead::Entity::insert(lead_to_active_model(lead_record))
                    .exec_without_returning(db)
                    .await
            },
        )
        .await
        .map_err(|e| NestleadError::database_operation(format!("Failed to insert lead: {}", e)))?;

        info!(
            lead_id = %lead_record.id,
            intent = %lead_record.intent,
            area = %lead_record.area,
            "Lead saved"
        );
        Ok(())
    }

    async fn record_form_event(&self, event: &FormEvent) -> Result<()> {
        let db = &self.db;

        retry::with_retry("record_form_event", self.retry_config, || async {
            form_event::Entity::insert(form_event_to_active_model(event))
                .exec_without_returning(db)
                .await
        })
        .await
        .map_err(|e| {
            NestleadError::database_operation(format!("Failed to record form event: {}", e))
        })?;

        debug!("Form event '{}' recorded", event.event_type);
        Ok(())
    }

    async fn count_leads(&self) -> Result<u64> {
        lead::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| NestleadError::database_operation(format!("Failed to count leads: {}", e)))
    }
}
