//! Read-only operations for SeaOrmStorage

use sea_orm::{EntityTrait, QueryOrder, QuerySelect};

use super::SeaOrmStorage;
use super::converters::model_to_lead;
use crate::errors::{NestleadError, Result};
use crate::storage::Lead;

use migration::entities::lead;

impl SeaOrmStorage {
    /// 最新的若干条线索，按创建时间倒序
    pub async fn recent_leads(&self, limit: u64) -> Result<Vec<Lead>> {
        let models = lead::Entity::find()
            .order_by_desc(lead::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| {
                NestleadError::database_operation(format!("Failed to list leads: {}", e))
            })?;

        Ok(models.into_iter().map(model_to_lead).collect())
    }
}
