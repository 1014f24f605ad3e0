//! Lead entity: one row per accepted lead form submission

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "leads")]
pub struct Model {
    /// UUID v4, returned to the client as `lead_id`
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub intent: String,
    pub timeline: String,
    pub budget: String,
    pub area: String,
    pub city: Option<String>,
    pub baby_status: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub preferred_contact: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub consent: bool,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub referrer: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub landing_page: Option<String>,
    pub ip_address: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub user_agent: Option<String>,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
