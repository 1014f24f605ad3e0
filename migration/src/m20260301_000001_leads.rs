//! 线索表迁移
//!
//! 创建 leads 表，保存表单提交的意向、联系方式和投放归因字段

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Leads::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Leads::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Leads::Intent).string_len(16).not_null())
                    .col(ColumnDef::new(Leads::Timeline).string_len(500).not_null())
                    .col(ColumnDef::new(Leads::Budget).string_len(500).not_null())
                    .col(ColumnDef::new(Leads::Area).string_len(500).not_null())
                    .col(ColumnDef::new(Leads::City).string_len(500).null())
                    .col(ColumnDef::new(Leads::BabyStatus).string_len(500).null())
                    .col(ColumnDef::new(Leads::Name).string_len(254).not_null())
                    .col(ColumnDef::new(Leads::Email).string_len(254).not_null())
                    .col(ColumnDef::new(Leads::Phone).string_len(500).null())
                    .col(
                        ColumnDef::new(Leads::PreferredContact)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Leads::Notes).text().null())
                    .col(
                        ColumnDef::new(Leads::Consent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Leads::UtmSource).string_len(500).null())
                    .col(ColumnDef::new(Leads::UtmMedium).string_len(500).null())
                    .col(ColumnDef::new(Leads::UtmCampaign).string_len(500).null())
                    .col(ColumnDef::new(Leads::UtmTerm).string_len(500).null())
                    .col(ColumnDef::new(Leads::UtmContent).string_len(500).null())
                    .col(ColumnDef::new(Leads::Referrer).text().null())
                    .col(ColumnDef::new(Leads::LandingPage).text().null())
                    .col(ColumnDef::new(Leads::IpAddress).string_len(45).null())
                    .col(ColumnDef::new(Leads::UserAgent).text().null())
                    .col(
                        ColumnDef::new(Leads::Status)
                            .string_len(32)
                            .not_null()
                            .default("new"),
                    )
                    .col(
                        ColumnDef::new(Leads::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 按时间查询最新线索
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_leads_created_at")
                    .table(Leads::Table)
                    .col(Leads::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_leads_email")
                    .table(Leads::Table)
                    .col(Leads::Email)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_leads_email").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_leads_created_at").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Leads::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Leads {
    #[sea_orm(iden = "leads")]
    Table,
    Id,
    Intent,
    Timeline,
    Budget,
    Area,
    City,
    BabyStatus,
    Name,
    Email,
    Phone,
    PreferredContact,
    Notes,
    Consent,
    UtmSource,
    UtmMedium,
    UtmCampaign,
    UtmTerm,
    UtmContent,
    Referrer,
    LandingPage,
    IpAddress,
    UserAgent,
    Status,
    CreatedAt,
}
