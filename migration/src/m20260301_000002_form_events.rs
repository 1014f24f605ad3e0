//! 表单事件表迁移
//!
//! form_events 记录每次成功提交，供分析使用

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FormEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FormEvents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FormEvents::EventType)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FormEvents::FormName)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FormEvents::LeadId).string_len(36).null())
                    .col(ColumnDef::new(FormEvents::LandingPage).text().null())
                    .col(ColumnDef::new(FormEvents::UtmSource).string_len(500).null())
                    .col(
                        ColumnDef::new(FormEvents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_form_events_type_time")
                    .table(FormEvents::Table)
                    .col(FormEvents::EventType)
                    .col(FormEvents::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_form_events_type_time").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(FormEvents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FormEvents {
    #[sea_orm(iden = "form_events")]
    Table,
    Id,
    EventType,
    FormName,
    LeadId,
    LandingPage,
    UtmSource,
    CreatedAt,
}
