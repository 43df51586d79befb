use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260115_000003_application::Application;

static FK_DOCUMENT_APPLICATION: &str = "fk_document_application";
static IDX_DOCUMENT_USER_ID: &str = "idx_document_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Document::Table)
                    .if_not_exists()
                    .col(pk_auto(Document::Id))
                    .col(integer(Document::UserId))
                    .col(integer_null(Document::ApplicationId))
                    .col(string(Document::FileName))
                    .col(string(Document::FileType))
                    .col(big_integer(Document::FileSize))
                    .col(string(Document::StorageKey))
                    .col(text_null(Document::ExtractedText))
                    .col(double_null(Document::TextConfidence))
                    .col(string(Document::Status))
                    .col(json_null(Document::ComplianceResult))
                    .col(text_null(Document::RejectionReason))
                    .col(timestamp(Document::CreatedAt))
                    .col(timestamp(Document::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_DOCUMENT_APPLICATION)
                            .from(Document::Table, Document::ApplicationId)
                            .to(Application::Table, Application::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DOCUMENT_USER_ID)
                    .table(Document::Table)
                    .col(Document::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DOCUMENT_USER_ID)
                    .table(Document::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Document::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Document {
    Table,
    Id,
    UserId,
    ApplicationId,
    FileName,
    FileType,
    FileSize,
    StorageKey,
    ExtractedText,
    TextConfidence,
    Status,
    ComplianceResult,
    RejectionReason,
    CreatedAt,
    UpdatedAt,
}
