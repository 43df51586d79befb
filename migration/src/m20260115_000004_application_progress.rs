use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20260115_000001_stage::Stage, m20260115_000003_application::Application};

static FK_APPLICATION_PROGRESS_APPLICATION: &str = "fk_application_progress_application";
static FK_APPLICATION_PROGRESS_STAGE: &str = "fk_application_progress_stage";
static IDX_APPLICATION_PROGRESS_PAIR: &str = "idx_application_progress_application_stage";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApplicationProgress::Table)
                    .if_not_exists()
                    .col(pk_auto(ApplicationProgress::Id))
                    .col(integer(ApplicationProgress::ApplicationId))
                    .col(integer(ApplicationProgress::StageId))
                    .col(string(ApplicationProgress::Status))
                    .col(timestamp(ApplicationProgress::StartedAt))
                    .col(timestamp_null(ApplicationProgress::CompletedAt))
                    .col(text_null(ApplicationProgress::Notes))
                    .col(integer_null(ApplicationProgress::CompletedBy))
                    .col(timestamp(ApplicationProgress::CreatedAt))
                    .col(timestamp(ApplicationProgress::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_APPLICATION_PROGRESS_APPLICATION)
                            .from(
                                ApplicationProgress::Table,
                                ApplicationProgress::ApplicationId,
                            )
                            .to(Application::Table, Application::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_APPLICATION_PROGRESS_STAGE)
                            .from(ApplicationProgress::Table, ApplicationProgress::StageId)
                            .to(Stage::Table, Stage::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One progress row per (application, stage); re-entry updates in place.
        manager
            .create_index(
                Index::create()
                    .name(IDX_APPLICATION_PROGRESS_PAIR)
                    .table(ApplicationProgress::Table)
                    .col(ApplicationProgress::ApplicationId)
                    .col(ApplicationProgress::StageId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_APPLICATION_PROGRESS_PAIR)
                    .table(ApplicationProgress::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ApplicationProgress::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ApplicationProgress {
    Table,
    Id,
    ApplicationId,
    StageId,
    Status,
    StartedAt,
    CompletedAt,
    Notes,
    CompletedBy,
    CreatedAt,
    UpdatedAt,
}
