use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260115_000001_stage::Stage;

static FK_APPLICATION_CURRENT_STAGE: &str = "fk_application_current_stage";
static IDX_APPLICATION_USER_ID: &str = "idx_application_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Application::Table)
                    .if_not_exists()
                    .col(pk_auto(Application::Id))
                    .col(integer(Application::UserId))
                    .col(string(Application::Status))
                    .col(integer_null(Application::CurrentStageId))
                    .col(string(Application::StandNumber))
                    .col(string_null(Application::District))
                    .col(string_null(Application::ConstructionType))
                    .col(text_null(Application::ProjectDescription))
                    .col(string(Application::OwnerName))
                    .col(timestamp(Application::CreatedAt))
                    .col(timestamp(Application::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_APPLICATION_CURRENT_STAGE)
                            .from(Application::Table, Application::CurrentStageId)
                            .to(Stage::Table, Stage::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_APPLICATION_USER_ID)
                    .table(Application::Table)
                    .col(Application::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_APPLICATION_USER_ID)
                    .table(Application::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Application::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Application {
    Table,
    Id,
    UserId,
    Status,
    CurrentStageId,
    StandNumber,
    District,
    ConstructionType,
    ProjectDescription,
    OwnerName,
    CreatedAt,
    UpdatedAt,
}
