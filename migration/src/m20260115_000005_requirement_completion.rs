use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260115_000002_stage_requirement::StageRequirement,
    m20260115_000003_application::Application,
};

static FK_REQUIREMENT_COMPLETION_APPLICATION: &str = "fk_requirement_completion_application";
static FK_REQUIREMENT_COMPLETION_REQUIREMENT: &str = "fk_requirement_completion_requirement";
static IDX_REQUIREMENT_COMPLETION_PAIR: &str = "idx_requirement_completion_application_requirement";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RequirementCompletion::Table)
                    .if_not_exists()
                    .col(pk_auto(RequirementCompletion::Id))
                    .col(integer(RequirementCompletion::ApplicationId))
                    .col(integer(RequirementCompletion::RequirementId))
                    .col(string(RequirementCompletion::Status))
                    .col(timestamp_null(RequirementCompletion::CompletedAt))
                    .col(integer_null(RequirementCompletion::VerifiedBy))
                    .col(text_null(RequirementCompletion::Notes))
                    .col(integer_null(RequirementCompletion::ReferenceId))
                    .col(timestamp(RequirementCompletion::CreatedAt))
                    .col(timestamp(RequirementCompletion::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_REQUIREMENT_COMPLETION_APPLICATION)
                            .from(
                                RequirementCompletion::Table,
                                RequirementCompletion::ApplicationId,
                            )
                            .to(Application::Table, Application::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_REQUIREMENT_COMPLETION_REQUIREMENT)
                            .from(
                                RequirementCompletion::Table,
                                RequirementCompletion::RequirementId,
                            )
                            .to(StageRequirement::Table, StageRequirement::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_REQUIREMENT_COMPLETION_PAIR)
                    .table(RequirementCompletion::Table)
                    .col(RequirementCompletion::ApplicationId)
                    .col(RequirementCompletion::RequirementId)
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
                    .name(IDX_REQUIREMENT_COMPLETION_PAIR)
                    .table(RequirementCompletion::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RequirementCompletion::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum RequirementCompletion {
    Table,
    Id,
    ApplicationId,
    RequirementId,
    Status,
    CompletedAt,
    VerifiedBy,
    Notes,
    ReferenceId,
    CreatedAt,
    UpdatedAt,
}
