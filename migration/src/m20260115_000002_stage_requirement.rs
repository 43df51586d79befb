use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260115_000001_stage::Stage;

static FK_STAGE_REQUIREMENT_STAGE: &str = "fk_stage_requirement_stage";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StageRequirement::Table)
                    .if_not_exists()
                    .col(pk_auto(StageRequirement::Id))
                    .col(integer(StageRequirement::StageId))
                    .col(string(StageRequirement::RequirementType))
                    .col(string(StageRequirement::RequirementName))
                    .col(boolean(StageRequirement::IsMandatory))
                    .col(text_null(StageRequirement::Description))
                    .col(timestamp(StageRequirement::CreatedAt))
                    .col(timestamp(StageRequirement::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_STAGE_REQUIREMENT_STAGE)
                            .from(StageRequirement::Table, StageRequirement::StageId)
                            .to(Stage::Table, Stage::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StageRequirement::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum StageRequirement {
    Table,
    Id,
    StageId,
    RequirementType,
    RequirementName,
    IsMandatory,
    Description,
    CreatedAt,
    UpdatedAt,
}
