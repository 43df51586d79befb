use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260115_000001_stage::Stage, m20260115_000003_application::Application,
    m20260115_000007_inspector::Inspector,
};

static FK_INSPECTION_SCHEDULE_APPLICATION: &str = "fk_inspection_schedule_application";
static FK_INSPECTION_SCHEDULE_INSPECTOR: &str = "fk_inspection_schedule_inspector";
static FK_INSPECTION_SCHEDULE_STAGE: &str = "fk_inspection_schedule_stage";
static IDX_INSPECTION_SCHEDULE_DATE: &str = "idx_inspection_schedule_scheduled_date";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InspectionSchedule::Table)
                    .if_not_exists()
                    .col(pk_auto(InspectionSchedule::Id))
                    .col(integer(InspectionSchedule::ApplicationId))
                    .col(integer(InspectionSchedule::InspectorId))
                    .col(integer(InspectionSchedule::StageId))
                    .col(date(InspectionSchedule::ScheduledDate))
                    .col(time(InspectionSchedule::ScheduledTime))
                    .col(string(InspectionSchedule::Status))
                    .col(text_null(InspectionSchedule::Notes))
                    .col(integer_null(InspectionSchedule::CreatedBy))
                    .col(timestamp(InspectionSchedule::CreatedAt))
                    .col(timestamp(InspectionSchedule::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_INSPECTION_SCHEDULE_APPLICATION)
                            .from(
                                InspectionSchedule::Table,
                                InspectionSchedule::ApplicationId,
                            )
                            .to(Application::Table, Application::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_INSPECTION_SCHEDULE_INSPECTOR)
                            .from(InspectionSchedule::Table, InspectionSchedule::InspectorId)
                            .to(Inspector::Table, Inspector::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_INSPECTION_SCHEDULE_STAGE)
                            .from(InspectionSchedule::Table, InspectionSchedule::StageId)
                            .to(Stage::Table, Stage::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Least-loaded selection counts per-inspector rows on a given date.
        manager
            .create_index(
                Index::create()
                    .name(IDX_INSPECTION_SCHEDULE_DATE)
                    .table(InspectionSchedule::Table)
                    .col(InspectionSchedule::ScheduledDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_INSPECTION_SCHEDULE_DATE)
                    .table(InspectionSchedule::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(InspectionSchedule::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum InspectionSchedule {
    Table,
    Id,
    ApplicationId,
    InspectorId,
    StageId,
    ScheduledDate,
    ScheduledTime,
    Status,
    Notes,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
