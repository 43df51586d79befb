use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inspector::Table)
                    .if_not_exists()
                    .col(pk_auto(Inspector::Id))
                    .col(string(Inspector::Name))
                    .col(string(Inspector::InspectionType))
                    .col(string(Inspector::AssignedDistrict))
                    .col(boolean(Inspector::Available))
                    .col(string_null(Inspector::WorkId))
                    .col(timestamp(Inspector::CreatedAt))
                    .col(timestamp(Inspector::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Inspector::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Inspector {
    Table,
    Id,
    Name,
    InspectionType,
    AssignedDistrict,
    Available,
    WorkId,
    CreatedAt,
    UpdatedAt,
}
