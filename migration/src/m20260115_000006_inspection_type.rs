use sea_orm_migration::{prelude::*, schema::*};

static IDX_INSPECTION_TYPE_NAME: &str = "idx_inspection_type_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InspectionType::Table)
                    .if_not_exists()
                    .col(pk_auto(InspectionType::Id))
                    .col(string(InspectionType::Name))
                    .col(text_null(InspectionType::Description))
                    .col(timestamp(InspectionType::CreatedAt))
                    .col(timestamp(InspectionType::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_INSPECTION_TYPE_NAME)
                    .table(InspectionType::Table)
                    .col(InspectionType::Name)
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
                    .name(IDX_INSPECTION_TYPE_NAME)
                    .table(InspectionType::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(InspectionType::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum InspectionType {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}
