use sea_orm_migration::{prelude::*, schema::*};

static IDX_STAGE_ORDER_NUMBER: &str = "idx_stage_order_number";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stage::Table)
                    .if_not_exists()
                    .col(pk_auto(Stage::Id))
                    .col(string(Stage::Name))
                    .col(text_null(Stage::Description))
                    .col(integer(Stage::OrderNumber))
                    .col(timestamp(Stage::CreatedAt))
                    .col(timestamp(Stage::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_STAGE_ORDER_NUMBER)
                    .table(Stage::Table)
                    .col(Stage::OrderNumber)
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
                    .name(IDX_STAGE_ORDER_NUMBER)
                    .table(Stage::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Stage::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Stage {
    Table,
    Id,
    Name,
    Description,
    OrderNumber,
    CreatedAt,
    UpdatedAt,
}
