use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

pub struct StageRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> StageRepository<'a, C> {
    /// Creates a new instance of [`StageRepository`]
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Returns the full stage catalog ordered by `order_number`
    pub async fn get_all_ordered(&self) -> Result<Vec<entity::stage::Model>, DbErr> {
        entity::prelude::Stage::find()
            .order_by_asc(entity::stage::Column::OrderNumber)
            .all(self.conn)
            .await
    }

    pub async fn get_by_id(&self, stage_id: i32) -> Result<Option<entity::stage::Model>, DbErr> {
        entity::prelude::Stage::find_by_id(stage_id)
            .one(self.conn)
            .await
    }

    /// Creates a stage catalog entry (administrative/seed path)
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        order_number: i32,
    ) -> Result<entity::stage::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let stage = entity::stage::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            description: ActiveValue::Set(description.map(str::to_string)),
            order_number: ActiveValue::Set(order_number),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        stage.insert(self.conn).await
    }

    /// Returns the requirements attached to a stage
    pub async fn requirements_for_stage(
        &self,
        stage_id: i32,
    ) -> Result<Vec<entity::stage_requirement::Model>, DbErr> {
        entity::prelude::StageRequirement::find()
            .filter(entity::stage_requirement::Column::StageId.eq(stage_id))
            .order_by_asc(entity::stage_requirement::Column::Id)
            .all(self.conn)
            .await
    }

    /// Returns the requirements of one type attached to a stage
    pub async fn requirements_of_type(
        &self,
        stage_id: i32,
        requirement_type: &str,
    ) -> Result<Vec<entity::stage_requirement::Model>, DbErr> {
        entity::prelude::StageRequirement::find()
            .filter(entity::stage_requirement::Column::StageId.eq(stage_id))
            .filter(entity::stage_requirement::Column::RequirementType.eq(requirement_type))
            .all(self.conn)
            .await
    }

    pub async fn requirement_by_id(
        &self,
        requirement_id: i32,
    ) -> Result<Option<entity::stage_requirement::Model>, DbErr> {
        entity::prelude::StageRequirement::find_by_id(requirement_id)
            .one(self.conn)
            .await
    }

    pub async fn create_requirement(
        &self,
        stage_id: i32,
        requirement_type: &str,
        requirement_name: &str,
        is_mandatory: bool,
        description: Option<&str>,
    ) -> Result<entity::stage_requirement::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let requirement = entity::stage_requirement::ActiveModel {
            stage_id: ActiveValue::Set(stage_id),
            requirement_type: ActiveValue::Set(requirement_type.to_string()),
            requirement_name: ActiveValue::Set(requirement_name.to_string()),
            is_mandatory: ActiveValue::Set(is_mandatory),
            description: ActiveValue::Set(description.map(str::to_string)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        requirement.insert(self.conn).await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, Schema};

    use crate::server::{data::stage::StageRepository, util::test::setup::test_setup};

    async fn setup() -> Result<DatabaseConnection, DbErr> {
        let test = test_setup().await;

        let db = test.state.db;
        let schema = Schema::new(DbBackend::Sqlite);

        let stmts = vec![
            schema.create_table_from_entity(entity::prelude::Stage),
            schema.create_table_from_entity(entity::prelude::StageRequirement),
        ];

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(db)
    }

    mod get_all_ordered_tests {
        use sea_orm::DbErr;

        use super::{setup, StageRepository};

        /// Expect stages back in order_number order regardless of insertion order
        #[tokio::test]
        async fn test_get_all_ordered_sorts_by_order_number() -> Result<(), DbErr> {
            let db = setup().await?;
            let stage_repository = StageRepository::new(&db);

            stage_repository.create("Plan Review", None, 3).await?;
            stage_repository
                .create("Application Submission", None, 1)
                .await?;
            stage_repository
                .create("Document Verification", None, 2)
                .await?;

            let stages = stage_repository.get_all_ordered().await?;

            let orders: Vec<i32> = stages.iter().map(|s| s.order_number).collect();
            assert_eq!(orders, vec![1, 2, 3]);

            Ok(())
        }
    }

    mod requirements_for_stage_tests {
        use sea_orm::DbErr;

        use super::{setup, StageRepository};

        /// Expect only the requested stage's requirements
        #[tokio::test]
        async fn test_requirements_scoped_to_stage() -> Result<(), DbErr> {
            let db = setup().await?;
            let stage_repository = StageRepository::new(&db);

            let first = stage_repository
                .create("Application Submission", None, 1)
                .await?;
            let second = stage_repository
                .create("Document Verification", None, 2)
                .await?;

            stage_repository
                .create_requirement(first.id, "form", "Application Form", true, None)
                .await?;
            stage_repository
                .create_requirement(second.id, "document", "Building Plans", true, None)
                .await?;

            let requirements = stage_repository.requirements_for_stage(first.id).await?;

            assert_eq!(requirements.len(), 1);
            assert_eq!(requirements[0].requirement_name, "Application Form");

            Ok(())
        }

        /// Expect type filtering to exclude other requirement types
        #[tokio::test]
        async fn test_requirements_of_type() -> Result<(), DbErr> {
            let db = setup().await?;
            let stage_repository = StageRepository::new(&db);

            let stage = stage_repository
                .create("Foundation Inspection", None, 6)
                .await?;

            stage_repository
                .create_requirement(stage.id, "inspection", "Foundation Inspection", true, None)
                .await?;
            stage_repository
                .create_requirement(
                    stage.id,
                    "document",
                    "Foundation Inspection Report",
                    true,
                    None,
                )
                .await?;

            let inspections = stage_repository
                .requirements_of_type(stage.id, "inspection")
                .await?;

            assert_eq!(inspections.len(), 1);
            assert_eq!(inspections[0].requirement_type, "inspection");

            Ok(())
        }
    }
}
