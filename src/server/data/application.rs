use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

/// Column values for a new application row.
pub struct NewApplicationRecord<'a> {
    pub user_id: i32,
    pub status: &'a str,
    pub stand_number: &'a str,
    pub district: Option<&'a str>,
    pub construction_type: Option<&'a str>,
    pub project_description: Option<&'a str>,
    pub owner_name: &'a str,
}

pub struct ApplicationRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ApplicationRepository<'a, C> {
    /// Creates a new instance of [`ApplicationRepository`]
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        record: NewApplicationRecord<'_>,
    ) -> Result<entity::application::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let application = entity::application::ActiveModel {
            user_id: ActiveValue::Set(record.user_id),
            status: ActiveValue::Set(record.status.to_string()),
            current_stage_id: ActiveValue::Set(None),
            stand_number: ActiveValue::Set(record.stand_number.to_string()),
            district: ActiveValue::Set(record.district.map(str::to_string)),
            construction_type: ActiveValue::Set(record.construction_type.map(str::to_string)),
            project_description: ActiveValue::Set(record.project_description.map(str::to_string)),
            owner_name: ActiveValue::Set(record.owner_name.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        application.insert(self.conn).await
    }

    pub async fn get_by_id(
        &self,
        application_id: i32,
    ) -> Result<Option<entity::application::Model>, DbErr> {
        entity::prelude::Application::find_by_id(application_id)
            .one(self.conn)
            .await
    }

    pub async fn list_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<entity::application::Model>, DbErr> {
        entity::prelude::Application::find()
            .filter(entity::application::Column::UserId.eq(user_id))
            .order_by_desc(entity::application::Column::CreatedAt)
            .all(self.conn)
            .await
    }

    pub async fn update_status(
        &self,
        application: entity::application::Model,
        status: &str,
    ) -> Result<entity::application::Model, DbErr> {
        let mut active = application.into_active_model();
        active.status = ActiveValue::Set(status.to_string());
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        active.update(self.conn).await
    }

    pub async fn set_current_stage(
        &self,
        application: entity::application::Model,
        stage_id: Option<i32>,
    ) -> Result<entity::application::Model, DbErr> {
        let mut active = application.into_active_model();
        active.current_stage_id = ActiveValue::Set(stage_id);
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        active.update(self.conn).await
    }

    /// Deletes an application
    ///
    /// Owned progress, requirement completion, schedule, and document rows
    /// cascade with it; shared reference data is untouched. Returns OK
    /// regardless of the application existing, check
    /// [`DeleteResult::rows_affected`] for the outcome.
    pub async fn delete(&self, application_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Application::delete_by_id(application_id)
            .exec(self.conn)
            .await
    }
}
