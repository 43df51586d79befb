use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

pub struct ProgressRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ProgressRepository<'a, C> {
    /// Creates a new instance of [`ProgressRepository`]
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Returns the progress row for one (application, stage) pair. At most
    /// one row exists per pair.
    pub async fn find_pair(
        &self,
        application_id: i32,
        stage_id: i32,
    ) -> Result<Option<entity::application_progress::Model>, DbErr> {
        entity::prelude::ApplicationProgress::find()
            .filter(entity::application_progress::Column::ApplicationId.eq(application_id))
            .filter(entity::application_progress::Column::StageId.eq(stage_id))
            .one(self.conn)
            .await
    }

    pub async fn find_by_application(
        &self,
        application_id: i32,
    ) -> Result<Vec<entity::application_progress::Model>, DbErr> {
        entity::prelude::ApplicationProgress::find()
            .filter(entity::application_progress::Column::ApplicationId.eq(application_id))
            .all(self.conn)
            .await
    }

    pub async fn insert_in_progress(
        &self,
        application_id: i32,
        stage_id: i32,
    ) -> Result<entity::application_progress::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let progress = entity::application_progress::ActiveModel {
            application_id: ActiveValue::Set(application_id),
            stage_id: ActiveValue::Set(stage_id),
            status: ActiveValue::Set("in_progress".to_string()),
            started_at: ActiveValue::Set(now),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        progress.insert(self.conn).await
    }

    /// Re-enters an existing progress row, resetting it to `in_progress` and
    /// re-stamping `started_at`
    pub async fn reset_in_progress(
        &self,
        progress: entity::application_progress::Model,
    ) -> Result<entity::application_progress::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let mut active = progress.into_active_model();
        active.status = ActiveValue::Set("in_progress".to_string());
        active.started_at = ActiveValue::Set(now);
        active.completed_at = ActiveValue::Set(None);
        active.updated_at = ActiveValue::Set(now);

        active.update(self.conn).await
    }

    pub async fn mark_completed(
        &self,
        progress: entity::application_progress::Model,
        completed_by: Option<i32>,
        notes: Option<&str>,
    ) -> Result<entity::application_progress::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let mut active = progress.into_active_model();
        active.status = ActiveValue::Set("completed".to_string());
        active.completed_at = ActiveValue::Set(Some(now));
        active.updated_at = ActiveValue::Set(now);
        if completed_by.is_some() {
            active.completed_by = ActiveValue::Set(completed_by);
        }
        if let Some(notes) = notes {
            active.notes = ActiveValue::Set(Some(notes.to_string()));
        }

        active.update(self.conn).await
    }
}
