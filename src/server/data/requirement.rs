use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

/// Field values applied by the requirement ledger's single write path.
pub struct RequirementUpdate<'a> {
    pub status: &'a str,
    pub notes: Option<&'a str>,
    pub reference_id: Option<i32>,
    pub verified_by: Option<i32>,
    pub completed_at: Option<NaiveDateTime>,
}

pub struct RequirementCompletionRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> RequirementCompletionRepository<'a, C> {
    /// Creates a new instance of [`RequirementCompletionRepository`]
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_pair(
        &self,
        application_id: i32,
        requirement_id: i32,
    ) -> Result<Option<entity::requirement_completion::Model>, DbErr> {
        entity::prelude::RequirementCompletion::find()
            .filter(entity::requirement_completion::Column::ApplicationId.eq(application_id))
            .filter(entity::requirement_completion::Column::RequirementId.eq(requirement_id))
            .one(self.conn)
            .await
    }

    pub async fn find_by_application(
        &self,
        application_id: i32,
    ) -> Result<Vec<entity::requirement_completion::Model>, DbErr> {
        entity::prelude::RequirementCompletion::find()
            .filter(entity::requirement_completion::Column::ApplicationId.eq(application_id))
            .all(self.conn)
            .await
    }

    /// Returns the completion rows an application holds for a set of
    /// requirements
    pub async fn find_for_requirements(
        &self,
        application_id: i32,
        requirement_ids: Vec<i32>,
    ) -> Result<Vec<entity::requirement_completion::Model>, DbErr> {
        entity::prelude::RequirementCompletion::find()
            .filter(entity::requirement_completion::Column::ApplicationId.eq(application_id))
            .filter(entity::requirement_completion::Column::RequirementId.is_in(requirement_ids))
            .all(self.conn)
            .await
    }

    /// Seeds the `pending` row created when an application enters the
    /// requirement's stage
    pub async fn insert_pending(
        &self,
        application_id: i32,
        requirement_id: i32,
    ) -> Result<entity::requirement_completion::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let completion = entity::requirement_completion::ActiveModel {
            application_id: ActiveValue::Set(application_id),
            requirement_id: ActiveValue::Set(requirement_id),
            status: ActiveValue::Set("pending".to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        completion.insert(self.conn).await
    }

    pub async fn apply_update(
        &self,
        completion: entity::requirement_completion::Model,
        update: RequirementUpdate<'_>,
    ) -> Result<entity::requirement_completion::Model, DbErr> {
        let mut active = completion.into_active_model();
        active.status = ActiveValue::Set(update.status.to_string());
        active.notes = ActiveValue::Set(update.notes.map(str::to_string));
        active.reference_id = ActiveValue::Set(update.reference_id);
        active.verified_by = ActiveValue::Set(update.verified_by);
        active.completed_at = ActiveValue::Set(update.completed_at);
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        active.update(self.conn).await
    }
}
