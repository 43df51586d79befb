use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    QueryFilter, QueryOrder,
};

/// Column values for a new inspection schedule row.
pub struct NewScheduleRecord<'a> {
    pub application_id: i32,
    pub inspector_id: i32,
    pub stage_id: i32,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub status: &'a str,
    pub notes: Option<&'a str>,
    pub created_by: Option<i32>,
}

pub struct InspectionScheduleRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> InspectionScheduleRepository<'a, C> {
    /// Creates a new instance of [`InspectionScheduleRepository`]
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn insert(
        &self,
        record: NewScheduleRecord<'_>,
    ) -> Result<entity::inspection_schedule::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let schedule = entity::inspection_schedule::ActiveModel {
            application_id: ActiveValue::Set(record.application_id),
            inspector_id: ActiveValue::Set(record.inspector_id),
            stage_id: ActiveValue::Set(record.stage_id),
            scheduled_date: ActiveValue::Set(record.scheduled_date),
            scheduled_time: ActiveValue::Set(record.scheduled_time),
            status: ActiveValue::Set(record.status.to_string()),
            notes: ActiveValue::Set(record.notes.map(str::to_string)),
            created_by: ActiveValue::Set(record.created_by),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        schedule.insert(self.conn).await
    }

    pub async fn find_by_id(
        &self,
        schedule_id: i32,
    ) -> Result<Option<entity::inspection_schedule::Model>, DbErr> {
        entity::prelude::InspectionSchedule::find_by_id(schedule_id)
            .one(self.conn)
            .await
    }

    /// Returns the most recent schedule row created against a stage. Older
    /// clients address completions by stage id; this is the normalization
    /// lookup.
    pub async fn latest_for_stage(
        &self,
        stage_id: i32,
    ) -> Result<Option<entity::inspection_schedule::Model>, DbErr> {
        entity::prelude::InspectionSchedule::find()
            .filter(entity::inspection_schedule::Column::StageId.eq(stage_id))
            .order_by_desc(entity::inspection_schedule::Column::CreatedAt)
            .order_by_desc(entity::inspection_schedule::Column::Id)
            .one(self.conn)
            .await
    }

    /// Returns all non-cancelled schedules on a date, the input to
    /// least-loaded inspector selection
    pub async fn active_on_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<entity::inspection_schedule::Model>, DbErr> {
        entity::prelude::InspectionSchedule::find()
            .filter(entity::inspection_schedule::Column::ScheduledDate.eq(date))
            .filter(entity::inspection_schedule::Column::Status.ne("cancelled"))
            .all(self.conn)
            .await
    }

    /// Returns the stage ids an application already has a `scheduled` or
    /// `completed` visit for
    pub async fn occupied_stage_ids(&self, application_id: i32) -> Result<Vec<i32>, DbErr> {
        let schedules = entity::prelude::InspectionSchedule::find()
            .filter(entity::inspection_schedule::Column::ApplicationId.eq(application_id))
            .filter(
                entity::inspection_schedule::Column::Status.is_in(["scheduled", "completed"]),
            )
            .all(self.conn)
            .await?;

        Ok(schedules.into_iter().map(|s| s.stage_id).collect())
    }

    pub async fn list_by_application(
        &self,
        application_id: i32,
    ) -> Result<Vec<entity::inspection_schedule::Model>, DbErr> {
        entity::prelude::InspectionSchedule::find()
            .filter(entity::inspection_schedule::Column::ApplicationId.eq(application_id))
            .order_by_desc(entity::inspection_schedule::Column::ScheduledDate)
            .order_by_desc(entity::inspection_schedule::Column::ScheduledTime)
            .all(self.conn)
            .await
    }

    pub async fn list_by_inspector(
        &self,
        inspector_id: i32,
    ) -> Result<Vec<entity::inspection_schedule::Model>, DbErr> {
        entity::prelude::InspectionSchedule::find()
            .filter(entity::inspection_schedule::Column::InspectorId.eq(inspector_id))
            .order_by_desc(entity::inspection_schedule::Column::ScheduledDate)
            .order_by_desc(entity::inspection_schedule::Column::ScheduledTime)
            .all(self.conn)
            .await
    }

    pub async fn list_by_applications(
        &self,
        application_ids: Vec<i32>,
    ) -> Result<Vec<entity::inspection_schedule::Model>, DbErr> {
        entity::prelude::InspectionSchedule::find()
            .filter(entity::inspection_schedule::Column::ApplicationId.is_in(application_ids))
            .order_by_desc(entity::inspection_schedule::Column::ScheduledDate)
            .order_by_desc(entity::inspection_schedule::Column::ScheduledTime)
            .all(self.conn)
            .await
    }

    /// Deletes a schedule; check [`DeleteResult::rows_affected`] for whether
    /// a row existed
    pub async fn delete(&self, schedule_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::InspectionSchedule::delete_by_id(schedule_id)
            .exec(self.conn)
            .await
    }
}
