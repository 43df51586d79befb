use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::status::ScheduleStatus;

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct InspectorDto {
    pub id: i32,
    pub name: String,
    pub inspection_type: String,
    pub assigned_district: String,
    pub available: bool,
    pub work_id: Option<String>,
}

/// An inspector paired with their assignment count for a requested date.
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct InspectorLoadDto {
    #[serde(flatten)]
    pub inspector: InspectorDto,
    pub scheduled_count: u64,
}

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct InspectionScheduleDto {
    pub id: i32,
    pub application_id: i32,
    pub inspector_id: i32,
    pub stage_id: i32,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub status: ScheduleStatus,
    pub notes: Option<String>,
    pub created_by: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct NewScheduleDto {
    pub application_id: i32,
    pub inspector_id: i32,
    /// Omitted: the next unscheduled stage for the application is inferred.
    pub stage_id: Option<i32>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub notes: Option<String>,
    pub created_by: Option<i32>,
}

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateScheduleDto {
    pub inspector_id: Option<i32>,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<NaiveTime>,
    pub status: Option<ScheduleStatus>,
    pub notes: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct CompleteInspectionDto {
    pub inspector_id: i32,
    pub comments: Option<String>,
}

/// Query parameters for inspector selection.
#[derive(Clone, Deserialize, ToSchema)]
pub struct FindInspectorQuery {
    pub date: NaiveDate,
    pub district: Option<String>,
    pub inspection_type_id: Option<i32>,
}

impl From<entity::inspector::Model> for InspectorDto {
    fn from(model: entity::inspector::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            inspection_type: model.inspection_type,
            assigned_district: model.assigned_district,
            available: model.available,
            work_id: model.work_id,
        }
    }
}

impl TryFrom<entity::inspection_schedule::Model> for InspectionScheduleDto {
    type Error = String;

    fn try_from(model: entity::inspection_schedule::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            application_id: model.application_id,
            inspector_id: model.inspector_id,
            stage_id: model.stage_id,
            scheduled_date: model.scheduled_date,
            scheduled_time: model.scheduled_time,
            status: model.status.parse()?,
            notes: model.notes,
            created_by: model.created_by,
            created_at: model.created_at,
        })
    }
}
