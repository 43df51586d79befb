use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::status::{ProgressStatus, RequirementStatus};

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct StageDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub order_number: i32,
}

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct StageProgressDto {
    pub stage_id: i32,
    pub stage_name: String,
    pub order_number: i32,
    pub status: ProgressStatus,
    pub started_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
    pub notes: Option<String>,
    pub completed_by: Option<i32>,
}

/// The application's current stage joined with its progress row, if entered.
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentStageDto {
    pub stage: StageDto,
    pub progress_status: Option<ProgressStatus>,
    pub started_at: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
}

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct RequirementCompletionDto {
    pub requirement_id: i32,
    pub requirement_name: String,
    pub requirement_type: String,
    pub is_mandatory: bool,
    pub stage_id: i32,
    pub stage_name: String,
    pub order_number: i32,
    pub status: RequirementStatus,
    pub completed_at: Option<NaiveDateTime>,
    pub verified_by: Option<i32>,
    pub reference_id: Option<i32>,
    pub notes: Option<String>,
}

/// Payload for the requirement ledger's single write operation.
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateRequirementDto {
    pub status: RequirementStatus,
    pub notes: Option<String>,
    pub reference_id: Option<i32>,
    pub verified_by: Option<i32>,
}

/// Payload for the administrative stage override.
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct AdvanceStageDto {
    pub completed_by: Option<i32>,
    pub notes: Option<String>,
}

impl From<entity::stage::Model> for StageDto {
    fn from(model: entity::stage::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            order_number: model.order_number,
        }
    }
}
