use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::status::ApplicationStatus;

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationDto {
    pub id: i32,
    pub user_id: i32,
    pub status: ApplicationStatus,
    pub current_stage_id: Option<i32>,
    pub stand_number: String,
    pub district: Option<String>,
    pub construction_type: Option<String>,
    pub project_description: Option<String>,
    pub owner_name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload for creating a permit application. Applications created as
/// `submitted` are immediately placed in the first workflow stage.
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct NewApplicationDto {
    pub user_id: i32,
    pub stand_number: String,
    pub district: Option<String>,
    pub construction_type: Option<String>,
    pub project_description: Option<String>,
    pub owner_name: String,
    #[serde(default)]
    pub submit: bool,
}

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateApplicationStatusDto {
    pub status: ApplicationStatus,
}

/// One row of an applicant's dashboard: the application plus its position in
/// the workflow and requirement progress for the current stage.
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationOverviewDto {
    #[serde(flatten)]
    pub application: ApplicationDto,
    pub current_stage_name: Option<String>,
    pub current_stage_order: Option<i32>,
    pub completed_requirements: u64,
    pub total_requirements: u64,
}

impl TryFrom<entity::application::Model> for ApplicationDto {
    type Error = String;

    fn try_from(model: entity::application::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            status: model.status.parse()?,
            current_stage_id: model.current_stage_id,
            stand_number: model.stand_number,
            district: model.district,
            construction_type: model.construction_type,
            project_description: model.project_description,
            owner_name: model.owner_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
