use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    model::{api::ErrorDto, stage::UpdateRequirementDto, status::RequirementStatus},
    server::{
        error::Error,
        model::app::AppState,
        service::workflow::{
            ledger::{RequirementLedgerService, UpdateRequirement},
            progression::AdvanceOutcome,
        },
    },
};

pub static REQUIREMENT_TAG: &str = "requirement";

/// The ledger write plus what it did to the stage machine.
#[derive(Serialize, ToSchema)]
pub struct RequirementUpdateResultDto {
    pub requirement_id: i32,
    pub status: RequirementStatus,
    pub stage_advanced: bool,
    pub application_completed: bool,
}

/// Update one requirement's completion status.
///
/// The update and any resulting stage advancement commit atomically: the
/// stage either stays as it is or the application moves forward.
#[utoipa::path(
    patch,
    path = "/api/applications/{id}/requirements/{requirement_id}",
    tag = REQUIREMENT_TAG,
    params(
        ("id" = i32, Path, description = "Application ID"),
        ("requirement_id" = i32, Path, description = "Stage requirement ID")
    ),
    request_body = UpdateRequirementDto,
    responses(
        (status = 200, description = "Requirement updated", body = RequirementUpdateResultDto),
        (status = 404, description = "No completion row for the pair", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_requirement_status(
    State(state): State<AppState>,
    Path((id, requirement_id)): Path<(i32, i32)>,
    Json(body): Json<UpdateRequirementDto>,
) -> Result<impl IntoResponse, Error> {
    let ledger = RequirementLedgerService::new(&state.db);

    let (updated, outcome) = ledger
        .update_requirement_status(UpdateRequirement {
            application_id: id,
            requirement_id,
            status: body.status,
            notes: body.notes,
            reference_id: body.reference_id,
            verified_by: body.verified_by,
        })
        .await?;

    let dto = RequirementUpdateResultDto {
        requirement_id: updated.requirement_id,
        status: updated.status.parse().map_err(Error::InvalidStatus)?,
        stage_advanced: matches!(outcome, AdvanceOutcome::Advanced { .. }),
        application_completed: outcome == AdvanceOutcome::ApplicationCompleted,
    };

    Ok((StatusCode::OK, Json(dto)).into_response())
}
