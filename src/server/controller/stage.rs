use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        stage::{CurrentStageDto, RequirementCompletionDto, StageDto, StageProgressDto},
    },
    server::{
        data::{
            progress::ProgressRepository, requirement::RequirementCompletionRepository,
            stage::StageRepository,
        },
        error::Error,
        model::app::AppState,
        service::application::ApplicationLifecycleService,
    },
};

pub static STAGE_TAG: &str = "stage";

#[derive(Deserialize)]
pub struct RequirementFilter {
    pub stage_id: Option<i32>,
}

/// List the stage catalog in workflow order
#[utoipa::path(
    get,
    path = "/api/stages",
    tag = STAGE_TAG,
    responses(
        (status = 200, description = "All stages in order", body = Vec<StageDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_stages(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let stages = StageRepository::new(&state.db).get_all_ordered().await?;

    let dtos: Vec<StageDto> = stages.into_iter().map(StageDto::from).collect();

    Ok((StatusCode::OK, Json(dtos)).into_response())
}

/// List an application's progress through the stages it has entered
#[utoipa::path(
    get,
    path = "/api/applications/{id}/progress",
    tag = STAGE_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Progress rows in stage order", body = Vec<StageProgressDto>),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_application_progress(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    // Surfaces NotFound for unknown applications before reading progress.
    ApplicationLifecycleService::new(&state.db)
        .get_application(id)
        .await?;

    let stages = StageRepository::new(&state.db).get_all_ordered().await?;
    let progress = ProgressRepository::new(&state.db)
        .find_by_application(id)
        .await?;

    let by_stage: HashMap<i32, entity::application_progress::Model> =
        progress.into_iter().map(|p| (p.stage_id, p)).collect();

    let mut dtos = Vec::new();
    for stage in stages {
        if let Some(row) = by_stage.get(&stage.id) {
            dtos.push(StageProgressDto {
                stage_id: stage.id,
                stage_name: stage.name.clone(),
                order_number: stage.order_number,
                status: row.status.parse().map_err(Error::InvalidStatus)?,
                started_at: row.started_at,
                completed_at: row.completed_at,
                notes: row.notes.clone(),
                completed_by: row.completed_by,
            });
        }
    }

    Ok((StatusCode::OK, Json(dtos)).into_response())
}

/// Get the application's current stage with its progress state
#[utoipa::path(
    get,
    path = "/api/applications/{id}/current-stage",
    tag = STAGE_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Current stage", body = CurrentStageDto),
        (status = 400, description = "Application has no current stage", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_current_stage(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let application = ApplicationLifecycleService::new(&state.db)
        .get_application(id)
        .await?;

    let stage_id = application
        .current_stage_id
        .ok_or(Error::NoCurrentStage(id))?;

    let stage = StageRepository::new(&state.db)
        .get_by_id(stage_id)
        .await?
        .ok_or(Error::StageNotFound(stage_id))?;

    let progress = ProgressRepository::new(&state.db)
        .find_pair(id, stage_id)
        .await?;

    let dto = CurrentStageDto {
        stage: StageDto::from(stage),
        progress_status: match &progress {
            Some(row) => Some(row.status.parse().map_err(Error::InvalidStatus)?),
            None => None,
        },
        started_at: progress.as_ref().map(|row| row.started_at),
        completed_at: progress.as_ref().and_then(|row| row.completed_at),
    };

    Ok((StatusCode::OK, Json(dto)).into_response())
}

/// List an application's requirement completion rows, optionally narrowed to
/// one stage
#[utoipa::path(
    get,
    path = "/api/applications/{id}/requirements",
    tag = STAGE_TAG,
    params(
        ("id" = i32, Path, description = "Application ID"),
        ("stage_id" = Option<i32>, Query, description = "Limit to one stage")
    ),
    responses(
        (status = 200, description = "Requirement completion rows", body = Vec<RequirementCompletionDto>),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_requirement_completion(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(filter): Query<RequirementFilter>,
) -> Result<impl IntoResponse, Error> {
    ApplicationLifecycleService::new(&state.db)
        .get_application(id)
        .await?;

    let stage_repo = StageRepository::new(&state.db);

    let stages = stage_repo.get_all_ordered().await?;
    let completions = RequirementCompletionRepository::new(&state.db)
        .find_by_application(id)
        .await?;

    let mut requirements: HashMap<i32, entity::stage_requirement::Model> = HashMap::new();
    for stage in &stages {
        for requirement in stage_repo.requirements_for_stage(stage.id).await? {
            requirements.insert(requirement.id, requirement);
        }
    }

    let stages_by_id: HashMap<i32, &entity::stage::Model> =
        stages.iter().map(|s| (s.id, s)).collect();

    let mut dtos = Vec::new();
    for completion in completions {
        let Some(requirement) = requirements.get(&completion.requirement_id) else {
            continue;
        };

        if let Some(stage_id) = filter.stage_id {
            if requirement.stage_id != stage_id {
                continue;
            }
        }

        let Some(stage) = stages_by_id.get(&requirement.stage_id) else {
            continue;
        };

        dtos.push(RequirementCompletionDto {
            requirement_id: requirement.id,
            requirement_name: requirement.requirement_name.clone(),
            requirement_type: requirement.requirement_type.clone(),
            is_mandatory: requirement.is_mandatory,
            stage_id: stage.id,
            stage_name: stage.name.clone(),
            order_number: stage.order_number,
            status: completion.status.parse().map_err(Error::InvalidStatus)?,
            completed_at: completion.completed_at,
            verified_by: completion.verified_by,
            reference_id: completion.reference_id,
            notes: completion.notes,
        });
    }

    dtos.sort_by_key(|dto| (dto.order_number, dto.requirement_id));

    Ok((StatusCode::OK, Json(dtos)).into_response())
}
