use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        application::{
            ApplicationDto, ApplicationOverviewDto, NewApplicationDto, UpdateApplicationStatusDto,
        },
        stage::AdvanceStageDto,
    },
    server::{
        error::Error,
        model::app::AppState,
        service::{
            application::{ApplicationLifecycleService, NewApplication},
            workflow::progression::StageProgressionService,
        },
    },
};

pub static APPLICATION_TAG: &str = "application";

fn to_dto(model: entity::application::Model) -> Result<ApplicationDto, Error> {
    ApplicationDto::try_from(model).map_err(Error::InvalidStatus)
}

/// Create a permit application; submitted applications enter the first stage
#[utoipa::path(
    post,
    path = "/api/applications",
    tag = APPLICATION_TAG,
    request_body = NewApplicationDto,
    responses(
        (status = 201, description = "Application created", body = ApplicationDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_application(
    State(state): State<AppState>,
    Json(body): Json<NewApplicationDto>,
) -> Result<impl IntoResponse, Error> {
    let lifecycle = ApplicationLifecycleService::new(&state.db);

    let application = lifecycle
        .create_application(NewApplication {
            user_id: body.user_id,
            stand_number: body.stand_number,
            district: body.district,
            construction_type: body.construction_type,
            project_description: body.project_description,
            owner_name: body.owner_name,
            submit: body.submit,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(to_dto(application)?)).into_response())
}

/// Get one application
#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    tag = APPLICATION_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application found", body = ApplicationDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let application = ApplicationLifecycleService::new(&state.db)
        .get_application(id)
        .await?;

    Ok((StatusCode::OK, Json(to_dto(application)?)).into_response())
}

/// List a user's applications with stage and requirement progress
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/applications",
    tag = APPLICATION_TAG,
    params(("user_id" = i32, Path, description = "Applicant user ID")),
    responses(
        (status = 200, description = "Applications for the user", body = Vec<ApplicationOverviewDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_user_applications(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let overviews = ApplicationLifecycleService::new(&state.db)
        .list_by_user(user_id)
        .await?;

    let mut dtos = Vec::with_capacity(overviews.len());
    for overview in overviews {
        dtos.push(ApplicationOverviewDto {
            application: to_dto(overview.application)?,
            current_stage_name: overview.current_stage.as_ref().map(|s| s.name.clone()),
            current_stage_order: overview.current_stage.as_ref().map(|s| s.order_number),
            completed_requirements: overview.completed_requirements,
            total_requirements: overview.total_requirements,
        });
    }

    Ok((StatusCode::OK, Json(dtos)).into_response())
}

/// Update an application's status
#[utoipa::path(
    patch,
    path = "/api/applications/{id}/status",
    tag = APPLICATION_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    request_body = UpdateApplicationStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApplicationDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_application_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateApplicationStatusDto>,
) -> Result<impl IntoResponse, Error> {
    let application = ApplicationLifecycleService::new(&state.db)
        .update_status(id, body.status)
        .await?;

    Ok((StatusCode::OK, Json(to_dto(application)?)).into_response())
}

/// Delete an application and its workflow rows
#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    tag = APPLICATION_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    ApplicationLifecycleService::new(&state.db)
        .delete_application(id)
        .await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Administrative override: force the current stage closed and advance.
/// Routed behind the administrative gateway; the caller's identity is
/// recorded on the forced completion.
#[utoipa::path(
    post,
    path = "/api/applications/{id}/advance-stage",
    tag = APPLICATION_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    request_body = AdvanceStageDto,
    responses(
        (status = 200, description = "Stage advanced", body = ApplicationDto),
        (status = 400, description = "Application has no current stage", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn advance_stage(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<AdvanceStageDto>,
) -> Result<impl IntoResponse, Error> {
    StageProgressionService::new(&state.db)
        .advance_stage_manually(id, body.completed_by, body.notes.as_deref())
        .await?;

    let application = ApplicationLifecycleService::new(&state.db)
        .get_application(id)
        .await?;

    Ok((StatusCode::OK, Json(to_dto(application)?)).into_response())
}
