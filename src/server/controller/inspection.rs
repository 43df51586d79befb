use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        inspection::{
            CompleteInspectionDto, FindInspectorQuery, InspectionScheduleDto, InspectorDto,
            InspectorLoadDto, NewScheduleDto, UpdateScheduleDto,
        },
    },
    server::{
        error::Error,
        model::app::AppState,
        service::inspection::{InspectionSchedulingService, NewSchedule, UpdateSchedule},
    },
};

pub static INSPECTION_TAG: &str = "inspection";

fn to_dto(model: entity::inspection_schedule::Model) -> Result<InspectionScheduleDto, Error> {
    InspectionScheduleDto::try_from(model).map_err(Error::InvalidStatus)
}

fn to_dtos(
    models: Vec<entity::inspection_schedule::Model>,
) -> Result<Vec<InspectionScheduleDto>, Error> {
    models.into_iter().map(to_dto).collect()
}

/// Find the least-loaded qualified inspector for a date
#[utoipa::path(
    get,
    path = "/api/inspections/available-inspector",
    tag = INSPECTION_TAG,
    params(
        ("date" = String, Query, description = "Requested inspection date (YYYY-MM-DD)"),
        ("district" = Option<String>, Query, description = "Required district"),
        ("inspection_type_id" = Option<i32>, Query, description = "Required inspection type")
    ),
    responses(
        (status = 200, description = "Least-loaded matching inspector", body = InspectorLoadDto),
        (status = 404, description = "No matching inspector", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn find_available_inspector(
    State(state): State<AppState>,
    Query(query): Query<FindInspectorQuery>,
) -> Result<impl IntoResponse, Error> {
    let selected = InspectionSchedulingService::new(&state.db)
        .find_available_inspector(
            query.date,
            query.district.as_deref(),
            query.inspection_type_id,
        )
        .await?;

    match selected {
        Some(load) => {
            let dto = InspectorLoadDto {
                inspector: InspectorDto::from(load.inspector),
                scheduled_count: load.scheduled_count,
            };
            Ok((StatusCode::OK, Json(dto)).into_response())
        }
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(ErrorDto {
                error: "No available inspector matches the requested date and filters"
                    .to_string(),
            }),
        )
            .into_response()),
    }
}

/// Schedule an inspection visit
#[utoipa::path(
    post,
    path = "/api/inspections",
    tag = INSPECTION_TAG,
    request_body = NewScheduleDto,
    responses(
        (status = 201, description = "Schedule created", body = InspectionScheduleDto),
        (status = 400, description = "No stages configured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    Json(body): Json<NewScheduleDto>,
) -> Result<impl IntoResponse, Error> {
    let schedule = InspectionSchedulingService::new(&state.db)
        .create_schedule(NewSchedule {
            application_id: body.application_id,
            inspector_id: body.inspector_id,
            stage_id: body.stage_id,
            scheduled_date: body.scheduled_date,
            scheduled_time: body.scheduled_time,
            notes: body.notes,
            created_by: body.created_by,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(to_dto(schedule)?)).into_response())
}

/// Update a schedule's inspector, slot, status or notes
#[utoipa::path(
    patch,
    path = "/api/inspections/{id}",
    tag = INSPECTION_TAG,
    params(("id" = i32, Path, description = "Schedule ID")),
    request_body = UpdateScheduleDto,
    responses(
        (status = 200, description = "Schedule updated", body = InspectionScheduleDto),
        (status = 404, description = "Schedule not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateScheduleDto>,
) -> Result<impl IntoResponse, Error> {
    let schedule = InspectionSchedulingService::new(&state.db)
        .update_schedule(
            id,
            UpdateSchedule {
                inspector_id: body.inspector_id,
                scheduled_date: body.scheduled_date,
                scheduled_time: body.scheduled_time,
                status: body.status,
                notes: body.notes,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(to_dto(schedule)?)).into_response())
}

/// Mark an inspection conducted.
///
/// Accepts a schedule id (or a legacy stage id, normalized to the underlying
/// schedule). Completion feeds the stage's inspection requirements through
/// the requirement ledger and may advance the application.
#[utoipa::path(
    post,
    path = "/api/inspections/{id}/complete",
    tag = INSPECTION_TAG,
    params(("id" = i32, Path, description = "Schedule ID (or legacy stage ID)")),
    request_body = CompleteInspectionDto,
    responses(
        (status = 200, description = "Inspection completed", body = InspectionScheduleDto),
        (status = 400, description = "Inspection already completed", body = ErrorDto),
        (status = 404, description = "Schedule not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn complete_inspection(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<CompleteInspectionDto>,
) -> Result<impl IntoResponse, Error> {
    let schedule = InspectionSchedulingService::new(&state.db)
        .complete_inspection(id, body.inspector_id, body.comments.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(to_dto(schedule)?)).into_response())
}

/// Delete a schedule
#[utoipa::path(
    delete,
    path = "/api/inspections/{id}",
    tag = INSPECTION_TAG,
    params(("id" = i32, Path, description = "Schedule ID")),
    responses(
        (status = 204, description = "Schedule deleted"),
        (status = 404, description = "Schedule not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    InspectionSchedulingService::new(&state.db)
        .delete_schedule(id)
        .await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// List an application's inspection schedules
#[utoipa::path(
    get,
    path = "/api/applications/{id}/inspections",
    tag = INSPECTION_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Schedules for the application", body = Vec<InspectionScheduleDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_application_inspections(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let schedules = InspectionSchedulingService::new(&state.db)
        .list_by_application(id)
        .await?;

    Ok((StatusCode::OK, Json(to_dtos(schedules)?)).into_response())
}

/// List an inspector's assigned schedules
#[utoipa::path(
    get,
    path = "/api/inspectors/{id}/inspections",
    tag = INSPECTION_TAG,
    params(("id" = i32, Path, description = "Inspector ID")),
    responses(
        (status = 200, description = "Schedules for the inspector", body = Vec<InspectionScheduleDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_inspector_inspections(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let schedules = InspectionSchedulingService::new(&state.db)
        .list_by_inspector(id)
        .await?;

    Ok((StatusCode::OK, Json(to_dtos(schedules)?)).into_response())
}

/// List schedules across every application a user owns
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/inspections",
    tag = INSPECTION_TAG,
    params(("user_id" = i32, Path, description = "Applicant user ID")),
    responses(
        (status = 200, description = "Schedules for the user's applications", body = Vec<InspectionScheduleDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_user_inspections(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let schedules = InspectionSchedulingService::new(&state.db)
        .list_by_user(user_id)
        .await?;

    Ok((StatusCode::OK, Json(to_dtos(schedules)?)).into_response())
}
