use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{api::ErrorDto, inspection::InspectorDto},
    server::{data::inspector::InspectorRepository, error::Error, model::app::AppState},
};

pub static INSPECTOR_TAG: &str = "inspector";

/// List all inspectors
#[utoipa::path(
    get,
    path = "/api/inspectors",
    tag = INSPECTOR_TAG,
    responses(
        (status = 200, description = "All inspectors", body = Vec<InspectorDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_inspectors(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let inspectors = InspectorRepository::new(&state.db).get_all().await?;

    let dtos: Vec<InspectorDto> = inspectors.into_iter().map(InspectorDto::from).collect();

    Ok((StatusCode::OK, Json(dtos)).into_response())
}

/// Get one inspector
#[utoipa::path(
    get,
    path = "/api/inspectors/{id}",
    tag = INSPECTOR_TAG,
    params(("id" = i32, Path, description = "Inspector ID")),
    responses(
        (status = 200, description = "Inspector found", body = InspectorDto),
        (status = 404, description = "Inspector not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_inspector(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let inspector = InspectorRepository::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or(Error::InspectorNotFound(id))?;

    Ok((StatusCode::OK, Json(InspectorDto::from(inspector))).into_response())
}
