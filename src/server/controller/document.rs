use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::{
    model::{
        api::ErrorDto,
        compliance::ComplianceReport,
        document::{DocumentDto, NewDocumentDto, UpdateDocumentStatusDto},
    },
    server::{
        error::Error,
        model::app::AppState,
        service::{
            compliance::ComplianceScorer,
            document::{DocumentService, NewDocument},
        },
    },
};

pub static DOCUMENT_TAG: &str = "document";

fn to_dto(model: entity::document::Model) -> Result<DocumentDto, Error> {
    DocumentDto::try_from(model).map_err(Error::InvalidStatus)
}

/// Register an uploaded document and extract its text
#[utoipa::path(
    post,
    path = "/api/documents",
    tag = DOCUMENT_TAG,
    request_body = NewDocumentDto,
    responses(
        (status = 201, description = "Document created", body = DocumentDto),
        (status = 400, description = "Invalid upload payload", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_document(
    State(state): State<AppState>,
    Json(body): Json<NewDocumentDto>,
) -> Result<impl IntoResponse, Error> {
    let data = STANDARD
        .decode(&body.data)
        .map_err(|e| Error::InvalidPayload(e.to_string()))?;

    let document = DocumentService::new(&state.db, &state.ocr)
        .create_document(NewDocument {
            user_id: body.user_id,
            application_id: body.application_id,
            file_name: body.file_name,
            file_type: body.file_type,
            storage_key: body.storage_key,
            data,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(to_dto(document)?)).into_response())
}

/// Get one document
#[utoipa::path(
    get,
    path = "/api/documents/{id}",
    tag = DOCUMENT_TAG,
    params(("id" = i32, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document found", body = DocumentDto),
        (status = 404, description = "Document not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let document = DocumentService::new(&state.db, &state.ocr)
        .get_document(id)
        .await?;

    Ok((StatusCode::OK, Json(to_dto(document)?)).into_response())
}

/// List a user's documents
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/documents",
    tag = DOCUMENT_TAG,
    params(("user_id" = i32, Path, description = "Owner user ID")),
    responses(
        (status = 200, description = "Documents for the user", body = Vec<DocumentDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_user_documents(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let documents = DocumentService::new(&state.db, &state.ocr)
        .list_by_user(user_id)
        .await?;

    let dtos: Result<Vec<DocumentDto>, Error> = documents.into_iter().map(to_dto).collect();

    Ok((StatusCode::OK, Json(dtos?)).into_response())
}

/// Run a compliance check over a document's extracted text
#[utoipa::path(
    post,
    path = "/api/documents/{id}/check-compliance",
    tag = DOCUMENT_TAG,
    params(("id" = i32, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Compliance result", body = ComplianceReport),
        (status = 404, description = "Document not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_compliance(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let report = ComplianceScorer::new(&state.db, &state.reviewer, state.compliance.clone())
        .check_document(id)
        .await?;

    Ok((StatusCode::OK, Json(report)).into_response())
}

/// Manual review decision on a document
#[utoipa::path(
    patch,
    path = "/api/documents/{id}/status",
    tag = DOCUMENT_TAG,
    params(("id" = i32, Path, description = "Document ID")),
    request_body = UpdateDocumentStatusDto,
    responses(
        (status = 200, description = "Status updated", body = DocumentDto),
        (status = 404, description = "Document not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_document_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateDocumentStatusDto>,
) -> Result<impl IntoResponse, Error> {
    let document = DocumentService::new(&state.db, &state.ocr)
        .update_status(id, body.status, body.rejection_reason.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(to_dto(document)?)).into_response())
}
