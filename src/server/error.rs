use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{debug, error};

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Application ID {0} not found")]
    ApplicationNotFound(i32),
    #[error("Stage ID {0} not found")]
    StageNotFound(i32),
    #[error("No requirement completion exists for application ID {application_id} and requirement ID {requirement_id}")]
    RequirementNotFound {
        application_id: i32,
        requirement_id: i32,
    },
    #[error("Inspection schedule ID {0} not found")]
    ScheduleNotFound(i32),
    #[error("Inspection schedule ID {0} is already marked as completed")]
    InspectionAlreadyCompleted(i32),
    #[error("Inspection type ID {0} not found")]
    InspectionTypeNotFound(i32),
    #[error("Inspector ID {0} not found")]
    InspectorNotFound(i32),
    #[error("Document ID {0} not found")]
    DocumentNotFound(i32),
    #[error("Application ID {0} has no current stage")]
    NoCurrentStage(i32),
    #[error("No workflow stages are configured")]
    NoStagesConfigured,
    #[error("Invalid status value: {0:?}")]
    InvalidStatus(String),
    #[error("Invalid base64 payload: {0}")]
    InvalidPayload(String),
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for environment variable {var}: {reason}")]
    InvalidEnvValue { var: String, reason: String },
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    #[error(transparent)]
    HttpClient(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Validation errors are returned synchronously without any mutation
    /// having occurred; everything else indicates a failed (and rolled back)
    /// operation.
    fn status_code(&self) -> StatusCode {
        match self {
            Error::ApplicationNotFound(_)
            | Error::StageNotFound(_)
            | Error::RequirementNotFound { .. }
            | Error::ScheduleNotFound(_)
            | Error::InspectionTypeNotFound(_)
            | Error::InspectorNotFound(_)
            | Error::DocumentNotFound(_) => StatusCode::NOT_FOUND,
            Error::InspectionAlreadyCompleted(_)
            | Error::NoCurrentStage(_)
            | Error::NoStagesConfigured
            | Error::InvalidStatus(_)
            | Error::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Internal server error: {}", self);

            return (
                status,
                Json(ErrorDto {
                    error: "Internal server error".to_string(),
                }),
            )
                .into_response();
        }

        debug!("Request error: {}", self);

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
