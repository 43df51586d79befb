use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::status::DocumentStatus;

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentDto {
    pub id: i32,
    pub user_id: i32,
    pub application_id: Option<i32>,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub storage_key: String,
    pub status: DocumentStatus,
    pub text_confidence: Option<f64>,
    pub compliance_result: Option<serde_json::Value>,
    pub rejection_reason: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Upload payload. Raw bytes are base64-encoded; the blob itself is persisted
/// by the external file store under `storage_key` before this call.
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct NewDocumentDto {
    pub user_id: i32,
    pub application_id: Option<i32>,
    pub file_name: String,
    pub file_type: String,
    pub storage_key: String,
    pub data: String,
}

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateDocumentStatusDto {
    pub status: DocumentStatus,
    pub rejection_reason: Option<String>,
}

impl TryFrom<entity::document::Model> for DocumentDto {
    type Error = String;

    fn try_from(model: entity::document::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            application_id: model.application_id,
            file_name: model.file_name,
            file_type: model.file_type,
            file_size: model.file_size,
            storage_key: model.storage_key,
            status: model.status.parse()?,
            text_confidence: model.text_confidence,
            compliance_result: model.compliance_result,
            rejection_reason: model.rejection_reason,
            created_at: model.created_at,
        })
    }
}
