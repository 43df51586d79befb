use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

/// Column values for a new document row. Extraction results are written at
/// creation time; the raw bytes stay in the external blob store.
pub struct NewDocumentRecord<'a> {
    pub user_id: i32,
    pub application_id: Option<i32>,
    pub file_name: &'a str,
    pub file_type: &'a str,
    pub file_size: i64,
    pub storage_key: &'a str,
    pub extracted_text: Option<&'a str>,
    pub text_confidence: Option<f64>,
    pub status: &'a str,
}

pub struct DocumentRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> DocumentRepository<'a, C> {
    /// Creates a new instance of [`DocumentRepository`]
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn insert(
        &self,
        record: NewDocumentRecord<'_>,
    ) -> Result<entity::document::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let document = entity::document::ActiveModel {
            user_id: ActiveValue::Set(record.user_id),
            application_id: ActiveValue::Set(record.application_id),
            file_name: ActiveValue::Set(record.file_name.to_string()),
            file_type: ActiveValue::Set(record.file_type.to_string()),
            file_size: ActiveValue::Set(record.file_size),
            storage_key: ActiveValue::Set(record.storage_key.to_string()),
            extracted_text: ActiveValue::Set(record.extracted_text.map(str::to_string)),
            text_confidence: ActiveValue::Set(record.text_confidence),
            status: ActiveValue::Set(record.status.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        document.insert(self.conn).await
    }

    pub async fn find_by_id(
        &self,
        document_id: i32,
    ) -> Result<Option<entity::document::Model>, DbErr> {
        entity::prelude::Document::find_by_id(document_id)
            .one(self.conn)
            .await
    }

    pub async fn list_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<entity::document::Model>, DbErr> {
        entity::prelude::Document::find()
            .filter(entity::document::Column::UserId.eq(user_id))
            .order_by_desc(entity::document::Column::CreatedAt)
            .all(self.conn)
            .await
    }

    pub async fn update_status(
        &self,
        document: entity::document::Model,
        status: &str,
        rejection_reason: Option<&str>,
    ) -> Result<entity::document::Model, DbErr> {
        let mut active = document.into_active_model();
        active.status = ActiveValue::Set(status.to_string());
        active.rejection_reason = ActiveValue::Set(rejection_reason.map(str::to_string));
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        active.update(self.conn).await
    }

    /// Overwrites the document's compliance result; history is not kept
    pub async fn set_compliance_result(
        &self,
        document: entity::document::Model,
        result: serde_json::Value,
        status: &str,
    ) -> Result<entity::document::Model, DbErr> {
        let mut active = document.into_active_model();
        active.compliance_result = ActiveValue::Set(Some(result));
        active.status = ActiveValue::Set(status.to_string());
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        active.update(self.conn).await
    }
}
