//! An uploaded plan document, its extracted text and the latest structured
//! compliance result. Raw bytes live in the external blob store; only the
//! `storage_key` reference is kept here. A new compliance run overwrites the
//! previous result.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "document")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub application_id: Option<i32>,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    /// Reference into the external blob store.
    pub storage_key: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub extracted_text: Option<String>,
    pub text_confidence: Option<f64>,
    /// `pending`, `approved` or `rejected`.
    pub status: String,
    pub compliance_result: Option<Json>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::application::Entity",
        from = "Column::ApplicationId",
        to = "super::application::Column::Id"
    )]
    Application,
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
