use sea_orm::{DatabaseConnection, DbErr};

use crate::server::data::{
    application::{ApplicationRepository, NewApplicationRecord},
    document::{DocumentRepository, NewDocumentRecord},
    inspector::{InspectionTypeRepository, InspectorRepository},
    stage::StageRepository,
};

/// Inserts a stage catalog entry
pub async fn seed_stage(
    db: &DatabaseConnection,
    order_number: i32,
    name: &str,
) -> Result<entity::stage::Model, DbErr> {
    StageRepository::new(db).create(name, None, order_number).await
}

/// Inserts a requirement under a stage
pub async fn seed_requirement(
    db: &DatabaseConnection,
    stage_id: i32,
    requirement_type: &str,
    name: &str,
    is_mandatory: bool,
) -> Result<entity::stage_requirement::Model, DbErr> {
    StageRepository::new(db)
        .create_requirement(stage_id, requirement_type, name, is_mandatory, None)
        .await
}

/// Inserts a pending application without a current stage
pub async fn seed_application(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::application::Model, DbErr> {
    ApplicationRepository::new(db)
        .create(NewApplicationRecord {
            user_id,
            status: "pending",
            stand_number: "1024",
            district: Some("Avondale"),
            construction_type: Some("residential"),
            project_description: None,
            owner_name: "T. Moyo",
        })
        .await
}

/// Inserts an inspector
pub async fn seed_inspector(
    db: &DatabaseConnection,
    name: &str,
    inspection_type: &str,
    district: &str,
    available: bool,
) -> Result<entity::inspector::Model, DbErr> {
    InspectorRepository::new(db)
        .create(name, inspection_type, district, available, None)
        .await
}

/// Inserts an inspection type reference row
pub async fn seed_inspection_type(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entity::inspection_type::Model, DbErr> {
    InspectionTypeRepository::new(db).create(name, None).await
}

/// Inserts a pending document carrying the given extracted text
pub async fn seed_document(
    db: &DatabaseConnection,
    user_id: i32,
    extracted_text: &str,
) -> Result<entity::document::Model, DbErr> {
    DocumentRepository::new(db)
        .insert(NewDocumentRecord {
            user_id,
            application_id: None,
            file_name: "plan.pdf",
            file_type: "application/pdf",
            file_size: 2048,
            storage_key: "documents/plan.pdf",
            extracted_text: Some(extracted_text),
            text_confidence: Some(0.9),
            status: "pending",
        })
        .await
}
