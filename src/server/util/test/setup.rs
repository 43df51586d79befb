use std::time::Duration;

use mockito::{Server, ServerGuard};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Schema};

use crate::server::{
    external::{ocr::OcrClient, reviewer::ReviewerClient},
    model::app::AppState,
    service::compliance::ComplianceConfig,
};

pub struct TestSetup {
    pub server: ServerGuard,
    pub state: AppState,
}

/// Returns an [`AppState`] over an in-memory database, with both external
/// collaborators pointed at a mock server. Tables are not created; tests call
/// the `create_*_tables` helpers they need.
pub async fn test_setup() -> TestSetup {
    let mock_server = Server::new_async().await;
    let mock_server_url = mock_server.url();

    let db = Database::connect("sqlite::memory:").await.unwrap();

    // Tables are derived per-entity in isolation (see DESIGN.md: tests exercise
    // workflow semantics, not cascade DDL), but sqlx enables SQLite foreign-key
    // enforcement by default, which rejects inserts into an entity table whose
    // FK parent table was not created. Disable it so isolated schemas work.
    db.execute_unprepared("PRAGMA foreign_keys = OFF;")
        .await
        .unwrap();

    let ocr = OcrClient::new(&mock_server_url, Duration::from_secs(2))
        .expect("Failed to build OCR client");
    let reviewer = ReviewerClient::new(&mock_server_url, Duration::from_secs(2))
        .expect("Failed to build reviewer client");

    let state = AppState {
        db,
        ocr,
        reviewer,
        compliance: ComplianceConfig::default(),
    };

    TestSetup {
        server: mock_server,
        state,
    }
}

/// Creates the stage catalog and workflow tracking tables
pub async fn create_workflow_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let schema = Schema::new(DbBackend::Sqlite);

    let stmts = vec![
        schema.create_table_from_entity(entity::prelude::Stage),
        schema.create_table_from_entity(entity::prelude::StageRequirement),
        schema.create_table_from_entity(entity::prelude::Application),
        schema.create_table_from_entity(entity::prelude::ApplicationProgress),
        schema.create_table_from_entity(entity::prelude::RequirementCompletion),
    ];

    for stmt in stmts {
        db.execute(&stmt).await?;
    }

    Ok(())
}

/// Creates the inspector and schedule tables
pub async fn create_inspection_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let schema = Schema::new(DbBackend::Sqlite);

    let stmts = vec![
        schema.create_table_from_entity(entity::prelude::InspectionType),
        schema.create_table_from_entity(entity::prelude::Inspector),
        schema.create_table_from_entity(entity::prelude::InspectionSchedule),
    ];

    for stmt in stmts {
        db.execute(&stmt).await?;
    }

    Ok(())
}

/// Creates the document table
pub async fn create_document_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let schema = Schema::new(DbBackend::Sqlite);

    let stmt = schema.create_table_from_entity(entity::prelude::Document);
    db.execute(&stmt).await?;

    Ok(())
}
