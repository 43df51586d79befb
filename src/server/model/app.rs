use sea_orm::DatabaseConnection;

use crate::server::{
    external::{ocr::OcrClient, reviewer::ReviewerClient},
    service::compliance::ComplianceConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub ocr: OcrClient,
    pub reviewer: ReviewerClient,
    pub compliance: ComplianceConfig,
}
