use std::time::Duration;

use crate::server::{
    config::Config,
    error::Error,
    external::{ocr::OcrClient, reviewer::ReviewerClient},
};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Build the OCR text-extraction client
pub fn build_ocr_client(config: &Config) -> Result<OcrClient, Error> {
    let client = OcrClient::new(
        &config.ocr_service_url,
        Duration::from_secs(config.external_timeout_secs),
    )?;

    Ok(client)
}

/// Build the semantic compliance reviewer client
pub fn build_reviewer_client(config: &Config) -> Result<ReviewerClient, Error> {
    let client = ReviewerClient::new(
        &config.reviewer_service_url,
        Duration::from_secs(config.external_timeout_secs),
    )?;

    Ok(client)
}
