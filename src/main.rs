use lintel::server::{config::Config, model::app::AppState, router, startup};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let db = startup::connect_to_database(&config).await.unwrap();
    let ocr = startup::build_ocr_client(&config).unwrap();
    let reviewer = startup::build_reviewer_client(&config).unwrap();

    let state = AppState {
        db,
        ocr,
        reviewer,
        compliance: config.compliance.clone(),
    };

    tracing::info!("Starting server on {}", config.listen_addr);

    let router = router::routes().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("Failed to bind listen address");

    axum::serve(listener, router)
        .await
        .expect("Server exited with an error");
}
