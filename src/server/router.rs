//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their utoipa specifications,
//! collected into one OpenAPI document, with Swagger UI served at
//! `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI
/// documentation.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Lintel", description = "Construction permit workflow API"), tags(
        (name = controller::application::APPLICATION_TAG, description = "Permit application lifecycle"),
        (name = controller::stage::STAGE_TAG, description = "Workflow stages and progress"),
        (name = controller::requirement::REQUIREMENT_TAG, description = "Stage requirement ledger"),
        (name = controller::inspection::INSPECTION_TAG, description = "Inspection scheduling"),
        (name = controller::inspector::INSPECTOR_TAG, description = "Inspector reference data"),
        (name = controller::document::DOCUMENT_TAG, description = "Plan documents and compliance"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::application::create_application))
        .routes(routes!(controller::application::get_application))
        .routes(routes!(controller::application::list_user_applications))
        .routes(routes!(controller::application::update_application_status))
        .routes(routes!(controller::application::delete_application))
        .routes(routes!(controller::application::advance_stage))
        .routes(routes!(controller::stage::get_all_stages))
        .routes(routes!(controller::stage::get_application_progress))
        .routes(routes!(controller::stage::get_current_stage))
        .routes(routes!(controller::stage::get_requirement_completion))
        .routes(routes!(controller::requirement::update_requirement_status))
        .routes(routes!(controller::inspection::find_available_inspector))
        .routes(routes!(controller::inspection::create_schedule))
        .routes(routes!(controller::inspection::update_schedule))
        .routes(routes!(controller::inspection::complete_inspection))
        .routes(routes!(controller::inspection::delete_schedule))
        .routes(routes!(controller::inspection::list_application_inspections))
        .routes(routes!(controller::inspection::list_inspector_inspections))
        .routes(routes!(controller::inspection::list_user_inspections))
        .routes(routes!(controller::inspector::get_inspectors))
        .routes(routes!(controller::inspector::get_inspector))
        .routes(routes!(controller::document::create_document))
        .routes(routes!(controller::document::get_document))
        .routes(routes!(controller::document::list_user_documents))
        .routes(routes!(controller::document::check_compliance))
        .routes(routes!(controller::document::update_document_status))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
