pub mod config;
pub mod docs;
pub mod error;
pub mod extract;
pub mod features;
pub mod middleware;
pub mod session;

use axum::Router;
use storage::Database;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use docs::ApiDoc;
use error::WebError;

/// Builds the full API router.
pub fn app(db: Database, session_layer: SessionManagerLayer<MemoryStore>) -> Router {
    Router::new()
        .nest("/clubs", features::clubs::routes::routes())
        .nest("/competitions", features::competitions::routes::routes())
        .nest("/players", features::players::routes::routes())
        .nest("/schedules", features::schedules::routes::routes())
        .nest("/materials", features::materials::routes::routes(db.clone()))
        .nest("/content", features::content::routes::routes())
        .nest("/users", features::users::routes::routes(db.clone()))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(endpoint_not_found)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

async fn endpoint_not_found() -> WebError {
    WebError::NotFound("Endpoint not found".to_string())
}
