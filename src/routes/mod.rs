use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

mod environments;
mod flags;
mod health;
mod workflow;

pub use health::health;

use crate::state::AppState;
use crate::store::LoadError;

pub fn routes() -> Router<AppState> {
    let flag_router = Router::new()
        .route("/", get(flags::routes::list))
        .route("/evaluate", post(flags::routes::evaluate))
        .route("/{name}", get(flags::routes::get))
        .route("/{name}/evaluate", post(flags::routes::evaluate_one));

    let environment_router = Router::new()
        .route("/", get(environments::routes::list))
        .route(
            "/selected",
            get(environments::routes::selected).put(environments::routes::select),
        );

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/environments", environment_router)
        .nest("/api/environments/{environment}/flags", flag_router)
        .route(
            "/api/environments/{environment}/document",
            get(environments::routes::document_raw),
        )
        .route(
            "/api/environments/{environment}/document/meta",
            get(environments::routes::document_meta),
        )
        .route(
            "/api/environments/{environment}/workflow/edit-link",
            get(workflow::routes::edit_link),
        )
        .layer(CorsLayer::permissive())
}

async fn root() -> &'static str {
    "Welcome to the feature flag viewer API"
}

/// Map a document load failure onto an HTTP response. Every failure is
/// recoverable; the next request simply retries the load.
pub(crate) fn load_error_response(e: LoadError) -> (StatusCode, String) {
    tracing::error!("Failed to load flags document: {}", e);
    let status = match &e {
        LoadError::NotFound { .. } => StatusCode::NOT_FOUND,
        LoadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        LoadError::Malformed(_) | LoadError::EnvironmentMismatch { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    };
    (status, e.to_string())
}
