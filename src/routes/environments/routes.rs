use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use super::{
    humanize_age, DocumentMetaResponse, EnvironmentListResponse, SelectEnvironmentRequest,
    SelectedEnvironmentResponse,
};
use crate::document::Environment;
use crate::routes::load_error_response;
use crate::state::AppState;
use crate::store::{selected_environment, SELECTED_ENVIRONMENT_KEY};

/// List the known environments
pub async fn list() -> Json<EnvironmentListResponse> {
    Json(EnvironmentListResponse {
        environments: Environment::ALL.to_vec(),
    })
}

/// The persisted environment selection, defaulting to dev
pub async fn selected(State(state): State<AppState>) -> Json<SelectedEnvironmentResponse> {
    let environment = selected_environment(state.preferences.as_ref()).await;
    Json(SelectedEnvironmentResponse { environment })
}

/// Persist a new environment selection
pub async fn select(
    State(state): State<AppState>,
    Json(request): Json<SelectEnvironmentRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .preferences
        .set(SELECTED_ENVIRONMENT_KEY, &request.environment.to_string())
        .await
        .map_err(|e| {
            tracing::error!("Failed to persist environment selection: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to persist environment selection".to_string(),
            )
        })?;

    Ok(Json(SelectedEnvironmentResponse {
        environment: request.environment,
    }))
}

/// The environment's document exactly as stored, for inspection
pub async fn document_raw(
    State(state): State<AppState>,
    Path(environment): Path<Environment>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let raw = state
        .documents
        .load_raw(environment)
        .await
        .map_err(load_error_response)?;

    Ok(([(header::CONTENT_TYPE, "application/json")], raw))
}

/// Document summary for the table footer: freshness and flag count
pub async fn document_meta(
    State(state): State<AppState>,
    Path(environment): Path<Environment>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let document = state
        .documents
        .load(environment)
        .await
        .map_err(load_error_response)?;

    let age = document.updated_at.map(|t| humanize_age(t, Utc::now()));

    Ok(Json(DocumentMetaResponse {
        environment,
        updated_at: document.updated_at,
        age,
        flag_count: document.flags.len(),
    }))
}
