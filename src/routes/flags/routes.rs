use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::{
    EvaluateRequest, EvaluateResponse, FlagEvaluationResponse, FlagListResponse, FlagResponse,
    ListFlagsParams,
};
use crate::document::Environment;
use crate::evaluation::{evaluate_all, evaluate_flag};
use crate::query::{self, PAGE_SIZE};
use crate::routes::load_error_response;
use crate::state::AppState;

/// One page of the flags table: search, filter, sort and paginate the
/// environment's document. Zero matches is a normal empty page, not an
/// error; the counts let the client tell "no flags defined" from "no
/// flags match".
pub async fn list(
    State(state): State<AppState>,
    Path(environment): Path<Environment>,
    Query(params): Query<ListFlagsParams>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let document = state
        .documents
        .load(environment)
        .await
        .map_err(load_error_response)?;

    let result = query::query(&document.flags, &params.to_query());

    Ok(Json(FlagListResponse {
        environment,
        items: result.items.into_iter().map(FlagResponse::from).collect(),
        total_count: result.total_count,
        total_pages: result.total_pages,
        page: params.page,
        page_size: PAGE_SIZE,
    }))
}

/// Get a single flag by name
pub async fn get(
    State(state): State<AppState>,
    Path((environment, name)): Path<(Environment, String)>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let document = state
        .documents
        .load(environment)
        .await
        .map_err(load_error_response)?;

    match document.flag(&name) {
        Some(flag) => Ok(Json(FlagResponse::from(flag.clone()))),
        None => Err((
            StatusCode::NOT_FOUND,
            format!("Flag '{}' not found in '{}'", name, environment),
        )),
    }
}

/// Evaluate every flag in the environment against the supplied context
pub async fn evaluate(
    State(state): State<AppState>,
    Path(environment): Path<Environment>,
    Json(request): Json<EvaluateRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let document = state
        .documents
        .load(environment)
        .await
        .map_err(load_error_response)?;

    let flags = evaluate_all(&document.flags, request.context.as_ref());

    Ok(Json(EvaluateResponse { environment, flags }))
}

/// Evaluate a single flag by name against the supplied context
pub async fn evaluate_one(
    State(state): State<AppState>,
    Path((environment, name)): Path<(Environment, String)>,
    Json(request): Json<EvaluateRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let document = state
        .documents
        .load(environment)
        .await
        .map_err(load_error_response)?;

    match document.flag(&name) {
        Some(flag) => Ok(Json(FlagEvaluationResponse {
            name: flag.name.clone(),
            enabled: evaluate_flag(flag, request.context.as_ref()),
        })),
        None => Err((
            StatusCode::NOT_FOUND,
            format!("Flag '{}' not found in '{}'", name, environment),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::response::IntoResponse;

    use super::*;
    use crate::store::fakes::{MemoryDocumentStore, MemoryPreferences};

    const DEV_DOC: &str = r#"{
        "environment": "dev",
        "updatedAt": "2025-01-15T10:00:00Z",
        "flags": [
            {
                "featureName": "new_checkout",
                "featureValue": true,
                "featureDescription": "New checkout flow"
            },
            {
                "featureName": "beta_search",
                "featureValue": false,
                "featureDescription": "Search rewrite",
                "featureContext": [
                    {
                        "type": "starts_with",
                        "field_name": "path",
                        "field_value": "/api"
                    }
                ]
            }
        ]
    }"#;

    fn test_state() -> AppState {
        AppState {
            documents: Arc::new(
                MemoryDocumentStore::default().with_document(Environment::Dev, DEV_DOC),
            ),
            preferences: Arc::new(MemoryPreferences::default()),
            repo_owner: "acme".to_string(),
            repo_name: "flags".to_string(),
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn default_params() -> ListFlagsParams {
        serde_json::from_str("{}").unwrap()
    }

    #[tokio::test]
    async fn test_list_returns_queried_page() {
        let response = list(
            State(test_state()),
            Path(Environment::Dev),
            Query(default_params()),
        )
        .await
        .unwrap()
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["environment"], "dev");
        assert_eq!(body["total_count"], 2);
        assert_eq!(body["total_pages"], 1);
        // Sorted by name ascending by default
        assert_eq!(body["items"][0]["name"], "beta_search");
        assert_eq!(body["items"][1]["name"], "new_checkout");
    }

    #[tokio::test]
    async fn test_list_missing_document_is_a_load_error() {
        let err = list(
            State(test_state()),
            Path(Environment::Prod),
            Query(default_params()),
        )
        .await
        .err()
        .unwrap();

        assert_eq!(err.0, StatusCode::NOT_FOUND);
        assert!(err.1.contains("prod"));
    }

    #[tokio::test]
    async fn test_get_finds_flag_by_name() {
        let response = get(
            State(test_state()),
            Path((Environment::Dev, "new_checkout".to_string())),
        )
        .await
        .unwrap()
        .into_response();

        let body = body_json(response).await;
        assert_eq!(body["name"], "new_checkout");
        assert_eq!(body["value"], true);

        let err = get(
            State(test_state()),
            Path((Environment::Dev, "nope".to_string())),
        )
        .await
        .err()
        .unwrap();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_evaluate_applies_context() {
        let request: EvaluateRequest =
            serde_json::from_str(r#"{"context": {"path": "/api/v2"}}"#).unwrap();

        let response = evaluate(State(test_state()), Path(Environment::Dev), Json(request))
            .await
            .unwrap()
            .into_response();

        let body = body_json(response).await;
        // No rules on new_checkout, base value stands
        assert_eq!(body["flags"]["new_checkout"], true);
        // Rule passes, base false propagates
        assert_eq!(body["flags"]["beta_search"], false);
    }

    #[tokio::test]
    async fn test_evaluate_one_without_context_uses_base_value() {
        let response = evaluate_one(
            State(test_state()),
            Path((Environment::Dev, "beta_search".to_string())),
            Json(EvaluateRequest::default()),
        )
        .await
        .unwrap()
        .into_response();

        let body = body_json(response).await;
        assert_eq!(body["name"], "beta_search");
        assert_eq!(body["enabled"], false);
    }
}
