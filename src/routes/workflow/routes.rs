use axum::{
    extract::{Path, State},
    Json,
};

use super::{edit_url, EditLinkResponse, FLAG_TEMPLATE};
use crate::document::Environment;
use crate::state::AppState;

/// Everything the "new flag" dialog needs: the GitHub edit link for the
/// environment's document and a copyable flag template
pub async fn edit_link(
    State(state): State<AppState>,
    Path(environment): Path<Environment>,
) -> Json<EditLinkResponse> {
    Json(EditLinkResponse {
        environment,
        url: edit_url(&state.repo_owner, &state.repo_name, environment),
        template: FLAG_TEMPLATE.to_string(),
    })
}
