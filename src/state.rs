use std::sync::Arc;

use crate::store::{DocumentStore, PreferenceStore};

#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<dyn DocumentStore>,
    pub preferences: Arc<dyn PreferenceStore>,
    pub repo_owner: String,
    pub repo_name: String,
}
