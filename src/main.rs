mod config;
mod document;
mod evaluation;
mod query;
mod routes;
mod state;
mod store;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use store::{selected_environment, FileDocumentStore, FilePreferences};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::Config::from_env();

    let preferences = Arc::new(FilePreferences::new(&config.prefs_path));
    let startup_environment = selected_environment(preferences.as_ref()).await;
    tracing::info!("starting with environment '{}' selected", startup_environment);

    let state = state::AppState {
        documents: Arc::new(FileDocumentStore::new(&config.flags_dir)),
        preferences,
        repo_owner: config.repo_owner.clone(),
        repo_name: config.repo_name.clone(),
    };

    let app = routes::routes().with_state(state);

    let listener = tokio::net::TcpListener::bind(config.addr()).await.unwrap();

    tracing::info!("server is chilling at http://{}", config.addr());

    axum::serve(listener, app).await.unwrap();
}
