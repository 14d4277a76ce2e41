use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::document::{Environment, FlagsDocument};

/// Preference key for the last-selected environment.
pub const SELECTED_ENVIRONMENT_KEY: &str = "selected_environment";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("No flags document found for environment '{environment}'")]
    NotFound { environment: Environment },
    #[error("Failed to read flags document: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid flags document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Document is for environment '{found}' but '{expected}' was requested")]
    EnvironmentMismatch {
        expected: Environment,
        found: Environment,
    },
}

/// The one async boundary of the viewer: fetching a per-environment
/// document. Everything downstream of `load` is pure.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// The document bytes exactly as stored, with no transformation.
    async fn load_raw(&self, environment: Environment) -> Result<String, LoadError>;

    /// Fetch and validate the document for an environment. Structural
    /// validation (required `environment` and `flags` fields) happens in
    /// deserialization; a document claiming a different environment than
    /// the one requested is rejected.
    async fn load(&self, environment: Environment) -> Result<FlagsDocument, LoadError> {
        let raw = self.load_raw(environment).await?;
        let document: FlagsDocument = serde_json::from_str(&raw)?;

        if document.environment != environment {
            return Err(LoadError::EnvironmentMismatch {
                expected: environment,
                found: document.environment,
            });
        }

        Ok(document)
    }
}

/// Reads `<dir>/<environment>.json` from disk.
pub struct FileDocumentStore {
    dir: PathBuf,
}

impl FileDocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn document_path(&self, environment: Environment) -> PathBuf {
        self.dir.join(format!("{}.json", environment))
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn load_raw(&self, environment: Environment) -> Result<String, LoadError> {
        let path = self.document_path(environment);
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(LoadError::NotFound { environment })
            }
            Err(e) => Err(LoadError::Io(e)),
        }
    }
}

/// Session preferences persisted across restarts, a flat string-to-string
/// map. Only the selected environment lives here today.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: &str) -> std::io::Result<()>;
}

/// Last-selected environment from the preference store, defaulting to
/// dev when never set or unreadable.
pub async fn selected_environment(prefs: &dyn PreferenceStore) -> Environment {
    prefs
        .get(SELECTED_ENVIRONMENT_KEY)
        .await
        .and_then(|v| v.parse().ok())
        .unwrap_or(Environment::Dev)
}

/// Whole-file JSON key/value store. Reads on every access so concurrent
/// handlers never share mutable state.
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_all(&self) -> HashMap<String, String> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(_) => return HashMap::new(),
        };

        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Preference file {:?} is unreadable, starting fresh: {}", self.path, e);
                HashMap::new()
            }
        }
    }
}

#[async_trait]
impl PreferenceStore for FilePreferences {
    async fn get(&self, key: &str) -> Option<String> {
        self.read_all().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) -> std::io::Result<()> {
        let mut all = self.read_all().await;
        all.insert(key.to_string(), value.to_string());
        let raw = serde_json::to_string_pretty(&all).map_err(std::io::Error::other)?;
        tokio::fs::write(&self.path, raw).await
    }
}
