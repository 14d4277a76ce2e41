pub mod routes;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Environment;

// MODELS

#[derive(Debug, Serialize)]
pub struct EnvironmentListResponse {
    pub environments: Vec<Environment>,
}

#[derive(Debug, Serialize)]
pub struct SelectedEnvironmentResponse {
    pub environment: Environment,
}

#[derive(Debug, Deserialize)]
pub struct SelectEnvironmentRequest {
    pub environment: Environment,
}

#[derive(Debug, Serialize)]
pub struct DocumentMetaResponse {
    pub environment: Environment,
    pub updated_at: Option<DateTime<Utc>>,
    pub age: Option<String>,
    pub flag_count: usize,
}

// HELPER FUNCTIONS

/// "2 days ago"-style age for the table footer.
pub fn humanize_age(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - updated_at;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if days > 0 {
        format!("{} day{} ago", days, if days > 1 { "s" } else { "" })
    } else if hours > 0 {
        format!("{} hour{} ago", hours, if hours > 1 { "s" } else { "" })
    } else if minutes > 0 {
        format!("{} min{} ago", minutes, if minutes > 1 { "s" } else { "" })
    } else {
        "just now".to_string()
    }
}
