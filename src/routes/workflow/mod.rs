pub mod routes;

use serde::Serialize;

use crate::document::Environment;

// MODELS

#[derive(Debug, Serialize)]
pub struct EditLinkResponse {
    pub environment: Environment,
    pub url: String,
    pub template: String,
}

// HELPER FUNCTIONS

/// Skeleton a new flag is pasted from. Drop `featureContext` when the
/// flag needs no context rules.
pub const FLAG_TEMPLATE: &str = r#"{
  "featureName": "new_feature",
  "featureValue": true,
  "featureDescription": "Description of your new feature",
  "featureContext": [
    {
      "type": "equals",
      "field_name": "domain",
      "field_value": "example.com"
    }
  ]
}"#;

/// GitHub "edit this file" URL for an environment's flags document. The
/// viewer never writes there; edits land through pull requests.
pub fn edit_url(repo_owner: &str, repo_name: &str, environment: Environment) -> String {
    format!(
        "https://github.com/{}/{}/edit/main/public/flags/{}.json",
        repo_owner, repo_name, environment
    )
}
