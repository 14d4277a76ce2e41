use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Deserialize)]
pub struct Config {
    pub port: u16,
    pub flags_dir: String,
    pub prefs_path: String,
    pub repo_owner: String,
    pub repo_name: String,
}

impl Config {
    pub fn from_env() -> Self {
        let _ = dotenv().is_ok();

        let port = env::var("PORT")
            .expect("PORT missing, it is required")
            .parse()
            .expect("PORT must be a valid u16 number");

        let flags_dir = env::var("FLAGS_DIR").expect("FLAGS_DIR missing, it is required");

        let prefs_path = env::var("PREFS_PATH").unwrap_or_else(|_| "viewer-prefs.json".to_string());

        // Repository the flags documents live in; edits go through PRs there
        let repo_owner = env::var("GITHUB_REPO_OWNER").unwrap_or_else(|_| "polukovy".to_string());
        let repo_name =
            env::var("GITHUB_REPO_NAME").unwrap_or_else(|_| "feature-flag-service".to_string());

        Self {
            port,
            flags_dir,
            prefs_path,
            repo_owner,
            repo_name,
        }
    }

    pub fn addr(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }
}
