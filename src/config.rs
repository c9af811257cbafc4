//! Configuration module for environment variables and application settings

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the administration backend
    pub api_base_url: String,

    /// Directory holding the persisted session state
    pub state_dir: PathBuf,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables, with working
    /// defaults for local development.
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("USERDESK_API_URL")
                .unwrap_or_else(|_| "http://localhost:3001".to_string()),

            state_dir: env::var("USERDESK_STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".userdesk")),

            request_timeout_secs: env::var("USERDESK_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
        }
    }
}
