use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Path to the FCM service-account key file
    pub credentials_file: PathBuf,
    /// NATS server URL
    pub nats_url: String,
    /// Subject carrying the server's message events
    pub subject: String,
    /// Topic patterns whose content anonymous readers must not see
    pub protected_topics: Vec<String>,
}

impl BridgeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let credentials_file = env::var("FCM_KEY_FILE")
            .map_err(|_| ConfigError::MissingEnvVar("FCM_KEY_FILE".to_string()))?;

        Ok(Self {
            credentials_file: PathBuf::from(credentials_file),
            nats_url: env::var("NATS_URL").unwrap_or_else(|_| "localhost:4222".to_string()),
            subject: env::var("BRIDGE_SUBJECT").unwrap_or_else(|_| "notify.events".to_string()),
            protected_topics: env::var("PROTECTED_TOPICS")
                .map(|raw| split_patterns(&raw))
                .unwrap_or_default(),
        })
    }

    /// Create a config for testing
    pub fn for_test(credentials_file: &Path, nats_url: &str) -> Self {
        Self {
            credentials_file: credentials_file.to_path_buf(),
            nats_url: nats_url.to_string(),
            subject: "notify.events".to_string(),
            protected_topics: Vec::new(),
        }
    }
}

fn split_patterns(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|pattern| !pattern.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}
