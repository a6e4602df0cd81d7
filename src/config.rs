//! Application configuration loaded from environment variables.
//!
//! Secrets are read once at startup and cached in memory. In production the
//! deployment platform injects them as environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL for magic-link redirects and CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,

    // --- Secrets ---
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// HMAC key for magic-link tokens; defaults to the JWT key when unset
    pub magic_link_signing_key: Vec<u8>,

    // --- Mail delivery ---
    /// HTTP mail API endpoint
    pub mail_api_url: String,
    /// Mail API key; when unset, links are logged instead of sent
    pub mail_api_key: Option<String>,
    /// From address for magic-link mail
    pub mail_from: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let jwt_signing_key = env::var("JWT_SIGNING_KEY")
            .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
            .into_bytes();

        let magic_link_signing_key = env::var("MAGIC_LINK_SIGNING_KEY")
            .map(String::into_bytes)
            .unwrap_or_else(|_| jwt_signing_key.clone());

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            jwt_signing_key,
            magic_link_signing_key,
            mail_api_url: env::var("MAIL_API_URL")
                .unwrap_or_else(|_| "https://api.resend.com/emails".to_string()),
            mail_api_key: env::var("MAIL_API_KEY").ok().map(|v| v.trim().to_string()),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "Fitlog <login@fitlog.local>".to_string()),
        })
    }

    /// Fixed config for tests.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            magic_link_signing_key: b"test_magic_link_key_32_bytes!!!".to_vec(),
            mail_api_url: "https://api.resend.com/emails".to_string(),
            mail_api_key: None,
            mail_from: "Fitlog <login@fitlog.local>".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
