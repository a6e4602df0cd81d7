// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mail delivery via an HTTP mail API.
//!
//! The only mail this application sends is the magic-link message. Without
//! an API key the service runs in offline mode and logs the link instead,
//! which is how local development and tests operate.

use crate::error::AppError;

/// HTTP mail API client.
#[derive(Clone)]
pub struct MailerService {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    from: String,
}

impl MailerService {
    /// Create a new mailer.
    pub fn new(api_url: String, api_key: Option<String>, from: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url,
            api_key,
            from,
        }
    }

    /// Create an offline mailer for testing (logs instead of sending).
    pub fn new_mock() -> Self {
        Self::new(
            "https://api.resend.com/emails".to_string(),
            None,
            "Fitlog <login@fitlog.local>".to_string(),
        )
    }

    /// Whether mail actually leaves the process.
    pub fn is_offline(&self) -> bool {
        self.api_key.is_none()
    }

    /// Send the sign-in link to `to`.
    pub async fn send_magic_link(&self, to: &str, link: &str) -> Result<(), AppError> {
        let Some(api_key) = &self.api_key else {
            tracing::info!(to, link, "Mail delivery disabled, logging magic link");
            return Ok(());
        };

        let body = serde_json::json!({
            "from": self.from,
            "to": [to],
            "subject": "Sign in to Fitlog",
            "text": format!(
                "Click the link below to sign in. It expires in 15 minutes \
                 and can only be used once.\n\n{}\n\nIf you did not request \
                 this, you can ignore this message.",
                link
            ),
        });

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Mail(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Mail(format!("HTTP {}: {}", status, body)));
        }

        tracing::info!(to, "Magic link sent");
        Ok(())
    }
}
