// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitlog API Server
//!
//! Logs exercise activities, estimates calories at creation time, and
//! serves weekly dashboard statistics.

use fitlog::{
    config::Config,
    db::FirestoreDb,
    services::{MagicLinkService, MailerService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Fitlog API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Magic-link token service
    let magic_link = MagicLinkService::new(config.magic_link_signing_key.clone());

    // Mail delivery; without an API key, links are logged instead of sent
    let mailer = MailerService::new(
        config.mail_api_url.clone(),
        config.mail_api_key.clone(),
        config.mail_from.clone(),
    );
    if mailer.is_offline() {
        tracing::warn!("MAIL_API_KEY not set, magic links will be logged, not emailed");
    }

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        magic_link,
        mailer,
    });

    // Build router
    let app = fitlog::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fitlog=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
