// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Magic-link authentication routes.
//!
//! Sign-in is passwordless: the user posts their email address, receives a
//! signed one-time link, and following it establishes a JWT session.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::create_jwt;
use crate::models::{user_id_for_email, User};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(request_login))
        .route("/auth/verify", get(verify_login))
        .route("/auth/logout", get(logout))
}

const MAX_EMAIL_LENGTH: usize = 254;

/// Body for requesting a magic link.
#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
}

/// Response after a magic link was issued.
#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
}

/// Request a magic link for an email address.
///
/// Always answers with the same message whether or not the address has an
/// account; an account is only created once a link is actually redeemed.
async fn request_login(
    State(state): State<Arc<AppState>>,
    headers: axum::http::HeaderMap,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let email = normalize_email(&body.email)?;

    let token = state.magic_link.issue(&email)?;

    // Build the verify URL from the request host, so the link points back
    // at whichever deployment served this request.
    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost:8080");
    let scheme = if host.contains("localhost") || host.contains("127.0.0.1") {
        "http"
    } else {
        "https"
    };
    let link = format!(
        "{}://{}/auth/verify?token={}",
        scheme,
        host,
        urlencoding::encode(&token)
    );

    state.mailer.send_magic_link(&email, &link).await?;

    tracing::info!(email = %email, "Magic link issued");

    Ok(Json(LoginResponse {
        success: true,
        message: "Check your email for a sign-in link.".to_string(),
    }))
}

#[derive(Deserialize)]
pub struct VerifyParams {
    token: String,
}

/// Redeem a magic link: create the user on first sign-in, then redirect to
/// the frontend with a session JWT.
async fn verify_login(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VerifyParams>,
) -> Result<Redirect> {
    let email = state.magic_link.verify(&params.token)?;
    let user_id = user_id_for_email(&email);
    let now = format_utc_rfc3339(chrono::Utc::now());

    let user = match state.db.get_user(&user_id).await? {
        Some(mut existing) => {
            existing.last_login = now;
            existing
        }
        None => {
            tracing::info!(user_id = %user_id, "Creating user on first sign-in");
            User {
                user_id: user_id.clone(),
                email: email.clone(),
                name: None,
                created_at: now.clone(),
                last_login: now,
            }
        }
    };
    state.db.upsert_user(&user).await?;

    let jwt = create_jwt(&user_id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    tracing::info!(user_id = %user_id, "Magic link redeemed, session created");

    let redirect_url = format!("{}/callback?token={}", state.config.frontend_url, jwt);
    Ok(Redirect::temporary(&redirect_url))
}

/// Logout - just a placeholder that clears client-side token.
async fn logout() -> Redirect {
    // The actual logout happens on client side by clearing the token.
    // This endpoint just redirects back.
    Redirect::temporary("/")
}

/// Trim, lowercase and sanity-check an email address.
///
/// This is deliberately loose; the real proof of ownership is that the
/// link arrives in the inbox.
fn normalize_email(raw: &str) -> Result<String> {
    let email = raw.trim().to_lowercase();

    if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    // '|' is the magic-link payload delimiter and may not appear in the
    // email it carries.
    if email.chars().any(|c| c.is_whitespace() || c == '|') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    Ok(email)
}
