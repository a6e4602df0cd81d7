// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Magic-link sign-in flow tests.
//!
//! The mailer runs offline here (links are logged, not sent), so the login
//! endpoint can be exercised end to end without external services. Verify
//! paths that need the database stop at the offline mock.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tower::ServiceExt;

mod common;

type HmacSha256 = Hmac<Sha256>;

fn login_request(email: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({ "email": email }).to_string(),
        ))
        .unwrap()
}

#[tokio::test]
async fn test_login_with_valid_email_succeeds_offline() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(login_request("runner@example.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], true);
}

#[tokio::test]
async fn test_verify_with_garbage_token_is_unauthorized() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/auth/verify?token=garbage")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_verify_with_expired_token_is_unauthorized() {
    let (app, state) = common::create_test_app();

    // Hand-craft a correctly signed token whose expiry is far in the past.
    let payload = format!("runner@example.com|{:x}|{}", 1000u128, "00".repeat(8));
    let mut mac = HmacSha256::new_from_slice(&state.config.magic_link_signing_key).unwrap();
    mac.update(payload.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());
    let token = URL_SAFE_NO_PAD.encode(format!("{}|{}", payload, signature).as_bytes());

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(&format!(
                    "/auth/verify?token={}",
                    urlencoding::encode(&token)
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_verify_with_fresh_token_passes_token_check() {
    let (app, state) = common::create_test_app();

    let token = state.magic_link.issue("runner@example.com").unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(&format!(
                    "/auth/verify?token={}",
                    urlencoding::encode(&token)
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // The token itself is accepted; the handler then fails at the offline
    // database while looking up the user. Anything but 401 shows the
    // signature/expiry/single-use checks all passed.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_verify_token_is_single_use_across_requests() {
    let (app, state) = common::create_test_app();

    let token = state.magic_link.issue("runner@example.com").unwrap();
    let uri = format!("/auth/verify?token={}", urlencoding::encode(&token));

    // First redemption claims the token (then dies at the offline db).
    let first = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(&uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // Second redemption must be rejected as a replay.
    let second = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(&uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::UNAUTHORIZED);
}
