// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Signed one-time tokens for magic-link sign-in.
//!
//! A token carries its own payload: `email|expiry_millis_hex|nonce_hex`,
//! HMAC-SHA256 signed and base64url encoded. Verification checks the
//! signature, the expiry, and single use. Used-token tracking lives in a
//! process-local map shared across handlers within this instance, so a
//! link can only be redeemed once per running server.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use dashmap::DashMap;
use hmac::{Hmac, Mac};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::Sha256;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::AppError;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// How long a magic link stays valid.
pub const MAGIC_LINK_TTL: Duration = Duration::from_secs(15 * 60);

const TOKEN_PARTS: usize = 4;

/// Issues and verifies magic-link tokens.
#[derive(Clone)]
pub struct MagicLinkService {
    signing_key: Vec<u8>,
    rng: SystemRandom,
    /// Redeemed token signatures mapped to their expiry (millis).
    /// Entries are evicted lazily once expired.
    used_tokens: Arc<DashMap<String, u128>>,
}

impl MagicLinkService {
    pub fn new(signing_key: Vec<u8>) -> Self {
        Self {
            signing_key,
            rng: SystemRandom::new(),
            used_tokens: Arc::new(DashMap::new()),
        }
    }

    /// Issue a token for `email`, valid for [`MAGIC_LINK_TTL`].
    ///
    /// The email must already be normalized (trimmed, lowercased).
    pub fn issue(&self, email: &str) -> Result<String, AppError> {
        let expiry = now_millis()? + MAGIC_LINK_TTL.as_millis();

        let mut nonce = [0u8; 8];
        self.rng
            .fill(&mut nonce)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("RNG failure")))?;

        let payload = format!("{}|{:x}|{}", email, expiry, hex::encode(nonce));
        let signature = self.sign(&payload)?;

        let token = format!("{}|{}", payload, signature);
        Ok(URL_SAFE_NO_PAD.encode(token.as_bytes()))
    }

    /// Verify a token and return the email it was issued for.
    ///
    /// Fails with `InvalidToken` on any of: malformed encoding, bad
    /// signature, expiry in the past, or a token already redeemed by this
    /// instance.
    pub fn verify(&self, token: &str) -> Result<String, AppError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| AppError::InvalidToken)?;
        let token_str = String::from_utf8(bytes).map_err(|_| AppError::InvalidToken)?;

        let parts: Vec<&str> = token_str.splitn(TOKEN_PARTS, '|').collect();
        if parts.len() != TOKEN_PARTS {
            return Err(AppError::InvalidToken);
        }
        let (email, expiry_hex, nonce_hex, signature_hex) =
            (parts[0], parts[1], parts[2], parts[3]);

        // Reconstruct payload and verify signature (constant-time).
        let payload = format!("{}|{}|{}", email, expiry_hex, nonce_hex);
        let mut mac = HmacSha256::new_from_slice(&self.signing_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("HMAC init failed")))?;
        mac.update(payload.as_bytes());

        let signature = hex::decode(signature_hex).map_err(|_| AppError::InvalidToken)?;
        if mac.verify_slice(&signature).is_err() {
            tracing::warn!("Magic-link signature mismatch, potential tampering");
            return Err(AppError::InvalidToken);
        }

        let expiry = u128::from_str_radix(expiry_hex, 16).map_err(|_| AppError::InvalidToken)?;
        let now = now_millis()?;
        if expiry < now {
            return Err(AppError::InvalidToken);
        }

        self.evict_expired(now);

        // One link, one sign-in: the first redeem claims the signature.
        if self
            .used_tokens
            .insert(signature_hex.to_string(), expiry)
            .is_some()
        {
            tracing::warn!("Magic-link replay attempt");
            return Err(AppError::InvalidToken);
        }

        Ok(email.to_string())
    }

    fn sign(&self, payload: &str) -> Result<String, AppError> {
        let mut mac = HmacSha256::new_from_slice(&self.signing_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("HMAC init failed")))?;
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Drop used-token entries whose expiry has passed; they can no longer
    /// verify anyway.
    fn evict_expired(&self, now: u128) {
        self.used_tokens.retain(|_, expiry| *expiry >= now);
    }
}

fn now_millis() -> Result<u128, AppError> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> MagicLinkService {
        MagicLinkService::new(b"test_magic_link_key".to_vec())
    }

    #[test]
    fn test_issue_verify_round_trip() {
        let svc = service();
        let token = svc.issue("runner@example.com").unwrap();
        let email = svc.verify(&token).unwrap();
        assert_eq!(email, "runner@example.com");
    }

    #[test]
    fn test_token_is_single_use() {
        let svc = service();
        let token = svc.issue("runner@example.com").unwrap();
        svc.verify(&token).unwrap();

        let err = svc.verify(&token).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn test_two_links_for_same_email_are_independent() {
        let svc = service();
        let first = svc.issue("runner@example.com").unwrap();
        let second = svc.issue("runner@example.com").unwrap();
        assert_ne!(first, second);

        svc.verify(&first).unwrap();
        // Redeeming the first must not burn the second.
        svc.verify(&second).unwrap();
    }

    #[test]
    fn test_rejects_wrong_key() {
        let svc = service();
        let other = MagicLinkService::new(b"different_key".to_vec());
        let token = svc.issue("runner@example.com").unwrap();

        let err = other.verify(&token).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn test_rejects_garbage() {
        let svc = service();
        assert!(svc.verify("not-base64!").is_err());
        assert!(svc
            .verify(&URL_SAFE_NO_PAD.encode(b"missing|parts"))
            .is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let svc = service();

        // Hand-craft a token whose expiry is in the past, correctly signed.
        let payload = format!("runner@example.com|{:x}|{}", 1000u128, "00".repeat(8));
        let signature = svc.sign(&payload).unwrap();
        let token = URL_SAFE_NO_PAD.encode(format!("{}|{}", payload, signature).as_bytes());

        let err = svc.verify(&token).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn test_tampered_email_fails_signature() {
        let svc = service();
        let token = svc.issue("runner@example.com").unwrap();

        let decoded = String::from_utf8(URL_SAFE_NO_PAD.decode(&token).unwrap()).unwrap();
        let tampered = decoded.replacen("runner@", "attacker@", 1);
        let tampered_token = URL_SAFE_NO_PAD.encode(tampered.as_bytes());

        let err = svc.verify(&tampered_token).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }
}
