//! User model for storage and API.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// User record stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Stable ID derived from the email (also used as document ID)
    pub user_id: String,
    /// Email address the magic link was sent to
    pub email: String,
    /// Display name, if the user set one
    pub name: Option<String>,
    /// When the user first signed in (ISO 8601)
    pub created_at: String,
    /// Most recent sign-in (ISO 8601)
    pub last_login: String,
}

/// Derive the stable user ID for an email address.
///
/// The ID is a SHA-256 prefix of the lowercased, trimmed email, so two
/// concurrent first sign-ins for the same address upsert the same document
/// instead of racing to create two users.
pub fn user_id_for_email(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    hex::encode(&digest[..16])
}
