//! Identifier generation and avatar derivation.

use uuid::Uuid;

use crate::constants::AVATAR_SERVICE;

/// Generate a fresh opaque identifier for a user, review, or comment.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Derive the avatar URL for an identifying seed string (email on login,
/// username on registration).  Deterministic: the same seed always yields
/// the same avatar.
pub fn avatar_url(seed: &str) -> String {
    format!("{AVATAR_SERVICE}{seed}")
}
