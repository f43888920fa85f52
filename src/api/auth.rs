//! Password digests and bearer tokens
//!
//! Tokens are `"{user_id}.{signature}"` where the signature is a SHA-256
//! over the configured secret and the user id. Verification is stateless:
//! nothing is stored server-side beyond the user row itself.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use sha2::{Digest, Sha256};

/// Hex SHA-256 digest of a password. Plaintext is never persisted.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

fn signature(secret: &str, user_id: i64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b"|");
    hasher.update(user_id.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

/// Issues a signed bearer token for a user.
pub fn issue_token(secret: &str, user_id: i64) -> String {
    format!("{}.{}", user_id, signature(secret, user_id))
}

/// Verifies a bearer token, returning the user id it names.
pub fn verify_token(secret: &str, token: &str) -> Option<i64> {
    let (id_part, sig) = token.split_once('.')?;
    let user_id: i64 = id_part.parse().ok()?;
    (signature(secret, user_id) == sig).then_some(user_id)
}

/// Pulls the bearer token out of an Authorization header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
