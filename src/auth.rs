//! Password hashing and bearer tokens.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const TOKEN_LIFETIME_DAYS: i64 = 30;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token is missing")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("token encoding failed: {0}")]
    Encode(jsonwebtoken::errors::Error),
}

/// User id as stored: integer for the memory store and serial columns,
/// text for uuid columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Read an id column; `None` for nulls and non-scalar values.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(RecordId::Int),
            Value::String(s) => Some(RecordId::Text(s.clone())),
            _ => None,
        }
    }
}

impl From<&RecordId> for Value {
    fn from(id: &RecordId) -> Self {
        match id {
            RecordId::Int(n) => Value::from(*n),
            RecordId::Text(s) => Value::from(s.as_str()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: RecordId,
    exp: i64,
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

/// Malformed stored hashes verify as a mismatch.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    bcrypt::verify(password, hashed).unwrap_or(false)
}

pub fn issue_token(user_id: &RecordId, secret: &str) -> Result<String, AuthError> {
    let exp = (chrono::Utc::now() + chrono::Duration::days(TOKEN_LIFETIME_DAYS)).timestamp();
    let claims = Claims { user_id: user_id.clone(), exp };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(AuthError::Encode)
}

pub fn verify_token(token: &str, secret: &str) -> Result<RecordId, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims.user_id)
    .map_err(|_| AuthError::InvalidToken)
}

/// Resolve the caller from `Authorization`. The `Bearer ` prefix is optional.
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<RecordId, AuthError> {
    let raw = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?
        .trim();
    if raw.is_empty() {
        return Err(AuthError::MissingToken);
    }

    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    verify_token(token, secret)
}
