// Account handlers: signup, login, and profile.

use axum::{
    extract::State,
    http::HeaderMap,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api_server::{AppError, AppState};
use crate::auth::{authenticate, hash_password, issue_token, verify_password, RecordId};
use crate::store::{timestamp, Row, Table};

const PROFILE_FIELDS: [&str; 2] = ["name", "profile_picture"];

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Credentials {
    email: Option<String>,
    password: Option<String>,
    name: Option<String>,
}

impl Credentials {
    fn required(&self) -> Result<(&str, &str), AppError> {
        let email = self.email.as_deref().map(str::trim).unwrap_or_default();
        let password = self.password.as_deref().unwrap_or_default();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::Validation("Email and password required".to_string()));
        }
        Ok((email, password))
    }
}

fn record_id(row: &Row) -> Result<RecordId, AppError> {
    row.get("id")
        .and_then(RecordId::from_value)
        .ok_or_else(|| AppError::Internal("Stored user has no id".to_string()))
}

/// The user fields safe to return to a client.
fn public_user(row: &Row) -> Value {
    json!({
        "id": row.get("id").cloned().unwrap_or(Value::Null),
        "email": row.get("email").cloned().unwrap_or(Value::Null),
        "name": row.get("name").cloned().unwrap_or(Value::Null),
        "profile_picture": row.get("profile_picture").cloned().unwrap_or(Value::Null),
    })
}

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Json<Value>, AppError> {
    let store = state.store()?;
    let (email, password) = payload.required()?;
    let name = payload.name.clone().unwrap_or_default();

    let existing = store.select_eq(Table::Users, "email", &json!(email)).await?;
    if !existing.is_empty() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password = password.to_string();
    let hashed = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

    let mut row = Row::new();
    row.insert("email".to_string(), json!(email));
    row.insert("password".to_string(), json!(hashed));
    row.insert("name".to_string(), json!(name));
    row.insert("created_at".to_string(), json!(timestamp()));
    let stored = store.insert(Table::Users, row).await?;

    let user_id = record_id(&stored)?;
    let token = issue_token(&user_id, state.secret())?;
    tracing::info!("New account created (user {:?})", user_id);

    Ok(Json(json!({
        "success": true,
        "token": token,
        "user": {
            "id": Value::from(&user_id),
            "email": email,
            "name": name,
        }
    })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Json<Value>, AppError> {
    let store = state.store()?;
    let (email, password) = payload.required()?;
    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let user = store
        .select_eq(Table::Users, "email", &json!(email))
        .await?
        .into_iter()
        .next()
        .ok_or_else(invalid)?;

    let hashed = user.get("password").and_then(Value::as_str).unwrap_or_default().to_string();
    let password = password.to_string();
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hashed)).await?;
    if !matches {
        return Err(invalid());
    }

    let user_id = record_id(&user)?;
    let token = issue_token(&user_id, state.secret())?;

    Ok(Json(json!({
        "success": true,
        "token": token,
        "user": {
            "id": Value::from(&user_id),
            "email": user.get("email").cloned().unwrap_or(Value::Null),
            "name": user.get("name").cloned().unwrap_or(Value::Null),
        }
    })))
}

pub async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    let user_id = authenticate(&headers, state.secret())?;
    let store = state.store()?;

    let user = store
        .select_eq(Table::Users, "id", &Value::from(&user_id))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({ "success": true, "user": public_user(&user) })))
}

/// Only `name` and `profile_picture` are writable; other keys are ignored.
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<Row>,
) -> Result<Json<Value>, AppError> {
    let user_id = authenticate(&headers, state.secret())?;
    let store = state.store()?;
    let id = Value::from(&user_id);

    let changes: Row = payload
        .into_iter()
        .filter(|(key, _)| PROFILE_FIELDS.contains(&key.as_str()))
        .collect();

    let rows = if changes.is_empty() {
        store.select_eq(Table::Users, "id", &id).await?
    } else {
        store.update_eq(Table::Users, "id", &id, changes).await?
    };

    let user = rows
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({ "success": true, "user": public_user(&user) })))
}
