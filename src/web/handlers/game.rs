// Mini-game scores and leaderboard.

use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api_server::{AppError, AppState};
use crate::store::{timestamp, Row, Table};

pub const LEADERBOARD_SIZE: usize = 10;

fn default_user() -> Value {
    json!("guest")
}

fn default_score() -> Value {
    json!(0)
}

fn default_game() -> Value {
    json!("balloon_hit")
}

#[derive(Deserialize)]
pub struct ScoreSubmission {
    #[serde(default = "default_user")]
    user_id: Value,
    #[serde(default = "default_score")]
    score: Value,
    #[serde(default = "default_game")]
    game_type: Value,
}

/// Store failures are logged and otherwise ignored.
pub async fn save_score(
    State(state): State<AppState>,
    Json(payload): Json<ScoreSubmission>,
) -> Result<Json<Value>, AppError> {
    if let Some(store) = state.store.as_deref() {
        let mut row = Row::new();
        row.insert("user_id".to_string(), payload.user_id);
        row.insert("score".to_string(), payload.score.clone());
        row.insert("game_type".to_string(), payload.game_type);
        row.insert("created_at".to_string(), json!(timestamp()));

        if let Err(e) = store.insert(Table::GameScores, row).await {
            tracing::warn!("Could not save game score: {}", e);
        }
    }

    Ok(Json(json!({ "success": true, "score": payload.score })))
}

pub async fn leaderboard(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let leaderboard = match state.store.as_deref() {
        Some(store) => {
            let rows = store.top_by(Table::GameScores, "score", LEADERBOARD_SIZE).await?;
            Value::Array(rows.into_iter().map(Value::Object).collect())
        }
        None => json!([
            {"user_id": "Demo Player 1", "score": 350},
            {"user_id": "Demo Player 2", "score": 280},
            {"user_id": "Demo Player 3", "score": 210}
        ]),
    };

    Ok(Json(json!({ "success": true, "leaderboard": leaderboard })))
}
