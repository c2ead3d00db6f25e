// Skincare chat with knowledge-base context.

use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api_server::{AppError, AppState};
use crate::chat::{build_prompt, decorate_ai_reply, fallback_reply, ChatContext, ChatReply};

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ChatRequest {
    message: Option<String>,
}

pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<Value>, AppError> {
    let original = payload.message.unwrap_or_default();
    let message = original.to_lowercase();
    let context = ChatContext::gather(&message, state.scorer.knowledge_base());

    let reply = match state.gemini.as_ref() {
        Some(gemini) => match gemini.generate_text(&build_prompt(&context, &original)).await {
            Ok(text) => decorate_ai_reply(&text, &message),
            Err(e) => {
                tracing::warn!("Gemini chat failed, using fallback: {}", e);
                fallback_reply(&context, &message)
            }
        },
        None => fallback_reply(&context, &message),
    };

    let ChatReply { response, powered_by } = reply;
    Ok(Json(json!({
        "success": true,
        "response": response,
        "powered_by": powered_by,
    })))
}
