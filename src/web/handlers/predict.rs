// Product scoring and skin-type recommendations.

use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api_server::{AppError, AppState};
use crate::scorer::{ProductReport, ScoreRequest, DEFAULT_SKIN_TYPE};

pub const DEFAULT_CONCERN: &str = "general";

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct PredictRequest {
    product: Option<String>,
    skin_type: Option<String>,
    allergies: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RecommendRequest {
    skin_type: Option<String>,
    concern: Option<String>,
}

pub async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<PredictRequest>,
) -> Result<Json<ProductReport>, AppError> {
    let request = ScoreRequest {
        product: payload.product.unwrap_or_default(),
        skin_type: payload.skin_type,
        allergies: payload.allergies,
    };

    // CPU-bound: run on the blocking pool
    let scorer = state.scorer.clone();
    let report = tokio::task::spawn_blocking(move || scorer.score(&request)).await??;

    tracing::info!(
        "Analyzed '{}': {} ({})",
        report.product_name,
        report.prediction.risk_category,
        report.prediction.risk_score
    );

    Ok(Json(report))
}

pub async fn recommend(
    State(state): State<AppState>,
    Json(payload): Json<RecommendRequest>,
) -> Result<Json<Value>, AppError> {
    let skin_type = payload.skin_type.unwrap_or_else(|| DEFAULT_SKIN_TYPE.to_string()).to_lowercase();
    let concern = payload.concern.unwrap_or_else(|| DEFAULT_CONCERN.to_string()).to_lowercase();

    let suggestion = state.scorer.knowledge_base().recommend(&skin_type, &concern);

    Ok(Json(json!({
        "success": true,
        "recommendations": suggestion.products,
        "beneficial_ingredients": suggestion.ingredients,
        "skin_type": skin_type,
        "concern": concern,
    })))
}
