// Allergy analysis from symptom text and an optional skin photo.

use axum::{extract::State, response::Json};
use serde::Deserialize;

use crate::api_server::{AppError, AppState};
use crate::genai::decode_image;
use crate::symptoms::{analysis_from_reply, build_report, image_prompt, AllergyReport, ImageAnalysis};

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct AllergyRequest {
    symptoms: Option<String>,
    suspected_ingredients: Option<String>,
    image: Option<String>,
}

pub async fn analyze(
    State(state): State<AppState>,
    Json(payload): Json<AllergyRequest>,
) -> Result<Json<AllergyReport>, AppError> {
    let symptoms = payload.symptoms.unwrap_or_default().to_lowercase();
    let suspected = payload.suspected_ingredients.unwrap_or_default().to_lowercase();
    let image = payload.image.filter(|data| !data.trim().is_empty());

    if symptoms.is_empty() && image.is_none() {
        return Err(AppError::Validation("Either symptoms or image required".to_string()));
    }

    let image_analysis = match image {
        Some(data) => Some(analyze_image(&state, &data, &symptoms, &suspected).await),
        None => None,
    };

    Ok(Json(build_report(&symptoms, image_analysis)))
}

/// Never fails: every error becomes a placeholder analysis.
async fn analyze_image(state: &AppState, data: &str, symptoms: &str, suspected: &str) -> ImageAnalysis {
    let Some(gemini) = state.gemini.as_ref() else {
        return ImageAnalysis::api_key_missing();
    };

    let bytes = match decode_image(data) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Image decode failed: {}", e);
            return ImageAnalysis::failed();
        }
    };

    let reply = match gemini.generate_with_image(&image_prompt(symptoms, suspected), &bytes).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!("Image analysis failed: {}", e);
            return ImageAnalysis::failed();
        }
    };

    let analysis = analysis_from_reply(&reply);
    tracing::info!("Image analysis complete: {}", analysis.condition);
    analysis
}
