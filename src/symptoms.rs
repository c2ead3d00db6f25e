//! Allergy symptom analysis
//!
//! Maps described symptoms to likely culprit ingredients and remedies, and
//! shapes the optional image analysis returned by the generative model.
//! The model call itself lives in the HTTP layer; everything here is pure.

use crate::knowledge::{remedy_for, ALLERGY_SYMPTOMS};
use serde::{Deserialize, Serialize};

pub const GENERAL_ADVICE: [&str; 4] = [
    "🩺 Stop using the suspected product immediately",
    "🧊 Apply cold compress to reduce inflammation",
    "💧 Use gentle, fragrance-free products",
    "👨‍⚕️ Consult a dermatologist if symptoms persist or worsen",
];

pub const UNKNOWN_ALLERGEN: &str = "unknown allergen - see image analysis";
pub const SEE_IMAGE_ANALYSIS: &str = "See image analysis for details";
pub const ANALYZED_FROM_IMAGE: &str = "analyzed from image";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Remedy {
    pub ingredient: String,
    pub remedy: String,
}

/// Structured reading of a skin-condition photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    #[serde(default)]
    pub severity: String,
    #[serde(rename = "type")]
    pub condition: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub observations: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl ImageAnalysis {
    fn fixed(severity: &str, condition: &str, confidence: f64, observations: &[&str], recommendations: &[&str]) -> Self {
        Self {
            severity: severity.to_string(),
            condition: condition.to_string(),
            confidence,
            observations: observations.iter().map(|s| s.to_string()).collect(),
            recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// No generative-AI key configured.
    pub fn api_key_missing() -> Self {
        Self::fixed(
            "unknown",
            "API key missing",
            0.0,
            &["Gemini API key not configured"],
            &["Add GEMINI_API_KEY to .env file"],
        )
    }

    /// The model replied, but not with parseable JSON.
    pub fn incomplete() -> Self {
        Self::fixed(
            "moderate",
            "analysis incomplete",
            50.0,
            &["Image received but could not be fully analyzed", "Please consult a dermatologist"],
            &["Seek professional medical advice", "Avoid scratching affected area"],
        )
    }

    /// The image could not be decoded or the model call failed.
    pub fn failed() -> Self {
        Self::fixed(
            "unknown",
            "analysis failed",
            0.0,
            &["Could not analyze image - API error"],
            &["Please try again", "Consult a dermatologist for accurate diagnosis"],
        )
    }
}

/// Full response of the allergy endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllergyReport {
    pub success: bool,
    pub symptoms_detected: Vec<String>,
    pub likely_culprits: Vec<String>,
    pub remedies: Vec<Remedy>,
    pub image_analysis: Option<ImageAnalysis>,
    pub general_advice: [&'static str; 4],
}

/// Culprits of every known symptom mentioned in `symptoms`, deduplicated in
/// first-seen order.
pub fn likely_culprits(symptoms: &str) -> Vec<&'static str> {
    let mut culprits: Vec<&'static str> = Vec::new();
    if symptoms.is_empty() {
        return culprits;
    }

    for (symptom, ingredients) in ALLERGY_SYMPTOMS {
        if symptoms.contains(symptom) {
            for ingredient in ingredients.iter() {
                if !culprits.contains(ingredient) {
                    culprits.push(*ingredient);
                }
            }
        }
    }
    culprits
}

/// Remedies for the culprits that have one, or the general remedy.
pub fn remedies_for(culprits: &[&str]) -> Vec<Remedy> {
    let remedies: Vec<Remedy> = culprits
        .iter()
        .filter_map(|culprit| {
            remedy_for(culprit).map(|remedy| Remedy {
                ingredient: culprit.to_string(),
                remedy: remedy.to_string(),
            })
        })
        .collect();

    if remedies.is_empty() {
        return vec![Remedy {
            ingredient: "general".to_string(),
            remedy: "Apply cool compress and use gentle, fragrance-free products".to_string(),
        }];
    }
    remedies
}

/// Assemble the endpoint response from lowercase symptom text and an
/// optional image analysis.
pub fn build_report(symptoms: &str, image_analysis: Option<ImageAnalysis>) -> AllergyReport {
    let culprits = likely_culprits(symptoms);
    let remedies = remedies_for(&culprits);

    let mut likely: Vec<String> = culprits.iter().map(|c| c.to_string()).collect();
    if likely.is_empty()
        && image_analysis
            .as_ref()
            .is_some_and(|analysis| !analysis.observations.is_empty())
    {
        likely.push(UNKNOWN_ALLERGEN.to_string());
    }
    if likely.is_empty() {
        likely.push(SEE_IMAGE_ANALYSIS.to_string());
    }

    let symptoms_detected = if symptoms.is_empty() {
        vec![ANALYZED_FROM_IMAGE.to_string()]
    } else {
        symptoms.split(',').map(|s| s.trim().to_string()).collect()
    };

    AllergyReport {
        success: true,
        symptoms_detected,
        likely_culprits: likely,
        remedies,
        image_analysis,
        general_advice: GENERAL_ADVICE,
    }
}

/// Prompt sent with a skin-condition photo.
pub fn image_prompt(symptoms: &str, suspected: &str) -> String {
    let symptom_context = if symptoms.is_empty() {
        "No symptoms described".to_string()
    } else {
        format!("User reported symptoms: {}", symptoms)
    };
    let suspected_context = if suspected.is_empty() {
        String::new()
    } else {
        format!("Suspected ingredients: {}", suspected)
    };

    format!(
        r#"Analyze this skin condition image carefully.
{symptom_context}
{suspected_context}

Provide a detailed dermatological analysis in this exact JSON format:
{{
    "severity": "mild/moderate/severe",
    "type": "condition name (e.g., contact dermatitis, eczema, allergic reaction)",
    "confidence": 85,
    "observations": ["observation 1", "observation 2", "observation 3"],
    "recommendations": ["recommendation 1", "recommendation 2", "recommendation 3"]
}}

Be specific about visible symptoms like redness, swelling, texture changes, distribution pattern, etc.
Provide practical, actionable recommendations.
ONLY return valid JSON, no other text."#
    )
}

/// Body of a ```` ```json ```` fence, else of the first plain fence, else the
/// whole trimmed reply.
pub fn strip_code_fences(reply: &str) -> &str {
    let reply = reply.trim();

    let fenced = if let Some((_, rest)) = reply.split_once("```json") {
        Some(rest)
    } else {
        reply.split_once("```").map(|(_, rest)| rest)
    };

    match fenced {
        Some(rest) => rest.split("```").next().unwrap_or(rest).trim(),
        None => reply,
    }
}

pub fn parse_image_analysis(reply: &str) -> Result<ImageAnalysis, serde_json::Error> {
    serde_json::from_str(strip_code_fences(reply))
}

/// Analysis for a model reply: text that is not JSON gives the incomplete
/// payload, JSON without the `type` field (or with mistyped fields) gives the
/// failed payload.
pub fn analysis_from_reply(reply: &str) -> ImageAnalysis {
    match parse_image_analysis(reply) {
        Ok(analysis) => analysis,
        Err(e) if e.is_data() => {
            tracing::warn!("Image analysis reply did not match the schema: {}", e);
            ImageAnalysis::failed()
        }
        Err(e) => {
            tracing::warn!("Image analysis reply was not JSON: {}", e);
            ImageAnalysis::incomplete()
        }
    }
}
