//! Risk Classifier Adapter
//!
//! Two strategies behind one `classify` contract:
//! - `ModelBacked`: the trained model loaded from disk at startup
//! - `RuleBased`: fixed thresholds on the composite risk score
//!
//! A model failure never surfaces to the caller; the adapter logs it and
//! answers with the rule-based result instead.

pub mod artifacts;

pub use artifacts::{
    LabelEncoder, LinearClassifier, ModelError, ModelOutput, RiskModel, StandardScaler, MODEL_INPUT_WIDTH,
};

use crate::features::FeatureRecord;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Scores below this are Low.
pub const LOW_RISK_THRESHOLD: f64 = 20.0;
/// Scores below this (and at least [`LOW_RISK_THRESHOLD`]) are Moderate.
pub const MODERATE_RISK_THRESHOLD: f64 = 40.0;

/// Confidence reported when the model has no probability output.
pub const MODEL_DEFAULT_CONFIDENCE: f64 = 95.0;
/// Confidence reported for rule-based results.
pub const RULE_BASED_CONFIDENCE: f64 = 87.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
}

impl RiskCategory {
    /// Threshold mapping: <20 Low, <40 Moderate, else High.
    pub fn from_score(risk_score: f64) -> Self {
        if risk_score < LOW_RISK_THRESHOLD {
            RiskCategory::Low
        } else if risk_score < MODERATE_RISK_THRESHOLD {
            RiskCategory::Moderate
        } else {
            RiskCategory::High
        }
    }

    pub fn is_safe(self) -> bool {
        matches!(self, RiskCategory::Low | RiskCategory::Moderate)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::High => "High",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskCategory::Low),
            "moderate" => Ok(RiskCategory::Moderate),
            "high" => Ok(RiskCategory::High),
            _ => Err(ModelError::UnknownLabel(s.to_string())),
        }
    }
}

/// Which path produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModelSource {
    #[serde(rename = "ML")]
    Ml,
    #[serde(rename = "Rule-based")]
    RuleBased,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub category: RiskCategory,
    pub confidence: f64,
    pub source: ModelSource,
}

/// Scoring strategy, chosen once at startup.
#[derive(Debug, Clone)]
pub enum RiskClassifier {
    ModelBacked(RiskModel),
    RuleBased,
}

impl RiskClassifier {
    /// Load the model from `dir`, degrading to rule-based mode when any
    /// artifact is missing or malformed.
    pub fn load(dir: &Path) -> Self {
        match RiskModel::load(dir) {
            Ok(model) => {
                tracing::info!("Loaded risk model artifacts from {:?}", dir);
                RiskClassifier::ModelBacked(model)
            }
            Err(e) => {
                tracing::warn!("Could not load risk model ({}), using rule-based scoring", e);
                RiskClassifier::RuleBased
            }
        }
    }

    pub fn is_model_backed(&self) -> bool {
        matches!(self, RiskClassifier::ModelBacked(_))
    }

    pub fn classify(&self, features: &FeatureRecord) -> Classification {
        if let RiskClassifier::ModelBacked(model) = self {
            match model.predict(&model_input(features)) {
                Ok(output) => {
                    return Classification {
                        category: output.category,
                        confidence: output.confidence.unwrap_or(MODEL_DEFAULT_CONFIDENCE),
                        source: ModelSource::Ml,
                    };
                }
                Err(e) => tracing::warn!("ML prediction error: {}", e),
            }
        }

        Classification {
            category: RiskCategory::from_score(features.risk_score),
            confidence: RULE_BASED_CONFIDENCE,
            source: ModelSource::RuleBased,
        }
    }
}

/// Model input row. The last three slots are reserved by the trained model
/// and always zero.
pub fn model_input(features: &FeatureRecord) -> [f64; MODEL_INPUT_WIDTH] {
    [
        features.ingredient_count as f64,
        features.high_risk_count as f64,
        features.moderate_risk_count as f64,
        features.comedogenic_count as f64,
        features.irritant_count as f64,
        features.beneficial_count as f64,
        features.beneficial_score,
        0.0,
        0.0,
        0.0,
    ]
}

/// Final verdict for one product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub safe: bool,
    /// Composite score rounded to one decimal.
    pub risk_score: f64,
    pub risk_category: RiskCategory,
    pub confidence: f64,
    pub model_used: ModelSource,
}

impl Prediction {
    pub fn new(features: &FeatureRecord, classification: Classification) -> Self {
        Self {
            safe: classification.category.is_safe(),
            risk_score: (features.risk_score * 10.0).round() / 10.0,
            risk_category: classification.category,
            confidence: classification.confidence,
            model_used: classification.source,
        }
    }
}
