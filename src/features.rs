//! Feature Extractor
//!
//! Converts an ingredient sequence into counts by harm category, a
//! beneficial-ingredient ratio, and the composite risk score.
//!
//! The composite score is a fixed linear weighting, not a learned one:
//! `min(100, (high*3 + moderate*2 + comedogenic*1.5 + irritant*1) * 10)`.

use crate::knowledge::{HarmCategory, KnowledgeBase};
use serde::Serialize;

pub const HIGH_RISK_WEIGHT: f64 = 3.0;
pub const MODERATE_RISK_WEIGHT: f64 = 2.0;
pub const COMEDOGENIC_WEIGHT: f64 = 1.5;
pub const IRRITANT_WEIGHT: f64 = 1.0;
pub const RISK_SCORE_SCALE: f64 = 10.0;
pub const MAX_RISK_SCORE: f64 = 100.0;

/// Per-request numeric summary of an ingredient list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FeatureRecord {
    pub ingredient_count: usize,
    pub high_risk_count: usize,
    pub moderate_risk_count: usize,
    pub comedogenic_count: usize,
    pub irritant_count: usize,
    pub beneficial_count: usize,
    /// Composite risk, clamped to [0, 100].
    pub risk_score: f64,
    /// Percentage of beneficial ingredients; 0 for an empty list.
    pub beneficial_score: f64,
}

impl FeatureRecord {
    fn count_mut(&mut self, category: HarmCategory) -> &mut usize {
        match category {
            HarmCategory::HighRisk => &mut self.high_risk_count,
            HarmCategory::ModerateRisk => &mut self.moderate_risk_count,
            HarmCategory::Comedogenic => &mut self.comedogenic_count,
            HarmCategory::Irritant => &mut self.irritant_count,
        }
    }
}

/// Compute the feature record for a lowercase, trimmed ingredient sequence.
///
/// Total: any sequence, including an empty one, yields a record.
pub fn extract_features<S: AsRef<str>>(ingredients: &[S], kb: &KnowledgeBase) -> FeatureRecord {
    let mut features = FeatureRecord {
        ingredient_count: ingredients.len(),
        ..FeatureRecord::default()
    };

    for ingredient in ingredients {
        let ingredient = ingredient.as_ref();

        // An ingredient may land in several categories
        for category in HarmCategory::ALL {
            if category.matches(ingredient) {
                *features.count_mut(category) += 1;
            }
        }

        if kb.is_beneficial(ingredient) {
            features.beneficial_count += 1;
        }
    }

    features.risk_score = composite_risk_score(&features);
    features.beneficial_score = if features.ingredient_count > 0 {
        features.beneficial_count as f64 / features.ingredient_count as f64 * 100.0
    } else {
        0.0
    };

    features
}

fn composite_risk_score(features: &FeatureRecord) -> f64 {
    let weighted = features.high_risk_count as f64 * HIGH_RISK_WEIGHT
        + features.moderate_risk_count as f64 * MODERATE_RISK_WEIGHT
        + features.comedogenic_count as f64 * COMEDOGENIC_WEIGHT
        + features.irritant_count as f64 * IRRITANT_WEIGHT;

    (weighted * RISK_SCORE_SCALE).clamp(0.0, MAX_RISK_SCORE)
}
