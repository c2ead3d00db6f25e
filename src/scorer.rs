//! Product Scorer - coordinator for the ingredient-risk pipeline
//!
//! Resolver -> Feature Extractor -> Risk Classifier -> Ingredient Analyzer,
//! merged into one [`ProductReport`].

use crate::analyzer::{analyze_ingredients, UserProfile};
use crate::classifier::{Prediction, RiskClassifier};
use crate::features::extract_features;
use crate::knowledge::KnowledgeBase;
use crate::resolver::{resolve_product, ProductDetails};
use serde::Serialize;
use thiserror::Error;

/// Skin type assumed when the request omits one.
pub const DEFAULT_SKIN_TYPE: &str = "normal";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Product information required")]
    MissingProduct,
}

/// One scoring request as received from a client.
#[derive(Debug, Clone, Default)]
pub struct ScoreRequest {
    pub product: String,
    pub skin_type: Option<String>,
    pub allergies: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientSummary {
    pub total_ingredients: usize,
    pub high_risk_count: usize,
    pub moderate_risk_count: usize,
    pub beneficial_count: usize,
    pub high_risk_ingredients: Vec<String>,
    pub beneficial_ingredients: Vec<String>,
    pub all_ingredients: Vec<String>,
}

/// Complete scoring response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductReport {
    pub success: bool,
    pub product_name: String,
    pub prediction: Prediction,
    pub analysis: IngredientSummary,
    pub allergy_warnings: Vec<String>,
    pub skin_type_warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub skin_type_compatibility: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_details: Option<ProductDetails>,
}

/// Main product scorer
pub struct ProductScorer {
    kb: &'static KnowledgeBase,
    classifier: RiskClassifier,
}

impl ProductScorer {
    pub fn new(classifier: RiskClassifier) -> Self {
        Self::with_knowledge_base(KnowledgeBase::builtin(), classifier)
    }

    pub fn with_knowledge_base(kb: &'static KnowledgeBase, classifier: RiskClassifier) -> Self {
        Self { kb, classifier }
    }

    pub fn models_loaded(&self) -> bool {
        self.classifier.is_model_backed()
    }

    pub fn knowledge_base(&self) -> &'static KnowledgeBase {
        self.kb
    }

    /// Score one product. Only blank input fails; everything past
    /// validation is total and always produces a full report.
    pub fn score(&self, request: &ScoreRequest) -> Result<ProductReport, ValidationError> {
        if request.product.trim().is_empty() {
            return Err(ValidationError::MissingProduct);
        }

        let skin_type = request
            .skin_type
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_else(|| DEFAULT_SKIN_TYPE.to_string());
        let allergies = request
            .allergies
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();

        let resolved = resolve_product(&request.product, self.kb);
        let features = extract_features(&resolved.ingredients, self.kb);
        let classification = self.classifier.classify(&features);
        let prediction = Prediction::new(&features, classification);

        let analysis = analyze_ingredients(
            &resolved.ingredients,
            UserProfile { allergies: &allergies, skin_type: &skin_type },
            self.kb,
        );

        tracing::debug!(
            "Scored '{}': {} ingredients, score {}, {} via {:?}",
            resolved.product_name,
            features.ingredient_count,
            prediction.risk_score,
            prediction.risk_category,
            prediction.model_used
        );

        let skin_type_compatibility = analysis.skin_type_compatibility();

        Ok(ProductReport {
            success: true,
            product_name: resolved.product_name,
            prediction,
            analysis: IngredientSummary {
                total_ingredients: resolved.ingredients.len(),
                high_risk_count: analysis.high_risk.len(),
                moderate_risk_count: analysis.moderate_risk.len(),
                beneficial_count: analysis.beneficial.len(),
                high_risk_ingredients: analysis.high_risk,
                beneficial_ingredients: analysis.beneficial,
                all_ingredients: resolved.ingredients,
            },
            allergy_warnings: analysis.allergy_warnings,
            skin_type_warnings: analysis.skin_type_warnings,
            recommendations: analysis.recommendations,
            skin_type_compatibility,
            product_details: resolved.details,
        })
    }
}
