//! Ingredient Analyzer
//!
//! Per-ingredient risk bands, allergy and skin-type warnings, and the
//! ordered recommendation list shown alongside a prediction.

use crate::knowledge::{KnowledgeBase, SkinType};

/// Weight at or above which an ingredient is reported as high risk.
pub const HIGH_BAND_WEIGHT: u8 = 50;
/// Weight at or above which an ingredient is reported as moderate risk.
pub const MODERATE_BAND_WEIGHT: u8 = 25;
/// Beneficial share below which more beneficial ingredients are suggested.
pub const MIN_BENEFICIAL_SHARE: f64 = 0.3;
/// How many high-risk ingredients the avoid recommendation names.
pub const AVOID_LIST_LEN: usize = 3;

pub const ALLERGEN_ALTERNATIVE_ADVICE: &str = "🚫 Choose alternatives without your allergens";
pub const MORE_BENEFICIAL_ADVICE: &str = "💡 Look for products with more beneficial ingredients";
pub const PATCH_TEST_ADVICE: &str = "🧪 Always patch test new products";

/// Band of a single ingredient by its knowledge-base weight.
///
/// Independent of the aggregate risk category; the two may disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    High,
    Moderate,
    Low,
}

impl RiskBand {
    pub fn for_weight(weight: u8) -> Self {
        if weight >= HIGH_BAND_WEIGHT {
            RiskBand::High
        } else if weight >= MODERATE_BAND_WEIGHT {
            RiskBand::Moderate
        } else {
            RiskBand::Low
        }
    }
}

/// User context for warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserProfile<'a> {
    /// Free-form lowercase allergy text; ingredients are matched as substrings of it.
    pub allergies: &'a str,
    /// Lowercase skin-type tag as the user supplied it.
    pub skin_type: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientAnalysis {
    pub high_risk: Vec<String>,
    pub moderate_risk: Vec<String>,
    pub beneficial: Vec<String>,
    pub allergy_warnings: Vec<String>,
    pub skin_type_warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl IngredientAnalysis {
    pub fn skin_type_compatibility(&self) -> &'static str {
        if self.skin_type_warnings.is_empty() {
            "✅ Suitable"
        } else {
            "⚠️ Use with caution"
        }
    }
}

pub fn analyze_ingredients(
    ingredients: &[String],
    profile: UserProfile<'_>,
    kb: &KnowledgeBase,
) -> IngredientAnalysis {
    let skin_type = SkinType::parse(profile.skin_type);
    let mut analysis = IngredientAnalysis::default();

    for ingredient in ingredients {
        let record = kb.ingredient_or_default(ingredient);

        match RiskBand::for_weight(record.risk_weight) {
            RiskBand::High => analysis.high_risk.push(ingredient.clone()),
            RiskBand::Moderate => analysis.moderate_risk.push(ingredient.clone()),
            RiskBand::Low => {}
        }

        if record.beneficial {
            analysis.beneficial.push(ingredient.clone());
        }

        if !profile.allergies.is_empty() && profile.allergies.contains(ingredient.as_str()) {
            analysis
                .allergy_warnings
                .push(format!("⚠️ Contains {} (you're allergic)", ingredient));
        }

        if skin_type.is_some_and(|t| t.is_concern(ingredient)) {
            analysis.skin_type_warnings.push(format!(
                "⚠️ {} may not be suitable for {} skin",
                ingredient, profile.skin_type
            ));
        }
    }

    analysis.recommendations = recommendations(&analysis, ingredients.len());
    analysis
}

fn recommendations(analysis: &IngredientAnalysis, ingredient_count: usize) -> Vec<String> {
    let mut out = Vec::new();

    if !analysis.high_risk.is_empty() {
        let avoid: Vec<&str> = analysis
            .high_risk
            .iter()
            .take(AVOID_LIST_LEN)
            .map(String::as_str)
            .collect();
        out.push(format!("⚠️ Consider avoiding: {}", avoid.join(", ")));
    }

    if !analysis.allergy_warnings.is_empty() {
        out.push(ALLERGEN_ALTERNATIVE_ADVICE.to_string());
    }

    if (analysis.beneficial.len() as f64) < ingredient_count as f64 * MIN_BENEFICIAL_SHARE {
        out.push(MORE_BENEFICIAL_ADVICE.to_string());
    }

    out.push(PATCH_TEST_ADVICE.to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn analyze(items: &[&str], allergies: &str, skin_type: &str) -> IngredientAnalysis {
        analyze_ingredients(&owned(items), UserProfile { allergies, skin_type }, KnowledgeBase::builtin())
    }

    #[test]
    fn test_bands() {
        assert_eq!(RiskBand::for_weight(70), RiskBand::High);
        assert_eq!(RiskBand::for_weight(50), RiskBand::High);
        assert_eq!(RiskBand::for_weight(49), RiskBand::Moderate);
        assert_eq!(RiskBand::for_weight(25), RiskBand::Moderate);
        assert_eq!(RiskBand::for_weight(24), RiskBand::Low);
    }

    #[test]
    fn test_unknown_ingredient_is_moderate_band() {
        let analysis = analyze(&["xyzcompound123"], "", "normal");
        assert_eq!(analysis.moderate_risk, owned(&["xyzcompound123"]));
        assert!(analysis.high_risk.is_empty());
        assert!(analysis.beneficial.is_empty());
    }

    #[test]
    fn test_single_allergy_warning() {
        let analysis = analyze(&["water", "fragrance", "glycerin"], "fragrance", "normal");
        assert_eq!(analysis.allergy_warnings.len(), 1);
        assert!(analysis.allergy_warnings[0].contains("fragrance"));
        assert!(analysis.recommendations.contains(&ALLERGEN_ALTERNATIVE_ADVICE.to_string()));
    }

    #[test]
    fn test_empty_allergy_text_never_warns() {
        let analysis = analyze(&["fragrance"], "", "normal");
        assert!(analysis.allergy_warnings.is_empty());
    }

    #[test]
    fn test_skin_type_warnings() {
        let analysis = analyze(&["water", "alcohol", "sls"], "", "dry");
        assert_eq!(
            analysis.skin_type_warnings,
            vec![
                "⚠️ alcohol may not be suitable for dry skin".to_string(),
                "⚠️ sls may not be suitable for dry skin".to_string(),
            ]
        );
        assert_eq!(analysis.skin_type_compatibility(), "⚠️ Use with caution");

        let normal = analyze(&["water", "alcohol", "sls"], "", "normal");
        assert!(normal.skin_type_warnings.is_empty());
        assert_eq!(normal.skin_type_compatibility(), "✅ Suitable");
    }

    #[test]
    fn test_recommendation_order() {
        let analysis = analyze(
            &["fragrance", "parabens", "sls", "alcohol", "water"],
            "parabens",
            "normal",
        );
        assert_eq!(
            analysis.recommendations,
            vec![
                "⚠️ Consider avoiding: fragrance, parabens, sls".to_string(),
                ALLERGEN_ALTERNATIVE_ADVICE.to_string(),
                MORE_BENEFICIAL_ADVICE.to_string(),
                PATCH_TEST_ADVICE.to_string(),
            ]
        );
    }

    #[test]
    fn test_beneficial_list_only_gets_patch_test() {
        let analysis = analyze(&["water", "glycerin", "niacinamide"], "", "normal");
        assert_eq!(analysis.beneficial.len(), 3);
        assert_eq!(analysis.recommendations, vec![PATCH_TEST_ADVICE.to_string()]);
    }
}
