//! Ingredient knowledge base
//!
//! All tables are embedded `static` data. [`KnowledgeBase`] indexes them once
//! into read-only hash maps; it is never mutated after construction, so the
//! shared instance needs no synchronization.
//!
//! - `ingredients`: risk weights, harm-category patterns, skin-type avoid lists
//! - `products`: product catalog and per-skin-type suggestions
//! - `allergy`: symptom culprits and remedies

pub mod allergy;
pub mod ingredients;
pub mod products;

pub use allergy::{remedy_for, ALLERGY_SYMPTOMS, REMEDIES};
pub use ingredients::{HarmCategory, IngredientRecord, SkinType, INGREDIENTS, UNKNOWN_INGREDIENT};
pub use products::{concern_skin_type, ProductCatalogEntry, SkinTypeSuggestion, CATALOG, SUGGESTIONS};

use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// Read-only index over the embedded tables.
#[derive(Debug)]
pub struct KnowledgeBase {
    ingredients: FxHashMap<&'static str, &'static IngredientRecord>,
    products: FxHashMap<&'static str, &'static ProductCatalogEntry>,
}

impl KnowledgeBase {
    /// Shared instance built on first use.
    pub fn builtin() -> &'static KnowledgeBase {
        static INSTANCE: OnceLock<KnowledgeBase> = OnceLock::new();
        INSTANCE.get_or_init(KnowledgeBase::build)
    }

    fn build() -> Self {
        let ingredients = INGREDIENTS
            .iter()
            .map(|record| (record.name, record))
            .collect();
        let products = CATALOG
            .iter()
            .map(|entry| (entry.key, entry))
            .collect();

        Self { ingredients, products }
    }

    /// Exact lookup by lowercase name.
    pub fn ingredient(&self, name: &str) -> Option<&'static IngredientRecord> {
        self.ingredients.get(name).copied()
    }

    /// Lookup falling back to [`UNKNOWN_INGREDIENT`].
    pub fn ingredient_or_default(&self, name: &str) -> &'static IngredientRecord {
        self.ingredient(name).unwrap_or(&UNKNOWN_INGREDIENT)
    }

    pub fn is_beneficial(&self, name: &str) -> bool {
        self.ingredient(name).is_some_and(|record| record.beneficial)
    }

    /// Exact lookup by lowercase product name.
    pub fn product(&self, key: &str) -> Option<&'static ProductCatalogEntry> {
        self.products.get(key).copied()
    }

    /// Catalog entries in table order.
    pub fn catalog(&self) -> &'static [ProductCatalogEntry] {
        CATALOG
    }

    /// Known ingredients in table order.
    pub fn known_ingredients(&self) -> &'static [IngredientRecord] {
        INGREDIENTS
    }

    /// Suggestions for a skin type, if one is tabulated.
    pub fn suggestion(&self, skin_type: &str) -> Option<&'static SkinTypeSuggestion> {
        SUGGESTIONS.iter().find(|s| s.skin_type == skin_type)
    }

    /// Suggestions for a lowercase skin type and concern: the skin type's
    /// entry, else the entry the concern maps to (an unknown concern maps to
    /// the skin type), else `normal`.
    pub fn recommend(&self, skin_type: &str, concern: &str) -> &'static SkinTypeSuggestion {
        let mapped = concern_skin_type(concern).unwrap_or(skin_type);
        self.suggestion(skin_type)
            .or_else(|| self.suggestion(mapped))
            .unwrap_or(&SUGGESTIONS[SUGGESTIONS.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_ingredient_uses_default_record() {
        let kb = KnowledgeBase::builtin();
        let record = kb.ingredient_or_default("xyzcompound123");
        assert_eq!(record.risk_weight, 30);
        assert!(!record.beneficial);
        assert!(!kb.is_beneficial("xyzcompound123"));
    }

    #[test]
    fn test_lookups_are_exact() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.ingredient("glycerin").map(|r| r.risk_weight), Some(5));
        assert!(kb.ingredient("Glycerin").is_none());
        assert!(kb.product("cerave moisturizing cream").is_some());
        assert!(kb.product("cerave").is_none());
        assert_eq!(kb.catalog().len(), CATALOG.len());
    }

    #[test]
    fn test_recommend_lookup_order() {
        let kb = KnowledgeBase::builtin();
        // skin type wins over concern
        assert_eq!(kb.recommend("oily", "dryness").skin_type, "oily");
        assert_eq!(kb.recommend("combination", "sensitivity").skin_type, "sensitive");
        assert_eq!(kb.recommend("combination", "general").skin_type, "normal");
        assert_eq!(kb.recommend("combination", "aging").skin_type, "normal");
    }
}
