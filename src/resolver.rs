//! Product Resolver
//!
//! Free text either names a catalog product (exact, case-insensitive) or is
//! itself a comma-separated ingredient list. No fuzzy matching.

use crate::knowledge::{KnowledgeBase, ProductCatalogEntry};
use serde::Serialize;

/// Product name reported for raw ingredient lists.
pub const CUSTOM_PRODUCT_NAME: &str = "Custom Product";

/// Catalog metadata surfaced in the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDetails {
    pub name: &'static str,
    pub brand: &'static str,
    pub category: &'static str,
    pub suitable_for: &'static [&'static str],
    pub concerns_addressed: &'static [&'static str],
}

impl From<&ProductCatalogEntry> for ProductDetails {
    fn from(entry: &ProductCatalogEntry) -> Self {
        Self {
            name: entry.canonical_name,
            brand: entry.brand,
            category: entry.category,
            suitable_for: entry.suitable_skin_types,
            concerns_addressed: entry.concerns,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProduct {
    pub product_name: String,
    pub ingredients: Vec<String>,
    /// Present only for catalog products.
    pub details: Option<ProductDetails>,
}

/// Resolve free text to an ingredient list.
///
/// Callers reject blank input before calling this.
pub fn resolve_product(input: &str, kb: &KnowledgeBase) -> ResolvedProduct {
    let normalized = input.trim().to_lowercase();

    match kb.product(&normalized) {
        Some(entry) => ResolvedProduct {
            product_name: entry.canonical_name.to_string(),
            ingredients: split_ingredients(entry.raw_ingredients),
            details: Some(ProductDetails::from(entry)),
        },
        None => ResolvedProduct {
            product_name: CUSTOM_PRODUCT_NAME.to_string(),
            ingredients: split_ingredients(&normalized),
            details: None,
        },
    }
}

/// Split on commas, trim and lowercase each token. Empty tokens (from
/// doubled or trailing commas) are kept and score as unknown ingredients.
pub fn split_ingredients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|token| token.trim().to_lowercase())
        .collect()
}
