//! Product catalog and per-skin-type product suggestions.

/// One catalog product, keyed by its lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductCatalogEntry {
    pub key: &'static str,
    pub canonical_name: &'static str,
    /// Comma-separated ingredient list as printed on the label.
    pub raw_ingredients: &'static str,
    pub category: &'static str,
    pub brand: &'static str,
    pub concerns: &'static [&'static str],
    pub suitable_skin_types: &'static [&'static str],
}

pub static CATALOG: &[ProductCatalogEntry] = &[
    ProductCatalogEntry {
        key: "cerave moisturizing cream",
        canonical_name: "CeraVe Moisturizing Cream",
        raw_ingredients: "water, glycerin, cetearyl alcohol, caprylic triglyceride, cetyl alcohol, ceramide np, ceramide ap, ceramide eop, carbomer, dimethicone, hyaluronic acid, cholesterol, sodium lauroyl lactylate, xanthan gum",
        category: "moisturizer",
        brand: "CeraVe",
        concerns: &["dry skin", "eczema", "sensitive skin"],
        suitable_skin_types: &["dry", "normal", "sensitive"],
    },
    ProductCatalogEntry {
        key: "cerave hydrating cleanser",
        canonical_name: "CeraVe Hydrating Facial Cleanser",
        raw_ingredients: "water, glycerin, cetearyl alcohol, phenoxyethanol, stearyl alcohol, cetyl alcohol, ceramide np, ceramide ap, ceramide eop, carbomer, hyaluronic acid, cholesterol, sodium lauroyl lactylate, xanthan gum",
        category: "cleanser",
        brand: "CeraVe",
        concerns: &["dry skin", "normal skin"],
        suitable_skin_types: &["dry", "normal", "sensitive"],
    },
    ProductCatalogEntry {
        key: "neutrogena hydro boost",
        canonical_name: "Neutrogena Hydro Boost Water Gel",
        raw_ingredients: "water, dimethicone, glycerin, dimethicone crosspolymer, phenoxyethanol, dimethicone peg-10 phosphate, synthetic beeswax, trehalose, sodium hyaluronate, ethylhexylglycerin, cetearyl olivate, sorbitan olivate, dimethiconol, sodium polyacrylate",
        category: "moisturizer",
        brand: "Neutrogena",
        concerns: &["hydration", "dry skin"],
        suitable_skin_types: &["all"],
    },
    ProductCatalogEntry {
        key: "la roche-posay toleriane",
        canonical_name: "La Roche-Posay Toleriane Double Repair Moisturizer",
        raw_ingredients: "water, glycerin, dimethicone, niacinamide, cetearyl alcohol, phenoxyethanol, ceramide np, ceramide ap, ceramide eop, sodium hyaluronate",
        category: "moisturizer",
        brand: "La Roche-Posay",
        concerns: &["sensitive skin", "redness"],
        suitable_skin_types: &["sensitive", "normal", "dry"],
    },
    ProductCatalogEntry {
        key: "the ordinary niacinamide",
        canonical_name: "The Ordinary Niacinamide 10% + Zinc 1%",
        raw_ingredients: "water, niacinamide, pentylene glycol, zinc pca, dimethyl isosorbide, tamarindus indica seed gum, xanthan gum, isoceteth-20, ethoxydiglycol, phenoxyethanol, chlorphenesin",
        category: "serum",
        brand: "The Ordinary",
        concerns: &["acne", "pores", "oil control"],
        suitable_skin_types: &["oily", "acne", "combination"],
    },
];

// ============================================================================
// Skin Type Suggestions
// ============================================================================

/// Products and ingredients suggested for one skin type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkinTypeSuggestion {
    pub skin_type: &'static str,
    pub products: &'static [&'static str],
    pub ingredients: &'static [&'static str],
}

pub static SUGGESTIONS: &[SkinTypeSuggestion] = &[
    SkinTypeSuggestion {
        skin_type: "dry",
        products: &["CeraVe Moisturizing Cream", "La Roche-Posay Toleriane", "Neutrogena Hydro Boost"],
        ingredients: &["Hyaluronic Acid", "Glycerin", "Ceramides", "Shea Butter"],
    },
    SkinTypeSuggestion {
        skin_type: "oily",
        products: &["Cetaphil Oil Control", "La Roche-Posay Effaclar", "Neutrogena Oil-Free"],
        ingredients: &["Niacinamide", "Salicylic Acid", "Tea Tree Oil"],
    },
    SkinTypeSuggestion {
        skin_type: "sensitive",
        products: &["Vanicream Gentle Cleanser", "CeraVe Hydrating Cleanser", "Aveeno Ultra-Calming"],
        ingredients: &["Colloidal Oatmeal", "Centella Asiatica", "Allantoin"],
    },
    SkinTypeSuggestion {
        skin_type: "acne",
        products: &["CeraVe SA Cleanser", "Paula's Choice BHA", "The Ordinary Niacinamide"],
        ingredients: &["Salicylic Acid", "Benzoyl Peroxide", "Niacinamide", "Tea Tree Oil"],
    },
    SkinTypeSuggestion {
        skin_type: "normal",
        products: &["CeraVe Daily Moisturizer", "Neutrogena Gentle Cleanser", "Simple Moisturizer"],
        ingredients: &["Hyaluronic Acid", "Vitamin E", "Glycerin"],
    },
];

/// Skin type a user concern maps onto, if the concern is known.
pub fn concern_skin_type(concern: &str) -> Option<&'static str> {
    match concern {
        "acne" => Some("acne"),
        "aging" => Some("normal"),
        "dryness" => Some("dry"),
        "dark_spots" => Some("normal"),
        "sensitivity" => Some("sensitive"),
        _ => None,
    }
}
