//! Ingredient lookup tables
//!
//! Static risk weights, benefit flags and categories for known cosmetic
//! ingredients, plus the substring lists used for harm-category matching and
//! the per-skin-type avoid lists.

/// One known ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientRecord {
    pub name: &'static str,
    /// Assumed harm potential, 0-100.
    pub risk_weight: u8,
    pub beneficial: bool,
    pub category: &'static str,
}

/// Record used for any ingredient missing from [`INGREDIENTS`].
pub const UNKNOWN_INGREDIENT: IngredientRecord = IngredientRecord {
    name: "",
    risk_weight: 30,
    beneficial: false,
    category: "unknown",
};

// ============================================================================
// EMBEDDED INGREDIENT DATA
// ============================================================================

pub static INGREDIENTS: &[IngredientRecord] = &[
    IngredientRecord { name: "water", risk_weight: 0, beneficial: true, category: "solvent" },
    IngredientRecord { name: "aqua", risk_weight: 0, beneficial: true, category: "solvent" },
    IngredientRecord { name: "glycerin", risk_weight: 5, beneficial: true, category: "humectant" },
    IngredientRecord { name: "niacinamide", risk_weight: 10, beneficial: true, category: "vitamin" },
    IngredientRecord { name: "hyaluronic acid", risk_weight: 5, beneficial: true, category: "humectant" },
    IngredientRecord { name: "sodium hyaluronate", risk_weight: 5, beneficial: true, category: "humectant" },
    IngredientRecord { name: "retinol", risk_weight: 40, beneficial: true, category: "anti-aging" },
    IngredientRecord { name: "fragrance", risk_weight: 60, beneficial: false, category: "fragrance" },
    IngredientRecord { name: "parfum", risk_weight: 60, beneficial: false, category: "fragrance" },
    IngredientRecord { name: "alcohol", risk_weight: 50, beneficial: false, category: "solvent" },
    IngredientRecord { name: "alcohol denat", risk_weight: 50, beneficial: false, category: "solvent" },
    IngredientRecord { name: "parabens", risk_weight: 70, beneficial: false, category: "preservative" },
    IngredientRecord { name: "methylparaben", risk_weight: 70, beneficial: false, category: "preservative" },
    IngredientRecord { name: "propylparaben", risk_weight: 70, beneficial: false, category: "preservative" },
    IngredientRecord { name: "sulfates", risk_weight: 65, beneficial: false, category: "surfactant" },
    IngredientRecord { name: "sls", risk_weight: 65, beneficial: false, category: "surfactant" },
    IngredientRecord { name: "sodium lauryl sulfate", risk_weight: 65, beneficial: false, category: "surfactant" },
    IngredientRecord { name: "salicylic acid", risk_weight: 30, beneficial: true, category: "exfoliant" },
    IngredientRecord { name: "vitamin c", risk_weight: 15, beneficial: true, category: "antioxidant" },
    IngredientRecord { name: "ascorbic acid", risk_weight: 15, beneficial: true, category: "antioxidant" },
    IngredientRecord { name: "cetearyl alcohol", risk_weight: 10, beneficial: true, category: "emollient" },
    IngredientRecord { name: "cetyl alcohol", risk_weight: 10, beneficial: true, category: "emollient" },
    IngredientRecord { name: "shea butter", risk_weight: 5, beneficial: true, category: "emollient" },
    IngredientRecord { name: "coconut oil", risk_weight: 35, beneficial: true, category: "oil" },
    IngredientRecord { name: "jojoba oil", risk_weight: 10, beneficial: true, category: "oil" },
];

// ============================================================================
// Harm Categories
// ============================================================================

static HIGH_RISK: &[&str] = &[
    "parabens", "methylparaben", "propylparaben", "butylparaben",
    "formaldehyde", "toluene", "phthalates", "triclosan",
];

static MODERATE_RISK: &[&str] = &[
    "sulfates", "sls", "sodium lauryl sulfate", "fragrance", "parfum", "alcohol denat",
];

static COMEDOGENIC: &[&str] = &["coconut oil", "cocoa butter", "isopropyl myristate"];

static IRRITANTS: &[&str] = &["menthol", "camphor", "eucalyptus"];

/// Named set of ingredient-name substrings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarmCategory {
    HighRisk,
    ModerateRisk,
    Comedogenic,
    Irritant,
}

impl HarmCategory {
    pub const ALL: [HarmCategory; 4] = [
        HarmCategory::HighRisk,
        HarmCategory::ModerateRisk,
        HarmCategory::Comedogenic,
        HarmCategory::Irritant,
    ];

    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            HarmCategory::HighRisk => HIGH_RISK,
            HarmCategory::ModerateRisk => MODERATE_RISK,
            HarmCategory::Comedogenic => COMEDOGENIC,
            HarmCategory::Irritant => IRRITANTS,
        }
    }

    /// True when any pattern of this category occurs inside `ingredient`.
    ///
    /// Containment, not equality: "parabens" never matches "methylparaben"
    /// but "sls" matches any name that happens to contain those letters.
    pub fn matches(self, ingredient: &str) -> bool {
        self.patterns().iter().any(|pattern| ingredient.contains(pattern))
    }
}

// ============================================================================
// Skin Type Concerns
// ============================================================================

/// Skin types that carry an avoid list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkinType {
    Sensitive,
    Dry,
    Oily,
    Acne,
}

impl SkinType {
    /// Table order; chat context resolution depends on it.
    pub const ALL: [SkinType; 4] = [SkinType::Sensitive, SkinType::Dry, SkinType::Oily, SkinType::Acne];

    /// Parse a lowercase tag. Types without an avoid list ("normal",
    /// "combination", ...) return `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "sensitive" => Some(SkinType::Sensitive),
            "dry" => Some(SkinType::Dry),
            "oily" => Some(SkinType::Oily),
            "acne" => Some(SkinType::Acne),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SkinType::Sensitive => "sensitive",
            SkinType::Dry => "dry",
            SkinType::Oily => "oily",
            SkinType::Acne => "acne",
        }
    }

    /// Ingredient names considered unsuitable for this skin type.
    pub fn concerns(self) -> &'static [&'static str] {
        match self {
            SkinType::Sensitive => &["fragrance", "parfum", "alcohol", "sulfates", "retinol", "alcohol denat"],
            SkinType::Dry => &["alcohol", "sulfates", "alcohol denat", "sls"],
            SkinType::Oily => &["coconut oil", "palm oil", "mineral oil"],
            SkinType::Acne => &["coconut oil", "palm oil", "isopropyl myristate"],
        }
    }

    pub fn is_concern(self, ingredient: &str) -> bool {
        self.concerns().contains(&ingredient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_names_are_normalized() {
        for record in INGREDIENTS {
            assert_eq!(record.name, record.name.trim().to_lowercase());
            assert!(record.risk_weight <= 100);
        }
    }

    #[test]
    fn test_harm_matching_is_substring_containment() {
        assert!(HarmCategory::HighRisk.matches("butylparaben"));
        assert!(HarmCategory::HighRisk.matches("methylparaben"));
        assert!(!HarmCategory::HighRisk.matches("paraben"));
        assert!(HarmCategory::ModerateRisk.matches("fragrance (parfum)"));
        assert!(HarmCategory::Comedogenic.matches("virgin coconut oil"));
        assert!(HarmCategory::Irritant.matches("menthol crystals"));
        assert!(!HarmCategory::Irritant.matches("water"));
    }

    #[test]
    fn test_skin_type_parse() {
        assert_eq!(SkinType::parse("dry"), Some(SkinType::Dry));
        assert_eq!(SkinType::parse("normal"), None);
        for skin_type in SkinType::ALL {
            assert_eq!(SkinType::parse(skin_type.as_str()), Some(skin_type));
        }
        assert!(SkinType::Oily.is_concern("mineral oil"));
        assert!(!SkinType::Oily.is_concern("mineral"));
    }
}
