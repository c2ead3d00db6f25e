//! Skincare chat assistant
//!
//! Gathers knowledge-base context for a user message, builds the prompt for
//! the generative model, and answers from canned responses when the model is
//! unavailable.

use crate::knowledge::{IngredientRecord, KnowledgeBase, ProductCatalogEntry, SkinType, ALLERGY_SYMPTOMS};
use serde::Serialize;

pub const ANALYSIS_HINT: &str = "\n\n💡 Want a detailed safety check? Click 'Product Analysis'!";

const ANALYSIS_KEYWORDS: [&str; 4] = ["analyze", "check", "ingredients", "safe"];
const LIST_KEYWORDS: [&str; 5] = ["option", "more", "recommend", "suggest", "product name"];

const SYSTEM_PROMPT: &str = r#"You are Dermamon 🧴, a friendly skincare expert AI assistant.

YOUR CORE KNOWLEDGE:

**PRODUCTS YOU KNOW:**
1. CeraVe Moisturizing Cream - For dry/sensitive skin, contains ceramides & hyaluronic acid
2. CeraVe Hydrating Cleanser - Gentle cleanser for dry/normal/sensitive skin
3. Neutrogena Hydro Boost Water Gel - Lightweight hydration for all skin types
4. La Roche-Posay Toleriane - For sensitive skin with niacinamide & ceramides
5. The Ordinary Niacinamide 10% + Zinc 1% - For oily/acne-prone skin
6. Cetaphil Oil Control - For oily skin
7. Paula's Choice BHA - Salicylic acid exfoliant for acne
8. Vanicream Gentle Cleanser - Ultra-gentle for sensitive skin
9. Aveeno Ultra-Calming - Soothes sensitive/irritated skin

**KEY INGREDIENTS:**
- Niacinamide: Brightening, oil control, pore minimizing (safe, risk 10/100)
- Hyaluronic Acid: Holds 1000x its weight in water (very safe, risk 5/100)
- Ceramides: Repair skin barrier, essential for dry/damaged skin (safe, risk 10/100)
- Salicylic Acid: Unclogs pores, treats acne (moderate risk 30/100)
- Retinol: Anti-aging but can irritate (higher risk 40/100)
- Vitamin C: Brightening, antioxidant (low risk 15/100)
- Glycerin: Humectant, draws moisture (very safe, risk 5/100)

**HARMFUL TO AVOID:**
- Parabens (risk 70/100): Hormone disruptors
- Sulfates/SLS (risk 65/100): Harsh, strip natural oils
- Fragrance/Parfum (risk 60/100): Common allergen
- Alcohol Denat (risk 50/100): Very drying

**SKIN TYPE RECOMMENDATIONS:**
- Dry Skin: Hyaluronic acid, ceramides, glycerin, shea butter. Avoid alcohol & sulfates.
  Best: CeraVe Moisturizing Cream, La Roche-Posay Toleriane, Neutrogena Hydro Boost

- Oily Skin: Niacinamide, salicylic acid, lightweight gels. Avoid heavy oils.
  Best: The Ordinary Niacinamide, Neutrogena Hydro Boost, Cetaphil Oil Control, Paula's Choice BHA

- Sensitive Skin: Fragrance-free, minimal ingredients, soothing. Avoid fragrance, alcohol, sulfates.
  Best: La Roche-Posay Toleriane, CeraVe Hydrating Cleanser, Vanicream, Aveeno Ultra-Calming

- Acne-Prone: Salicylic acid, niacinamide, benzoyl peroxide. Avoid coconut oil.
  Best: The Ordinary Niacinamide, Paula's Choice BHA, CeraVe SA Cleanser

**PRODUCT-SPECIFIC INFO:**
- Vaseline (Petrolatum): EXCELLENT for dry skin as an occlusive (locks in moisture). NOT recommended for oily/acne-prone skin as it's very heavy and can clog pores.

**YOUR PERSONALITY:**
- Friendly and enthusiastic about skincare
- Use 1-2 emojis per response
- Keep responses concise (3-5 sentences)
- Be specific with product names when asked
- Always back up recommendations with reasoning
- Encourage trying the "Product Analysis" feature for detailed checks

**RESPONSE RULES:**
- If asked for "options" or "more" products, give 3-5 specific product names
- If asked about a product, explain its benefits and suitability
- If asked about skin type, recommend specific products for that type
- Be conversational but informative
- Don't just repeat the same response - expand with new information
"#;

const OILY_OPTIONS: &str = "For oily/acne-prone skin, try these: 🎯

1. **The Ordinary Niacinamide 10% + Zinc 1%** - Controls oil, minimizes pores
2. **Neutrogena Hydro Boost Water Gel** - Lightweight, oil-free hydration
3. **Cetaphil Oil Control** - Mattifying moisturizer
4. **Paula's Choice 2% BHA** - Exfoliates, unclogs pores
5. **La Roche-Posay Effaclar** - Oil control & acne treatment

Want to check if any of these are safe for you? Use 'Product Analysis'! 💡";

const DRY_OPTIONS: &str = "For dry skin, these are perfect: 💧

1. **CeraVe Moisturizing Cream** - Rich, with ceramides & hyaluronic acid
2. **La Roche-Posay Toleriane** - Gentle, repairs barrier
3. **Neutrogena Hydro Boost** - Lightweight but hydrating
4. **Vanicream Moisturizing Cream** - Ultra-gentle, fragrance-free
5. **Aveeno Eczema Therapy** - Soothes very dry skin

All of these are dermatologist-recommended! Want detailed analysis? 🔍";

const SENSITIVE_OPTIONS: &str = "For sensitive skin, use these gentle options: 🛡️

1. **La Roche-Posay Toleriane** - Minimal ingredients, very gentle
2. **Vanicream Gentle Cleanser** - Fragrance-free, hypoallergenic
3. **CeraVe Hydrating Cleanser** - Non-irritating, maintains barrier
4. **Aveeno Ultra-Calming** - Soothes redness & irritation
5. **Cetaphil Gentle Cleanser** - Dermatologist favorite

All fragrance-free and clinically tested! Need ingredient breakdown? 📊";

const GENERAL_OPTIONS: &str = "Here are some top-rated options: ✨

**For Hydration:**
- Neutrogena Hydro Boost
- CeraVe Moisturizing Cream

**For Acne:**
- The Ordinary Niacinamide
- Paula's Choice BHA

**For Sensitivity:**
- La Roche-Posay Toleriane
- Vanicream Gentle Cleanser

What's your skin type? I can narrow it down! 🎯";

const VASELINE_DRY: &str = "Yes! Vaseline (petrolatum) is EXCELLENT for dry skin! 💧 It works as an occlusive - meaning it locks moisture into your skin. Apply it over a moisturizer for best results. It's very safe and effective for very dry, chapped skin. Not recommended for face if you have oily/acne-prone skin though!";
const VASELINE_OILY: &str = "Not ideal for oily/acne-prone skin! ⚠️ Vaseline is very occlusive and heavy, which can clog pores and worsen breakouts. For oily skin, try lightweight gel moisturizers like Neutrogena Hydro Boost or The Ordinary Niacinamide instead! 🎯";
const VASELINE_GENERAL: &str = "Vaseline (petrolatum) is great for dry skin as it locks in moisture! 💧 However, it's too heavy for oily or acne-prone skin. What's your skin type? I can recommend better alternatives! 🧴";

const GREETINGS: [(&str, &str); 4] = [
    ("hello", "Hi! 👋 I'm Dermamon, your skincare expert. What would you like to know?"),
    ("hi", "Hello! 😊 Ask me about products, ingredients, or your skin concerns!"),
    ("help", "I can help with:\n• Product recommendations\n• Ingredient analysis\n• Skin type advice\n• Allergy detection\n\nWhat interests you? 💡"),
    ("thank", "You're welcome! 😊 Always happy to help with skincare!"),
];

const DEFAULT_REPLY: &str = "I'm here to help with skincare! 🧴 Ask me about specific products, ingredients, or your skin concerns. What would you like to know?";

/// Source label reported with each chat reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PoweredBy {
    #[serde(rename = "Gemini AI")]
    GeminiAi,
    #[serde(rename = "Dermamon Database")]
    Database,
    #[serde(rename = "Dermamon")]
    Dermamon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub powered_by: PoweredBy,
}

impl ChatReply {
    fn new(response: impl Into<String>, powered_by: PoweredBy) -> Self {
        Self { response: response.into(), powered_by }
    }
}

/// Knowledge-base entries mentioned in a message.
#[derive(Debug, Clone, Default)]
pub struct ChatContext {
    pub products: Vec<&'static ProductCatalogEntry>,
    pub ingredients: Vec<&'static IngredientRecord>,
    /// Last skin type, in table order, that the message mentions.
    pub skin_type: Option<SkinType>,
    pub symptoms: Vec<(&'static str, &'static [&'static str])>,
}

impl ChatContext {
    /// Collect context for a lowercase message.
    ///
    /// A product matches when its key, or any single word of its key, is a
    /// substring of the message.
    pub fn gather(message: &str, kb: &KnowledgeBase) -> Self {
        let products = kb
            .catalog()
            .iter()
            .filter(|entry| {
                message.contains(entry.key) || entry.key.split_whitespace().any(|word| message.contains(word))
            })
            .collect();

        let ingredients = kb
            .known_ingredients()
            .iter()
            .filter(|record| message.contains(record.name))
            .collect();

        let skin_type = SkinType::ALL
            .into_iter()
            .rev()
            .find(|t| message.contains(t.as_str()));

        let symptoms = ALLERGY_SYMPTOMS
            .iter()
            .filter(|(symptom, _)| message.contains(symptom))
            .copied()
            .collect();

        Self { products, ingredients, skin_type, symptoms }
    }

    fn prompt_addon(&self) -> String {
        let mut addon = String::new();

        if !self.products.is_empty() {
            addon.push_str("\n**RELEVANT PRODUCTS USER MIGHT BE ASKING ABOUT:**\n");
            for product in self.products.iter().take(2) {
                addon.push_str(&format!(
                    "- {}: {} skin\n",
                    product.canonical_name,
                    product.suitable_skin_types.join(", ")
                ));
            }
        }

        if let Some(skin_type) = self.skin_type {
            let avoid: Vec<&str> = skin_type.concerns().iter().take(3).copied().collect();
            addon.push_str(&format!("\n**USER ASKED ABOUT {} SKIN**\n", skin_type.as_str().to_uppercase()));
            addon.push_str(&format!("Should avoid: {}\n", avoid.join(", ")));
        }

        if !self.ingredients.is_empty() {
            addon.push_str("\n**INGREDIENTS MENTIONED:**\n");
            for record in &self.ingredients {
                addon.push_str(&format!("- {}: risk {}/100, {}\n", record.name, record.risk_weight, record.category));
            }
        }

        if !self.symptoms.is_empty() {
            addon.push_str("\n**SYMPTOMS MENTIONED:**\n");
            for (symptom, culprits) in &self.symptoms {
                addon.push_str(&format!("- {}: often caused by {}\n", symptom, culprits.join(", ")));
            }
        }

        addon
    }
}

/// Full prompt for the generative model.
pub fn build_prompt(context: &ChatContext, original_message: &str) -> String {
    format!(
        "{}\n{}\n\nUser: {}\n\nDermamon (respond naturally and specifically):",
        SYSTEM_PROMPT,
        context.prompt_addon(),
        original_message
    )
}

/// Post-process a model reply for a lowercase message.
pub fn decorate_ai_reply(reply: &str, message: &str) -> ChatReply {
    let mut response = reply.trim().to_string();
    if ANALYSIS_KEYWORDS.iter().any(|word| message.contains(word)) && !response.contains("Product Analysis") {
        response.push_str(ANALYSIS_HINT);
    }
    ChatReply::new(response, PoweredBy::GeminiAi)
}

/// Canned answer for a lowercase message when the model is unavailable.
pub fn fallback_reply(context: &ChatContext, message: &str) -> ChatReply {
    if let Some(product) = context.products.first() {
        return ChatReply::new(product_card(product), PoweredBy::Database);
    }

    if LIST_KEYWORDS.iter().any(|word| message.contains(word)) {
        let options = if message.contains("oily") || message.contains("acne") {
            OILY_OPTIONS
        } else if message.contains("dry") {
            DRY_OPTIONS
        } else if message.contains("sensitive") {
            SENSITIVE_OPTIONS
        } else {
            GENERAL_OPTIONS
        };
        return ChatReply::new(options, PoweredBy::Database);
    }

    if message.contains("vaseline") {
        let answer = if message.contains("dry") {
            VASELINE_DRY
        } else if message.contains("oily") || message.contains("acne") {
            VASELINE_OILY
        } else {
            VASELINE_GENERAL
        };
        return ChatReply::new(answer, PoweredBy::Database);
    }

    for (keyword, answer) in GREETINGS {
        if message.contains(keyword) {
            return ChatReply::new(answer, PoweredBy::Dermamon);
        }
    }

    ChatReply::new(DEFAULT_REPLY, PoweredBy::Dermamon)
}

fn product_card(product: &ProductCatalogEntry) -> String {
    let key_ingredients: Vec<&str> = product.raw_ingredients.split(',').take(3).collect();
    let concerns: Vec<&str> = product.concerns.iter().take(2).copied().collect();

    format!(
        "**{}** is great! 🧴\n\n✨ Perfect for {} skin\n🔑 Key ingredients: {}\n🎯 Addresses: {}\n\nWant a full ingredient analysis? Click 'Product Analysis'!",
        product.canonical_name,
        product.suitable_skin_types.join(", "),
        key_ingredients.join(", "),
        concerns.join(", ")
    )
}
