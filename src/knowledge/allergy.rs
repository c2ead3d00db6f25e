//! Symptom-to-culprit map and remedy table for allergy analysis.

/// Symptom keyword followed by the ingredient groups that commonly cause it.
pub static ALLERGY_SYMPTOMS: &[(&str, &[&str])] = &[
    ("redness", &["fragrance", "alcohol", "essential oils", "sulfates"]),
    ("itching", &["fragrance", "parabens", "formaldehyde", "preservatives"]),
    ("burning", &["alcohol", "fragrance", "acids", "retinol"]),
    ("rash", &["fragrance", "preservatives", "dyes", "sulfates"]),
    ("hives", &["fragrances", "preservatives", "proteins"]),
    ("swelling", &["fragrances", "preservatives", "proteins"]),
];

pub static REMEDIES: &[(&str, &str)] = &[
    ("fragrance", "Switch to fragrance-free products. Apply aloe vera gel to soothe irritation."),
    ("parabens", "Use paraben-free products. Apply colloidal oatmeal to calm skin."),
    ("sulfates", "Choose sulfate-free cleansers. Use gentle, creamy cleansers instead."),
    ("alcohol", "Avoid alcohol-based products. Use hydrating, alcohol-free alternatives."),
    ("retinol", "Reduce retinol concentration or frequency. Always use sunscreen."),
];

pub fn remedy_for(culprit: &str) -> Option<&'static str> {
    REMEDIES
        .iter()
        .find(|(ingredient, _)| *ingredient == culprit)
        .map(|(_, remedy)| *remedy)
}
