//! Dermamon skincare API
//!
//! Ingredient-risk scoring for cosmetic products, following the pipeline:
//! - `resolver`: product name or raw ingredient list -> normalized ingredients
//! - `features`: ingredient list -> numeric feature record
//! - `classifier`: feature record -> risk category (model artifacts or rule-based)
//! - `analyzer`: ingredient list + user profile -> warnings and advice
//! - `scorer`: the above merged into one report
//!
//! Around the core: allergy symptom analysis (`symptoms`), the chat assistant
//! (`chat`), and, behind the `api` feature, the HTTP server with its store,
//! auth, and generative-AI client.

pub mod knowledge;
pub mod features;
pub mod classifier;
pub mod analyzer;
pub mod resolver;
pub mod scorer;
pub mod symptoms;
pub mod chat;

#[cfg(feature = "api")]
pub mod config;
#[cfg(feature = "api")]
pub mod store;
#[cfg(feature = "api")]
pub mod auth;
#[cfg(feature = "api")]
pub mod genai;
#[cfg(feature = "api")]
pub mod api_server;
#[cfg(feature = "api")]
pub mod web;

// Re-export commonly used types
pub use knowledge::KnowledgeBase;
pub use features::{extract_features, FeatureRecord};
pub use classifier::{Prediction, RiskCategory, RiskClassifier};
pub use scorer::{ProductReport, ProductScorer, ScoreRequest};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
#[cfg(feature = "api")]
pub use config::Config;
