// Axum API Server Module
//
// Purpose: REST API for product scoring, allergy analysis, chat, reviews,
// accounts, and the mini-game leaderboard.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
    extract::State,
};

use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

use std::sync::Arc;

use crate::auth::AuthError;
use crate::classifier::RiskClassifier;
use crate::config::Config;
use crate::genai::GeminiClient;
use crate::scorer::{ProductScorer, ValidationError};
use crate::store::{Store, StoreError};
use crate::web::handlers::{allergy, auth, chat, game, predict, reviews};

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scorer: Arc<ProductScorer>,
    /// `None` when no database is configured.
    pub store: Option<Arc<Store>>,
    /// `None` when no AI key is configured.
    pub gemini: Option<Arc<GeminiClient>>,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        tracing::info!("Loading risk classifier from {}...", config.models_dir.display());
        let models_dir = config.models_dir.clone();
        let classifier = tokio::task::spawn_blocking(move || RiskClassifier::load(&models_dir)).await?;
        let scorer = Arc::new(ProductScorer::new(classifier));

        tracing::info!("Connecting store ({})...", config.store_backend);
        let store = Store::from_config(&config)?.map(Arc::new);

        let gemini = match &config.gemini_api_key {
            Some(key) => {
                let client = GeminiClient::new(key, &config.gemini_base_url, &config.gemini_model, config.external_timeout)?;
                tracing::info!("Gemini client configured ({})", config.gemini_model);
                Some(Arc::new(client))
            }
            None => None,
        };

        tracing::info!(
            "Models: {}, database: {}, AI: {}",
            if scorer.models_loaded() { "loaded" } else { "rule-based" },
            if store.is_some() { "connected" } else { "disabled" },
            if gemini.is_some() { "enabled" } else { "disabled" },
        );

        Ok(Self {
            config: Arc::new(config),
            scorer,
            store,
            gemini,
        })
    }

    pub(crate) fn store(&self) -> Result<&Store, AppError> {
        self.store.as_deref().ok_or(AppError::DatabaseUnavailable)
    }

    pub(crate) fn secret(&self) -> &str {
        &self.config.secret_key
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Status
        .route("/api/health", get(health_check))
        .route("/api/debug/status", get(debug_status))

        // Accounts
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/user/profile", get(auth::get_profile).put(auth::update_profile))

        // Product scoring
        .route("/api/predict", post(predict::predict))
        .route("/api/recommend", post(predict::recommend))

        // Allergy analysis + chat
        .route("/api/allergy/analyze", post(allergy::analyze))
        .route("/api/chat", post(chat::chat))

        // Reviews
        .route("/api/reviews", post(reviews::add_review))
        .route("/api/reviews/:product_name", get(reviews::get_reviews))

        // Game
        .route("/api/game/score", post(game::save_score))
        .route("/api/game/leaderboard", get(game::leaderboard))

        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "message": "Dermamon API is running! 🚀",
        "models_loaded": state.scorer.models_loaded(),
        "database_connected": state.store.is_some(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn debug_status(State(state): State<AppState>) -> impl IntoResponse {
    let key_length = state.gemini.as_ref().map(|g| g.key_length()).unwrap_or(0);
    Json(serde_json::json!({
        "gemini_key_loaded": state.gemini.is_some(),
        "gemini_key_length": key_length,
        "models_loaded": state.scorer.models_loaded(),
        "database_connected": state.store.is_some()
    }))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    DatabaseUnavailable,
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::DatabaseUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "Database not connected".to_string())
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken | AuthError::InvalidToken => AppError::Unauthorized(e.to_string()),
            other => {
                tracing::error!("Auth failure: {}", other);
                AppError::Internal(other.to_string())
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        tracing::error!("Store error: {}", e);
        AppError::Internal(e.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Task join error: {}", e))
    }
}
