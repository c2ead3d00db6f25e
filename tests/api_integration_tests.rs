// API Integration Tests
//
// Purpose: Drive every endpoint through the router with a memory store,
// no AI key, and no model artifacts.
// Run with: cargo test --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use approx::assert_relative_eq;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use dermamon_api::config::StoreBackend;
    use dermamon_api::{create_router, AppState, Config};
    use serde_json::{json, Value};
    use std::path::Path;
    use tower::ServiceExt; // for oneshot

    // Helper: app with a memory store and rule-based scoring
    async fn create_test_app() -> axum::Router {
        let config = Config::local("/nonexistent/models");
        let state = AppState::new(config).await.expect("state");
        create_router(state)
    }

    // Helper: app with the database disabled
    async fn create_storeless_app() -> axum::Router {
        let mut config = Config::local("/nonexistent/models");
        config.store_backend = StoreBackend::Supabase;
        let state = AppState::new(config).await.expect("state");
        create_router(state)
    }

    async fn send(
        app: &axum::Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let json = serde_json::from_slice(&body).expect("Failed to parse JSON");
        (status, json)
    }

    async fn signup(app: &axum::Router, email: &str, password: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/auth/signup",
            Some(json!({"email": email, "password": password, "name": "Test User"})),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    // =========================================================================
    // Section 1: Status
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let app = create_test_app().await;
        let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["models_loaded"], false);
        assert_eq!(body["database_connected"], true);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_debug_status_without_key() {
        let app = create_storeless_app().await;
        let (status, body) = send(&app, Method::GET, "/api/debug/status", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["gemini_key_loaded"], false);
        assert_eq!(body["gemini_key_length"], 0);
        assert_eq!(body["database_connected"], false);
    }

    // =========================================================================
    // Section 2: Product Scoring
    // =========================================================================

    #[tokio::test]
    async fn test_predict_raw_ingredient_list() {
        let app = create_test_app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/predict",
            Some(json!({"product": "Water, Fragrance, Parabens"})),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["product_name"], "Custom Product");
        assert_eq!(body["prediction"]["risk_category"], "High");
        assert_eq!(body["prediction"]["safe"], false);
        assert_eq!(body["prediction"]["model_used"], "Rule-based");
        assert_relative_eq!(body["prediction"]["risk_score"].as_f64().unwrap(), 50.0);
        assert_relative_eq!(body["prediction"]["confidence"].as_f64().unwrap(), 87.5);
        assert_eq!(body["analysis"]["total_ingredients"], 3);
        assert_eq!(
            body["analysis"]["high_risk_ingredients"],
            json!(["fragrance", "parabens"])
        );
        assert!(body.get("product_details").is_none());
    }

    #[tokio::test]
    async fn test_predict_catalog_product_with_profile() {
        let app = create_test_app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/predict",
            Some(json!({
                "product": "CeraVe Moisturizing Cream",
                "skin_type": "Sensitive",
                "allergies": "Cetearyl Alcohol, fragrance"
            })),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["product_name"], "CeraVe Moisturizing Cream");
        assert_eq!(body["analysis"]["total_ingredients"], 14);
        assert_eq!(body["product_details"]["brand"], "CeraVe");
        assert_eq!(body["allergy_warnings"], json!(["⚠️ Contains cetearyl alcohol (you're allergic)"]));
        assert!(body["skin_type_compatibility"].is_string());
    }

    #[tokio::test]
    async fn test_predict_requires_product() {
        let app = create_test_app().await;
        let (status, body) = send(&app, Method::POST, "/api/predict", Some(json!({"product": "   "})), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Product information required");

        let (status, _) = send(&app, Method::POST, "/api/predict", Some(json!({})), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_recommend() {
        let app = create_test_app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/recommend",
            Some(json!({"skin_type": "combination", "concern": "Dryness"})),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skin_type"], "combination");
        assert_eq!(body["concern"], "dryness");
        assert_eq!(body["recommendations"][0], "CeraVe Moisturizing Cream");

        let (_, body) = send(&app, Method::POST, "/api/recommend", Some(json!({})), None).await;
        assert_eq!(body["skin_type"], "normal");
        assert_eq!(body["concern"], "general");
        assert_eq!(body["beneficial_ingredients"], json!(["Hyaluronic Acid", "Vitamin E", "Glycerin"]));
    }

    // =========================================================================
    // Section 3: Allergy + Chat
    // =========================================================================

    #[tokio::test]
    async fn test_allergy_requires_input() {
        let app = create_test_app().await;
        let (status, body) = send(&app, Method::POST, "/api/allergy/analyze", Some(json!({})), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Either symptoms or image required");
    }

    #[tokio::test]
    async fn test_allergy_from_symptoms() {
        let app = create_test_app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/allergy/analyze",
            Some(json!({"symptoms": "Redness, itching"})),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["symptoms_detected"], json!(["redness", "itching"]));
        assert_eq!(body["likely_culprits"][0], "fragrance");
        assert!(body["image_analysis"].is_null());
        assert_eq!(body["general_advice"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_allergy_image_without_key() {
        let app = create_test_app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/allergy/analyze",
            Some(json!({"image": "aGVsbG8="})),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["image_analysis"]["type"], "API key missing");
        assert_eq!(body["symptoms_detected"], json!(["analyzed from image"]));
        assert_eq!(body["likely_culprits"], json!(["unknown allergen - see image analysis"]));
        assert_eq!(body["remedies"][0]["ingredient"], "general");
    }

    #[tokio::test]
    async fn test_chat_fallbacks() {
        let app = create_test_app().await;

        let (status, body) = send(&app, Method::POST, "/api/chat", Some(json!({"message": "Hello!"})), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["powered_by"], "Dermamon");

        let (_, body) = send(
            &app,
            Method::POST,
            "/api/chat",
            Some(json!({"message": "Tell me about The Ordinary niacinamide"})),
            None,
        )
        .await;
        assert_eq!(body["powered_by"], "Dermamon Database");
        assert!(body["response"].as_str().unwrap().contains("The Ordinary"));

        let (status, _) = send(&app, Method::POST, "/api/chat", Some(json!({})), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    // =========================================================================
    // Section 4: Accounts
    // =========================================================================

    #[tokio::test]
    async fn test_signup_login_profile_flow() {
        let app = create_test_app().await;
        let token = signup(&app, "ana@example.com", "s3cret").await;

        let (status, body) = send(&app, Method::GET, "/api/user/profile", None, Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["email"], "ana@example.com");
        assert_eq!(body["user"]["name"], "Test User");
        assert!(body["user"]["profile_picture"].is_null());
        assert!(body["user"].get("password").is_none());

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/user/profile",
            Some(json!({"name": "Ana", "email": "ignored@example.com"})),
            Some(&token),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["name"], "Ana");
        assert_eq!(body["user"]["email"], "ana@example.com");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({"email": "ana@example.com", "password": "s3cret"})),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["name"], "Ana");
        assert!(body["token"].is_string());
    }

    #[tokio::test]
    async fn test_auth_failures() {
        let app = create_test_app().await;
        signup(&app, "ben@example.com", "pw").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/signup",
            Some(json!({"email": "ben@example.com", "password": "other"})),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].is_string());

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({"email": "ben@example.com", "password": "wrong"})),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid credentials");

        let (status, body) = send(&app, Method::POST, "/api/auth/login", Some(json!({"email": ""})), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Email and password required");

        let (status, body) = send(&app, Method::GET, "/api/user/profile", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Token is missing");

        let (status, body) = send(&app, Method::GET, "/api/user/profile", None, Some("not-a-token")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid token");
    }

    // =========================================================================
    // Section 5: Reviews + Game
    // =========================================================================

    #[tokio::test]
    async fn test_reviews() {
        let app = create_test_app().await;

        let review = json!({"product_name": "CeraVe Cream", "rating": 5, "review_text": "Great", "skin_type": "dry"});
        let (status, _) = send(&app, Method::POST, "/api/reviews", Some(review.clone()), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let token = signup(&app, "cleo@example.com", "pw").await;
        let (status, body) = send(&app, Method::POST, "/api/reviews", Some(review), Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["review"]["rating"], 5);
        assert!(body["review"]["created_at"].is_string());

        let (status, body) = send(&app, Method::GET, "/api/reviews/CeraVe%20Cream", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["reviews"][0]["review_text"], "Great");

        let (_, body) = send(&app, Method::GET, "/api/reviews/Unknown", None, None).await;
        assert_eq!(body["count"], 0);
    }

    #[tokio::test]
    async fn test_game_leaderboard() {
        let app = create_test_app().await;
        for score in [120, 40, 300] {
            let (status, body) = send(
                &app,
                Method::POST,
                "/api/game/score",
                Some(json!({"user_id": "player", "score": score})),
                None,
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["score"], score);
        }

        let (_, body) = send(&app, Method::POST, "/api/game/score", Some(json!({})), None).await;
        assert_eq!(body["score"], 0);

        let (status, body) = send(&app, Method::GET, "/api/game/leaderboard", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let scores: Vec<i64> = body["leaderboard"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["score"].as_i64().unwrap())
            .collect();
        assert_eq!(scores, vec![300, 120, 40, 0]);
        assert_eq!(body["leaderboard"][3]["game_type"], "balloon_hit");
        assert_eq!(body["leaderboard"][3]["user_id"], "guest");
    }

    // =========================================================================
    // Section 6: Database disabled
    // =========================================================================

    #[tokio::test]
    async fn test_storeless_behaviour() {
        let app = create_storeless_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/signup",
            Some(json!({"email": "a@b.c", "password": "pw"})),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "Database not connected");

        let (status, body) = send(&app, Method::GET, "/api/reviews/Anything", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "reviews": [], "count": 0}));

        let (status, body) = send(&app, Method::POST, "/api/game/score", Some(json!({"score": 7})), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 7);

        let (_, body) = send(&app, Method::GET, "/api/game/leaderboard", None, None).await;
        assert_eq!(body["leaderboard"][0]["user_id"], "Demo Player 1");
        assert_eq!(body["leaderboard"].as_array().unwrap().len(), 3);
    }

    // =========================================================================
    // Section 7: Model artifacts
    // =========================================================================

    fn write_artifacts(dir: &Path) {
        // Class 0 ("High") wins for every input.
        let zeros = vec![0.0; 10];
        std::fs::write(
            dir.join("risk_scaler.json"),
            json!({"mean": zeros, "scale": vec![1.0; 10]}).to_string(),
        )
        .unwrap();
        std::fs::write(
            dir.join("risk_classifier.json"),
            json!({
                "classes": [0, 1, 2],
                "coef": [zeros, zeros, zeros],
                "intercept": [1.0, 0.0, 0.0],
                "probability": true
            })
            .to_string(),
        )
        .unwrap();
        std::fs::write(
            dir.join("risk_encoder.json"),
            json!({"classes": ["High", "Low", "Moderate"]}).to_string(),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_model_backed_scoring() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path());

        let state = AppState::new(Config::local(dir.path())).await.unwrap();
        let app = create_router(state);

        let (_, body) = send(&app, Method::GET, "/api/health", None, None).await;
        assert_eq!(body["models_loaded"], true);

        let (status, body) = send(&app, Method::POST, "/api/predict", Some(json!({"product": "water"})), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prediction"]["model_used"], "ML");
        assert_eq!(body["prediction"]["risk_category"], "High");
        assert_eq!(body["prediction"]["safe"], false);
        assert_relative_eq!(body["prediction"]["risk_score"].as_f64().unwrap(), 0.0);

        let e = std::f64::consts::E;
        let expected = e / (e + 2.0) * 100.0;
        assert_relative_eq!(body["prediction"]["confidence"].as_f64().unwrap(), expected, epsilon = 1e-9);
    }

    #[tokio::test]
    async fn test_malformed_artifacts_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path());
        std::fs::write(dir.path().join("risk_classifier.json"), "{\"classes\": [0]}").unwrap();

        let state = AppState::new(Config::local(dir.path())).await.unwrap();
        assert!(!state.scorer.models_loaded());
    }
}
