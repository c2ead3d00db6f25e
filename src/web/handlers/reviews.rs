// Product reviews.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api_server::{AppError, AppState};
use crate::auth::authenticate;
use crate::store::{timestamp, Row, Table};

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ReviewRequest {
    product_name: Value,
    rating: Value,
    review_text: Value,
    skin_type: Value,
}

pub async fn add_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<Value>, AppError> {
    let user_id = authenticate(&headers, state.secret())?;
    let store = state.store()?;

    let mut row = Row::new();
    row.insert("user_id".to_string(), Value::from(&user_id));
    row.insert("product_name".to_string(), payload.product_name);
    row.insert("rating".to_string(), payload.rating);
    row.insert("review_text".to_string(), payload.review_text);
    row.insert("skin_type".to_string(), payload.skin_type);
    row.insert("created_at".to_string(), json!(timestamp()));

    let review = store.insert(Table::Reviews, row).await?;
    Ok(Json(json!({ "success": true, "review": review })))
}

pub async fn get_reviews(
    State(state): State<AppState>,
    Path(product_name): Path<String>,
) -> Result<Json<Value>, AppError> {
    let Some(store) = state.store.as_deref() else {
        return Ok(Json(json!({ "success": true, "reviews": [], "count": 0 })));
    };

    let reviews = store.select_eq(Table::Reviews, "product_name", &json!(product_name)).await?;
    Ok(Json(json!({
        "success": true,
        "count": reviews.len(),
        "reviews": reviews,
    })))
}
