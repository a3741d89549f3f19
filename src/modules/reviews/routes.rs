use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use shelfmark_authz::Identity;
use shelfmark_http::error::AppError;

use super::models::{NewReview, Review, ReviewPatch};
use super::store::ReviewStore;

pub async fn create_review(
    State(store): State<ReviewStore>,
    identity: Identity,
    Json(fields): Json<NewReview>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let review = store.create(&identity, fields)?;
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn update_review(
    State(store): State<ReviewStore>,
    identity: Identity,
    Path(id): Path<String>,
    Json(patch): Json<ReviewPatch>,
) -> Result<Json<Review>, AppError> {
    Ok(Json(store.update(&identity, &id, patch)?))
}

pub async fn delete_review(
    State(store): State<ReviewStore>,
    identity: Identity,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    store.delete(&identity, &id)?;
    Ok(Json(json!({"message": "review deleted"})))
}
