use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use shelfmark_authz::Identity;
use shelfmark_http::error::AppError;

use crate::utils::PageParams;

use super::models::{Book, BookDetail, BookPage, BookPatch, NewBook};
use super::store::BookStore;

pub async fn list_books(
    State(store): State<BookStore>,
    Query(params): Query<PageParams>,
) -> Result<Json<BookPage>, AppError> {
    let (page, limit) = params.resolve(store.default_page_size());
    Ok(Json(store.list(page, limit)?))
}

pub async fn get_book(
    State(store): State<BookStore>,
    Path(id): Path<String>,
) -> Result<Json<BookDetail>, AppError> {
    Ok(Json(store.detail(&id)?))
}

pub async fn create_book(
    State(store): State<BookStore>,
    identity: Identity,
    Json(fields): Json<NewBook>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let book = store.create(&identity, fields)?;
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn update_book(
    State(store): State<BookStore>,
    identity: Identity,
    Path(id): Path<String>,
    Json(patch): Json<BookPatch>,
) -> Result<Json<Book>, AppError> {
    Ok(Json(store.update(&identity, &id, patch)?))
}

pub async fn delete_book(
    State(store): State<BookStore>,
    identity: Identity,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    store.delete(&identity, &id)?;
    Ok(Json(json!({
        "message": "book and associated reviews deleted"
    })))
}
