pub mod models;
pub mod routes;
pub mod store;

use async_trait::async_trait;
use axum::routing::get;
use axum::Router;
use serde_json::json;
use std::sync::Arc;

use shelfmark_kernel::settings::CatalogSettings;
use shelfmark_kernel::{InitCtx, Module};

use crate::db::Database;
use store::BookStore;

/// Books module: the public catalog plus ownership-gated mutation.
pub struct BooksModule {
    store: BookStore,
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(routes::list_books).post(routes::create_book))
            .route(
                "/{id}",
                get(routes::get_book)
                    .put(routes::update_book)
                    .delete(routes::delete_book),
            )
            .with_state(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books, newest first, with rating aggregates",
                        "tags": ["Books"],
                        "parameters": [
                            {"name": "page", "in": "query", "schema": {"type": "integer", "minimum": 1}},
                            {"name": "limit", "in": "query", "schema": {"type": "integer", "minimum": 1}}
                        ],
                        "responses": {
                            "200": {"description": "Page of books"}
                        }
                    },
                    "post": {
                        "summary": "Create a book owned by the authenticated user",
                        "tags": ["Books"],
                        "responses": {
                            "201": {"description": "Created book"},
                            "401": {"description": "Missing identity", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}},
                            "422": {"description": "Missing required fields", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}}
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Book detail with average rating and all reviews",
                        "tags": ["Books"],
                        "responses": {
                            "200": {"description": "Book detail"},
                            "404": {"description": "Unknown book", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}}
                        }
                    },
                    "put": {
                        "summary": "Partially update an owned book",
                        "tags": ["Books"],
                        "responses": {
                            "200": {"description": "Updated book"},
                            "403": {"description": "Not the owner", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}},
                            "404": {"description": "Unknown book", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}}
                        }
                    },
                    "delete": {
                        "summary": "Delete an owned book and cascade its reviews",
                        "tags": ["Books"],
                        "responses": {
                            "200": {"description": "Deleted"},
                            "403": {"description": "Not the owner", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}},
                            "404": {"description": "Unknown book", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}}
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string"},
                            "title": {"type": "string"},
                            "author": {"type": "string"},
                            "genre": {"type": "string"},
                            "year": {"type": "integer"},
                            "description": {"type": "string"},
                            "image_url": {"type": "string"},
                            "owner_id": {"type": "string"},
                            "owner_name": {"type": "string"},
                            "created_at": {"type": "string", "format": "date-time"}
                        },
                        "required": ["id", "title", "author", "genre", "year", "description", "owner_id", "owner_name"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(db: &Database, catalog: &CatalogSettings) -> Arc<dyn Module> {
    Arc::new(BooksModule {
        store: BookStore::new(db, catalog.clone()),
    })
}
