pub mod models;
pub mod routes;
pub mod store;

use async_trait::async_trait;
use axum::routing::{post, put};
use axum::Router;
use serde_json::json;
use std::sync::Arc;

use shelfmark_kernel::{InitCtx, Module};

use crate::db::Database;
use store::ReviewStore;

/// Reviews module: uniqueness- and author-gated review mutation.
pub struct ReviewsModule {
    store: ReviewStore,
}

#[async_trait]
impl Module for ReviewsModule {
    fn name(&self) -> &'static str {
        "reviews"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "reviews module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", post(routes::create_review))
            .route(
                "/{id}",
                put(routes::update_review).delete(routes::delete_review),
            )
            .with_state(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "post": {
                        "summary": "Review a book (one review per user per book)",
                        "tags": ["Reviews"],
                        "responses": {
                            "201": {"description": "Created review"},
                            "404": {"description": "Unknown book", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}},
                            "409": {"description": "Already reviewed", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}},
                            "422": {"description": "Missing fields or rating out of range", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}}
                        }
                    }
                },
                "/{id}": {
                    "put": {
                        "summary": "Partially update an authored review",
                        "tags": ["Reviews"],
                        "responses": {
                            "200": {"description": "Updated review"},
                            "403": {"description": "Not the author", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}},
                            "404": {"description": "Unknown review", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}}
                        }
                    },
                    "delete": {
                        "summary": "Delete an authored review",
                        "tags": ["Reviews"],
                        "responses": {
                            "200": {"description": "Deleted"},
                            "403": {"description": "Not the author", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}},
                            "404": {"description": "Unknown review", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}}
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Review": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string"},
                            "book_id": {"type": "string"},
                            "user_id": {"type": "string"},
                            "username": {"type": "string"},
                            "rating": {"type": "integer", "minimum": 1, "maximum": 5},
                            "comment": {"type": "string"},
                            "created_at": {"type": "string", "format": "date-time"}
                        },
                        "required": ["id", "book_id", "user_id", "username", "rating", "comment"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "reviews module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "reviews module stopped");
        Ok(())
    }
}

/// Create a new instance of the reviews module
pub fn create_module(db: &Database) -> Arc<dyn Module> {
    Arc::new(ReviewsModule {
        store: ReviewStore::new(db),
    })
}
