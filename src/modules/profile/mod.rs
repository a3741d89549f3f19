pub mod aggregator;
pub mod models;
pub mod routes;

use async_trait::async_trait;
use axum::routing::get;
use axum::Router;
use serde_json::json;
use std::sync::Arc;

use shelfmark_kernel::settings::CatalogSettings;
use shelfmark_kernel::{InitCtx, Module};

use crate::db::Database;
use crate::modules::books::store::BookStore;
use crate::modules::reviews::store::ReviewStore;
use aggregator::ProfileAggregator;

/// Profile module: the read-only per-user aggregate bundle.
pub struct ProfileModule {
    aggregator: ProfileAggregator,
}

#[async_trait]
impl Module for ProfileModule {
    fn name(&self) -> &'static str {
        "profile"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "profile module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(routes::get_profile))
            .with_state(self.aggregator.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "Aggregated profile: owned books, reviews given and received, rating distributions",
                        "tags": ["Profile"],
                        "responses": {
                            "200": {"description": "Profile bundle"},
                            "401": {"description": "Missing identity", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}}
                        }
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "profile module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "profile module stopped");
        Ok(())
    }
}

/// Create a new instance of the profile module
pub fn create_module(db: &Database, catalog: &CatalogSettings) -> Arc<dyn Module> {
    Arc::new(ProfileModule {
        aggregator: ProfileAggregator::new(
            BookStore::new(db, catalog.clone()),
            ReviewStore::new(db),
        ),
    })
}
