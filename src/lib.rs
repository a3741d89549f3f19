//! SHELFMARK application library.
//!
//! Domain modules (books, reviews, profile), the rating aggregation
//! functions, and the shared database handle live here; the kernel, store,
//! and HTTP crates provide the framing.

pub mod db;
pub mod error;
pub mod modules;
pub mod ratings;
pub mod utils;

use shelfmark_kernel::settings::Settings;
use shelfmark_kernel::{InitCtx, ModuleRegistry};

use db::Database;

/// Build the module registry over a fresh database handle.
pub fn build_registry(db: &Database, settings: &Settings) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, db, settings);
    registry
}

/// Bring the application up and serve HTTP until the process stops.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let db = Database::new();
    let registry = build_registry(&db, &settings);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    shelfmark_http::start_server(&registry, &settings).await
}
