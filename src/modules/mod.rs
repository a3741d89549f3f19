pub mod books;
pub mod profile;
pub mod reviews;

use shelfmark_kernel::settings::Settings;
use shelfmark_kernel::ModuleRegistry;

use crate::db::Database;

/// Register all domain modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, db: &Database, settings: &Settings) {
    registry.register(books::create_module(db, &settings.catalog));
    registry.register(reviews::create_module(db));
    registry.register(profile::create_module(db, &settings.catalog));
}
