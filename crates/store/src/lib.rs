//! In-process document store for SHELFMARK.
//!
//! Collections are schemaless as far as the engine is concerned: each one
//! holds typed records keyed by an opaque string id, with query, sort, skip,
//! and limit primitives. Referential integrity between collections is the
//! caller's responsibility.

pub mod collection;
pub mod error;

pub use collection::{Collection, Document, SortOrder};
pub use error::StoreError;

use time::OffsetDateTime;
use uuid::{NoContext, Timestamp, Uuid};

/// Mint a fresh document id. UUID v7, so ids sort roughly by creation time.
pub fn new_id() -> String {
    Uuid::new_v7(Timestamp::now(NoContext)).to_string()
}

/// Current UTC timestamp for `created_at` stamping.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}
