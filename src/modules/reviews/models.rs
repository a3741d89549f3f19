use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use shelfmark_store::Document;

use crate::error::{CatalogError, FieldError};

/// A user's review of a book. At most one exists per `(book_id, user_id)`
/// pair; `user_id` and `username` are fixed at creation from the acting
/// identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub book_id: String,
    pub user_id: String,
    pub username: String,
    pub rating: u8,
    pub comment: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Document for Review {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}

/// Request payload for creating a review.
#[derive(Debug, Default, Deserialize)]
pub struct NewReview {
    pub book_id: Option<String>,
    pub rating: Option<i64>,
    pub comment: Option<String>,
}

/// Partial update for a review. Present fields overwrite; absent fields
/// keep the prior value.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewPatch {
    pub rating: Option<i64>,
    pub comment: Option<String>,
}

/// Check a wire-level rating against the 1..=5 domain.
pub fn validate_rating(rating: i64) -> Result<u8, CatalogError> {
    if (1..=5).contains(&rating) {
        Ok(rating as u8)
    } else {
        Err(CatalogError::validation(
            "rating must be between 1 and 5",
            vec![FieldError::new("rating", "must be between 1 and 5")],
        ))
    }
}
