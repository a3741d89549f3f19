use std::collections::BTreeMap;

use serde::Serialize;

use crate::modules::books::models::Book;
use crate::modules::reviews::models::Review;
use crate::ratings;

/// A book the user owns, enriched with its aggregate and raw reviews.
#[derive(Debug, Clone, Serialize)]
pub struct OwnedBook {
    #[serde(flatten)]
    pub book: Book,
    pub average_rating: f64,
    pub review_count: usize,
    pub reviews: Vec<Review>,
}

impl OwnedBook {
    pub fn new(book: Book, reviews: Vec<Review>) -> Self {
        Self {
            average_rating: ratings::average_rating(&reviews),
            review_count: reviews.len(),
            book,
            reviews,
        }
    }
}

/// A review the user wrote, carrying only the reviewed book's title and
/// author rather than the whole book.
#[derive(Debug, Clone, Serialize)]
pub struct GivenReview {
    #[serde(flatten)]
    pub review: Review,
    pub book_title: String,
    pub book_author: String,
}

/// A review received on one of the user's books, carrying the book's title.
#[derive(Debug, Clone, Serialize)]
pub struct ReceivedReview {
    #[serde(flatten)]
    pub review: Review,
    pub book_title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileStats {
    pub total_books: usize,
    pub total_reviews_given: usize,
    pub total_reviews_received: usize,
    /// Histogram over reviews received on owned books.
    pub rating_distribution: BTreeMap<u8, u64>,
    /// Histogram over reviews the user wrote.
    pub given_rating_distribution: BTreeMap<u8, u64>,
}

/// The per-user aggregate bundle.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub my_books: Vec<OwnedBook>,
    pub reviews_given: Vec<GivenReview>,
    pub reviews_received: Vec<ReceivedReview>,
    pub stats: ProfileStats,
}
