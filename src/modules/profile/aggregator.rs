use shelfmark_authz::Identity;
use shelfmark_store::SortOrder;

use crate::error::CatalogError;
use crate::modules::books::store::BookStore;
use crate::modules::reviews::store::ReviewStore;
use crate::ratings;

use super::models::{GivenReview, OwnedBook, Profile, ProfileStats, ReceivedReview};

/// Read-only fan-out over both stores, composed into per-user statistics.
/// Nothing here mutates state and nothing is cached; aggregates are
/// recomputed on every call.
#[derive(Clone)]
pub struct ProfileAggregator {
    books: BookStore,
    reviews: ReviewStore,
}

impl ProfileAggregator {
    pub fn new(books: BookStore, reviews: ReviewStore) -> Self {
        Self { books, reviews }
    }

    pub fn build(&self, identity: &Identity) -> Result<Profile, CatalogError> {
        let owned = self.books.list_by_owner(&identity.user_id)?;

        let mut my_books = Vec::with_capacity(owned.len());
        for book in &owned {
            let book_reviews = self.reviews.list_by_book(&book.id, SortOrder::NewestFirst)?;
            my_books.push(OwnedBook::new(book.clone(), book_reviews));
        }

        // Reviews this user wrote, joined to each book's title and author.
        // A review whose book has vanished (cascade crash window) is
        // omitted rather than failing the whole profile.
        let given_raw = self
            .reviews
            .list_by_user(&identity.user_id, SortOrder::NewestFirst)?;
        let mut reviews_given = Vec::with_capacity(given_raw.len());
        for review in given_raw {
            match self.books.get(&review.book_id) {
                Ok(book) => reviews_given.push(GivenReview {
                    book_title: book.title,
                    book_author: book.author,
                    review,
                }),
                Err(CatalogError::NotFound(_)) => continue,
                Err(other) => return Err(other),
            }
        }

        // Reviews received across all owned books, joined to the title.
        let mut reviews_received = Vec::new();
        for book in &owned {
            for review in self.reviews.list_by_book(&book.id, SortOrder::NewestFirst)? {
                reviews_received.push(ReceivedReview {
                    book_title: book.title.clone(),
                    review,
                });
            }
        }

        let stats = ProfileStats {
            total_books: owned.len(),
            total_reviews_given: reviews_given.len(),
            total_reviews_received: reviews_received.len(),
            rating_distribution: ratings::rating_distribution(
                reviews_received.iter().map(|r| &r.review),
            ),
            given_rating_distribution: ratings::rating_distribution(
                reviews_given.iter().map(|r| &r.review),
            ),
        };

        Ok(Profile {
            my_books,
            reviews_given,
            reviews_received,
            stats,
        })
    }
}
