use shelfmark_authz::Identity;
use shelfmark_store::{Collection, SortOrder};

use crate::db::Database;
use crate::error::{CatalogError, FieldError};
use crate::modules::books::models::Book;

use super::models::{validate_rating, NewReview, Review, ReviewPatch};

/// Author-gated CRUD over the review collection, with the one-review-per-
/// user-per-book invariant enforced at insert.
#[derive(Clone)]
pub struct ReviewStore {
    reviews: Collection<Review>,
    books: Collection<Book>,
}

impl ReviewStore {
    pub fn new(db: &Database) -> Self {
        Self {
            reviews: db.reviews.clone(),
            books: db.books.clone(),
        }
    }

    pub fn create(&self, identity: &Identity, fields: NewReview) -> Result<Review, CatalogError> {
        let book_id = fields.book_id.filter(|id| !id.is_empty());
        let comment = fields.comment.filter(|c| !c.is_empty());

        let mut missing = Vec::new();
        if book_id.is_none() {
            missing.push(FieldError::required("book_id"));
        }
        if fields.rating.is_none() {
            missing.push(FieldError::required("rating"));
        }
        if comment.is_none() {
            missing.push(FieldError::required("comment"));
        }
        let (Some(book_id), Some(rating), Some(comment)) = (book_id, fields.rating, comment)
        else {
            return Err(CatalogError::validation(
                "book_id, rating and comment are required",
                missing,
            ));
        };

        let rating = validate_rating(rating)?;
        let book = self
            .books
            .get(&book_id)?
            .ok_or(CatalogError::NotFound("book"))?;

        let review = Review {
            id: shelfmark_store::new_id(),
            book_id: book.id,
            user_id: identity.user_id.clone(),
            username: identity.username.clone(),
            rating,
            comment,
            created_at: shelfmark_store::now(),
        };

        // The duplicate check and the insert run under one write lock, so
        // concurrent submissions for the same (book, user) serialize and
        // exactly one wins.
        let admitted = self.reviews.insert_if(review.clone(), |existing| {
            !existing
                .iter()
                .any(|r| r.book_id == review.book_id && r.user_id == review.user_id)
        })?;

        if !admitted {
            return Err(CatalogError::Conflict("you have already reviewed this book"));
        }

        tracing::debug!(review_id = %review.id, book_id = %review.book_id, "review created");
        Ok(review)
    }

    pub fn update(
        &self,
        identity: &Identity,
        id: &str,
        patch: ReviewPatch,
    ) -> Result<Review, CatalogError> {
        let rating = patch.rating.map(validate_rating).transpose()?;
        if matches!(&patch.comment, Some(c) if c.is_empty()) {
            return Err(CatalogError::validation(
                "comment must not be empty",
                vec![FieldError::new("comment", "must not be empty")],
            ));
        }

        let review = self
            .reviews
            .get(id)?
            .ok_or(CatalogError::NotFound("review"))?;
        if review.user_id != identity.user_id {
            return Err(CatalogError::Forbidden(
                "not authorized to edit this review",
            ));
        }

        self.reviews
            .update(id, |r| {
                if let Some(rating) = rating {
                    r.rating = rating;
                }
                if let Some(comment) = patch.comment {
                    r.comment = comment;
                }
            })?
            .ok_or(CatalogError::NotFound("review"))
    }

    pub fn delete(&self, identity: &Identity, id: &str) -> Result<(), CatalogError> {
        let review = self
            .reviews
            .get(id)?
            .ok_or(CatalogError::NotFound("review"))?;
        if review.user_id != identity.user_id {
            return Err(CatalogError::Forbidden(
                "not authorized to delete this review",
            ));
        }

        self.reviews.remove(id)?;
        Ok(())
    }

    pub fn list_by_book(
        &self,
        book_id: &str,
        order: SortOrder,
    ) -> Result<Vec<Review>, CatalogError> {
        Ok(self.reviews.find_sorted(|r| r.book_id == book_id, order)?)
    }

    pub fn list_by_user(
        &self,
        user_id: &str,
        order: SortOrder,
    ) -> Result<Vec<Review>, CatalogError> {
        Ok(self.reviews.find_sorted(|r| r.user_id == user_id, order)?)
    }
}
