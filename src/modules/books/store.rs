use shelfmark_authz::Identity;
use shelfmark_kernel::settings::CatalogSettings;
use shelfmark_store::{Collection, SortOrder};

use crate::db::Database;
use crate::error::CatalogError;
use crate::modules::reviews::models::Review;

use super::models::{Book, BookDetail, BookPage, BookPatch, NewBook, RatedBook};

/// Ownership-gated CRUD over the book collection.
///
/// Holds a handle to the review collection as well: the delete cascade and
/// the rating enrichment on read paths both need it.
#[derive(Clone)]
pub struct BookStore {
    books: Collection<Book>,
    reviews: Collection<Review>,
    catalog: CatalogSettings,
}

impl BookStore {
    pub fn new(db: &Database, catalog: CatalogSettings) -> Self {
        Self {
            books: db.books.clone(),
            reviews: db.reviews.clone(),
            catalog,
        }
    }

    pub fn default_page_size(&self) -> u64 {
        self.catalog.default_page_size
    }

    /// Newest-first page of the catalog, each book enriched with its rating
    /// aggregate.
    pub fn list(&self, page: u64, limit: u64) -> Result<BookPage, CatalogError> {
        let page = page.max(1);
        let limit = limit.max(1);
        let skip = (page - 1).saturating_mul(limit);

        let total = self.books.count()? as u64;
        let books = self.books.find_page(
            |_| true,
            SortOrder::NewestFirst,
            skip as usize,
            limit as usize,
        )?;

        let mut items = Vec::with_capacity(books.len());
        for book in books {
            let reviews = self.reviews.find(|r| r.book_id == book.id)?;
            items.push(RatedBook::new(book, &reviews));
        }

        Ok(BookPage {
            books: items,
            total_pages: total.div_ceil(limit),
            current_page: page,
            total,
        })
    }

    pub fn get(&self, id: &str) -> Result<Book, CatalogError> {
        self.books.get(id)?.ok_or(CatalogError::NotFound("book"))
    }

    /// Book plus aggregate rating and its full review list, newest first.
    pub fn detail(&self, id: &str) -> Result<BookDetail, CatalogError> {
        let book = self.get(id)?;
        let reviews = self
            .reviews
            .find_sorted(|r| r.book_id == book.id, SortOrder::NewestFirst)?;
        Ok(BookDetail::new(book, reviews))
    }

    pub fn create(&self, identity: &Identity, fields: NewBook) -> Result<Book, CatalogError> {
        let draft = fields.into_draft()?;

        let book = Book {
            id: shelfmark_store::new_id(),
            title: draft.title,
            author: draft.author,
            genre: draft.genre,
            year: draft.year,
            description: draft.description,
            image_url: draft
                .image_url
                .unwrap_or_else(|| self.catalog.placeholder_cover_url.clone()),
            owner_id: identity.user_id.clone(),
            owner_name: identity.username.clone(),
            created_at: shelfmark_store::now(),
        };

        self.books.insert(book.clone())?;
        tracing::debug!(book_id = %book.id, owner = %book.owner_id, "book created");
        Ok(book)
    }

    pub fn update(
        &self,
        identity: &Identity,
        id: &str,
        patch: BookPatch,
    ) -> Result<Book, CatalogError> {
        patch.validate()?;

        let book = self.get(id)?;
        if book.owner_id != identity.user_id {
            return Err(CatalogError::Forbidden("not authorized to edit this book"));
        }

        self.books
            .update(id, |b| patch.apply(b))?
            .ok_or(CatalogError::NotFound("book"))
    }

    /// Delete a book and every review referencing it.
    ///
    /// Reviews go first so no reader observes a review pointing at a missing
    /// book. There is no rollback: a crash between the two steps leaves a
    /// book with zero reviews, which every reader handles.
    pub fn delete(&self, identity: &Identity, id: &str) -> Result<(), CatalogError> {
        let book = self.get(id)?;
        if book.owner_id != identity.user_id {
            return Err(CatalogError::Forbidden(
                "not authorized to delete this book",
            ));
        }

        let cascaded = self.reviews.remove_where(|r| r.book_id == id)?;
        self.books.remove(id)?;
        tracing::debug!(book_id = %id, cascaded_reviews = cascaded, "book deleted");
        Ok(())
    }

    /// All books owned by the given user, newest first.
    pub fn list_by_owner(&self, user_id: &str) -> Result<Vec<Book>, CatalogError> {
        Ok(self
            .books
            .find_sorted(|b| b.owner_id == user_id, SortOrder::NewestFirst)?)
    }
}
