use shelfmark_store::Collection;

use crate::modules::books::models::Book;
use crate::modules::reviews::models::Review;

/// Handle to the persisted record collections.
///
/// Books and reviews are independent collections related only by the
/// `book_id` reference on reviews; integrity between them is enforced by the
/// stores, not here. Clones share the same underlying data.
#[derive(Clone, Default)]
pub struct Database {
    pub books: Collection<Book>,
    pub reviews: Collection<Review>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }
}
