use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use time::OffsetDateTime;

use crate::error::StoreError;

/// A record that can live in a [`Collection`].
pub trait Document: Clone + Send + Sync + 'static {
    /// Opaque id of the record.
    fn id(&self) -> &str;

    /// Creation timestamp, used by the sort primitive.
    fn created_at(&self) -> OffsetDateTime;
}

/// Sort direction for collection reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    NewestFirst,
    OldestFirst,
}

/// A shared, append-ordered collection of documents.
///
/// Cloning a collection clones the handle, not the data; all clones observe
/// the same records. Every operation takes the lock exactly once, so a
/// single call is atomic with respect to concurrent requests. Cross-call
/// sequences (check then act) are not, which is why [`Collection::insert_if`]
/// exists.
pub struct Collection<T> {
    inner: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Vec::new())),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<T>>, StoreError> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<T>>, StoreError> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }
}

impl<T: Document> Collection<T> {
    /// Insert a document unconditionally.
    pub fn insert(&self, doc: T) -> Result<(), StoreError> {
        self.write()?.push(doc);
        Ok(())
    }

    /// Insert `doc` only if `admit` approves the current contents.
    ///
    /// The predicate runs under the same write lock as the insert, so the
    /// check and the act are a single serialized operation. This is the
    /// primitive that stands in for an engine-side uniqueness constraint.
    /// Returns whether the document was admitted.
    pub fn insert_if<F>(&self, doc: T, admit: F) -> Result<bool, StoreError>
    where
        F: FnOnce(&[T]) -> bool,
    {
        let mut records = self.write()?;
        if !admit(&records) {
            return Ok(false);
        }
        records.push(doc);
        Ok(true)
    }

    /// Fetch a document by id.
    pub fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.read()?.iter().find(|doc| doc.id() == id).cloned())
    }

    /// All documents matching `pred`, in insertion order.
    pub fn find<F>(&self, mut pred: F) -> Result<Vec<T>, StoreError>
    where
        F: FnMut(&T) -> bool,
    {
        Ok(self
            .read()?
            .iter()
            .filter(|doc| pred(doc))
            .cloned()
            .collect())
    }

    /// All documents matching `pred`, sorted by creation time.
    pub fn find_sorted<F>(&self, pred: F, order: SortOrder) -> Result<Vec<T>, StoreError>
    where
        F: FnMut(&T) -> bool,
    {
        let mut matches = self.find(pred)?;
        // Stable sort, so records created at the same instant keep their
        // insertion order; reversing afterwards puts the later insert first.
        matches.sort_by(|a, b| a.created_at().cmp(&b.created_at()));
        if order == SortOrder::NewestFirst {
            matches.reverse();
        }
        Ok(matches)
    }

    /// Sorted page of matching documents: skip `skip`, then take `limit`.
    pub fn find_page<F>(
        &self,
        pred: F,
        order: SortOrder,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<T>, StoreError>
    where
        F: FnMut(&T) -> bool,
    {
        let matches = self.find_sorted(pred, order)?;
        Ok(matches.into_iter().skip(skip).take(limit).collect())
    }

    /// Apply `apply` to the document with the given id, returning the
    /// updated copy, or `None` if no such document exists.
    pub fn update<F>(&self, id: &str, apply: F) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut T),
    {
        let mut records = self.write()?;
        let Some(doc) = records.iter_mut().find(|doc| doc.id() == id) else {
            return Ok(None);
        };
        apply(doc);
        Ok(Some(doc.clone()))
    }

    /// Remove the document with the given id. Returns whether it existed.
    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut records = self.write()?;
        let before = records.len();
        records.retain(|doc| doc.id() != id);
        Ok(records.len() < before)
    }

    /// Remove every document matching `pred`, returning how many went away.
    pub fn remove_where<F>(&self, mut pred: F) -> Result<usize, StoreError>
    where
        F: FnMut(&T) -> bool,
    {
        let mut records = self.write()?;
        let before = records.len();
        records.retain(|doc| !pred(doc));
        Ok(before - records.len())
    }

    /// Total number of documents.
    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }
}
