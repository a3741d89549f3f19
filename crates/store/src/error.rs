use thiserror::Error;

/// Failure of the underlying store, not otherwise classified.
///
/// With the in-process engine the only way a collection operation can fail
/// is a poisoned lock: a writer panicked mid-mutation and the data can no
/// longer be trusted.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock poisoned; a writer panicked while holding it")]
    Poisoned,
}
