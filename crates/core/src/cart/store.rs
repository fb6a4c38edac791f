//! Cart persistence boundary.
//!
//! The cart hands its full item list to a [`CartStore`] after every change
//! and reads it back once when a session starts. File-backed stores live
//! with the binaries; this module only holds the trait and an in-memory
//! implementation.

use std::sync::{Mutex, PoisonError};

use super::LineItem;

/// Errors from a persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be encoded or decoded.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend is temporarily unavailable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable key-value persistence for one cart.
pub trait CartStore: Send + Sync {
    /// Read the saved items. An empty list means nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the saved data cannot be read.
    fn load(&self) -> Result<Vec<LineItem>, StoreError>;

    /// Replace the saved items.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the items cannot be written.
    fn save(&self, items: &[LineItem]) -> Result<(), StoreError>;
}

/// In-process store, for tests and sessions that should not outlive the
/// process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<Vec<LineItem>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `items`.
    #[must_use]
    pub const fn with_items(items: Vec<LineItem>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }

    /// The most recently saved items.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CartStore for MemoryStore {
    fn load(&self) -> Result<Vec<LineItem>, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, items: &[LineItem]) -> Result<(), StoreError> {
        let mut saved = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        saved.clear();
        saved.extend_from_slice(items);
        Ok(())
    }
}
