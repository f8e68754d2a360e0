//! Error types for structured data containers

use thiserror::Error;

/// Errors from [`ItemList`](super::ItemList) operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    /// Every item in a list must share one `@type`
    #[error("ItemList holds {expected} items, cannot add a {found}")]
    MixedItemTypes { expected: String, found: String },

    #[error("cannot sort an ItemListUnordered list")]
    UnorderedSort,
}
