//! # Item Error Types
//!
//! Errors raised while building catalogs and stash snapshots.

use thiserror::Error;

use crate::item::ItemId;

/// Errors that can occur in the item crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemsError {
    /// A runeword with this name is already registered.
    #[error("duplicate runeword recipe: {0}")]
    DuplicateRuneword(String),

    /// A runeword recipe failed validation.
    #[error("invalid runeword recipe {name}: {reason}")]
    InvalidRecipe {
        /// The recipe name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An item with this unit id is already in the stash snapshot.
    #[error("duplicate item id in stash snapshot: {0}")]
    DuplicateItem(ItemId),
}

/// Result type for item operations.
pub type ItemsResult<T> = Result<T, ItemsError>;
