//! # Warden Items
//!
//! Item model for the warden retention engine.
//!
//! ## Design Principles
//!
//! 1. **Snapshots only** - Items are copied out of game memory and never mutated
//! 2. **Static catalog** - Runeword recipes are built once and shared read-only
//! 3. **No policy** - Deciding what to keep lives in `warden_retention`
//!
//! ## Example
//!
//! ```rust,ignore
//! use warden_items::{Item, Quality, RunewordCatalog, Stash, StorageLocation, Tier};
//!
//! let catalog = RunewordCatalog::builtin();
//! let base = Item::new(7, "CrystalSword", "swor")
//!     .with_quality(Quality::Normal)
//!     .with_sockets(4)
//!     .with_description("Crystal Sword", "swor", Tier::Normal)
//!     .at(StorageLocation::Stash);
//!
//! let recipes: Vec<_> = catalog.candidates_for(&base.type_code, 4).collect();
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod item;
pub mod runeword;
pub mod stash;

pub use error::{ItemsError, ItemsResult};
pub use item::{
    names, nip_name, type_codes, Item, ItemDescription, ItemId, ItemStat, Quality,
    StorageLocation, Tier,
};
pub use runeword::{RunewordCatalog, RunewordRecipe};
pub use stash::{Stash, StorageQuery};
