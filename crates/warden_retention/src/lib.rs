//! # Warden Retention
//!
//! Decides, for every item a bulk "empty storage" pass considers, whether the
//! item must be protected or may be dropped.
//!
//! ## Design Principles
//!
//! 1. **Pure decisions** - A verdict depends only on the item, the context
//!    snapshot and the runeword catalog
//! 2. **Explicit context** - Every call receives a [`RetentionContext`]; there
//!    is no global lookup
//! 3. **Fail safe** - A missing collaborator protects the item; dropping is
//!    the destructive direction
//! 4. **Decode once** - Configuration strings become enums at load time
//!
//! ## Example
//!
//! ```rust,ignore
//! use warden_retention::{decide, CharacterConfig, RetentionContext};
//! use warden_items::RunewordCatalog;
//!
//! let character = CharacterConfig::load_from(Path::new("config/retention.toml"))?;
//! let catalog = RunewordCatalog::builtin();
//! let ctx = RetentionContext::new(&character, &catalog)
//!     .with_drop_manager(&drop_manager)
//!     .with_rules(&rules)
//!     .with_storage(&stash);
//!
//! let plan = warden_retention::plan_drop(&stash_items, &ctx);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod charm;
pub mod classify;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod pattern;
pub mod reroll;

pub use charm::{find_grand_charm_reroll, has_grand_charm_reroll_candidate, CharmRerollCombination};
pub use classify::{is_essential_consumable, is_reserved_recipe_item};
pub use config::{CharacterConfig, EthMode, QualityMode, RerollRule, StatRequirement, TierFilter};
pub use context::{
    CategoryToggles, DropManager, EquipmentScorer, MatchedRule, PatternRules, RetentionContext,
    RuleEvaluation, RuleVerdict, TierScores, Wearer,
};
pub use engine::{decide, is_drop_protected, plan_drop, DropPlan, DropReason, ProtectReason, Retention};
pub use error::{RetentionError, RetentionResult};
pub use pattern::{classify_for_pickup, matches_retention_policy, PickupReason, PickupVerdict, RunBlacklist};
pub use reroll::{base_matches_rule, reroll_protection, RerollProtection};
