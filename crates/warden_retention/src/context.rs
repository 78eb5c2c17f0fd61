//! # Retention Context
//!
//! Everything a decision may look at, passed in explicitly per call.
//!
//! ## Collaborators
//!
//! ```text
//!                        RetentionContext
//!                               │
//!      ┌──────────────┬─────────┼──────────────┬──────────────┐
//!      ▼              ▼         ▼              ▼              ▼
//!  CharacterConfig  Catalog  DropManager   PatternRules   StorageQuery
//!  (required)      (required) (optional)    (optional)     (optional)
//! ```
//!
//! Optional collaborators are `Option<&dyn Trait>`. Each consumer documents
//! what it does when one is absent, and that default always errs towards
//! keeping the item.

use warden_items::{Item, Quality, RunewordCatalog, StorageQuery};

use crate::config::CharacterConfig;

/// Category toggles for pattern-matching retention mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CategoryToggles {
    /// Gems may be dropped.
    pub drop_gems: bool,
    /// Named jewels may be dropped.
    pub drop_jewels: bool,
}

/// The drop manager, as seen by the retention engine. Every method is a query.
pub trait DropManager {
    /// Retention filters are enabled at all.
    fn filters_enabled(&self) -> bool;

    /// Pattern-matching retention mode ("drop = good item") is active.
    fn use_pickit(&self) -> bool;

    /// The item matches the configured drop selection.
    fn should_drop(&self, name: &str, quality: Quality, type_code: &str, is_runeword: bool) -> bool;

    /// Only explicitly selected items may leave storage.
    fn selected_only(&self) -> bool;

    /// The named item still has drop quota left.
    fn has_remaining_quota(&self, name: &str) -> bool;

    /// Category toggles, when the toggle source is available.
    fn category_toggles(&self) -> Option<CategoryToggles>;
}

/// Three-valued verdict of the external rule evaluator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleVerdict {
    /// No rule condition matched.
    NoMatch,
    /// Some conditions matched (reroll-candidate-like).
    Partial,
    /// Every condition of some rule matched.
    FullMatch,
}

/// Handle to the rule that produced a verdict.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchedRule {
    /// Rule index inside the active rule set.
    pub index: usize,
    /// Maximum number of copies the rule wants kept, if capped.
    pub max_quantity: Option<u32>,
}

/// Result of a general rule evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleEvaluation {
    /// The verdict.
    pub verdict: RuleVerdict,
    /// The rule responsible, if any.
    pub rule: Option<MatchedRule>,
}

impl RuleEvaluation {
    /// A no-match evaluation.
    #[must_use]
    pub const fn no_match() -> Self {
        Self {
            verdict: RuleVerdict::NoMatch,
            rule: None,
        }
    }
}

/// Tier scores for the player and the mercenary. Zero means "no tier rule".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TierScores {
    /// Player tier.
    pub player: f64,
    /// Mercenary tier.
    pub merc: f64,
}

/// The external pattern rule evaluator.
pub trait PatternRules {
    /// Evaluates the item against every rule, ignoring tier rules.
    fn evaluate_ignoring_tiers(&self, item: &Item) -> RuleEvaluation;

    /// Evaluates the item against the tier rule set.
    fn evaluate_tiers(&self, item: &Item) -> TierScores;

    /// The matched rule's quantity cap is already reached.
    fn exceeds_quantity(&self, rule: &MatchedRule) -> bool;
}

/// Who would wear the item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wearer {
    /// The character.
    Player,
    /// The mercenary.
    Mercenary,
}

/// Compares an item against currently equipped gear.
pub trait EquipmentScorer {
    /// Returns true if `item` scores higher than what `wearer` has equipped.
    fn is_better_than_equipped(&self, item: &Item, wearer: Wearer) -> bool;
}

/// Immutable snapshot handed to every decision.
#[derive(Clone, Copy)]
pub struct RetentionContext<'a> {
    /// Character configuration.
    pub character: &'a CharacterConfig,
    /// Runeword recipe catalog.
    pub catalog: &'a RunewordCatalog,
    /// Drop manager.
    pub drop: Option<&'a dyn DropManager>,
    /// External pattern rule evaluator.
    pub rules: Option<&'a dyn PatternRules>,
    /// Storage inventory query.
    pub storage: Option<&'a dyn StorageQuery>,
    /// Equipment comparison, used by the pickup classifier.
    pub equipment: Option<&'a dyn EquipmentScorer>,
}

impl<'a> RetentionContext<'a> {
    /// Creates a context with only the required parts.
    #[must_use]
    pub fn new(character: &'a CharacterConfig, catalog: &'a RunewordCatalog) -> Self {
        Self {
            character,
            catalog,
            drop: None,
            rules: None,
            storage: None,
            equipment: None,
        }
    }

    /// Attaches a drop manager.
    #[must_use]
    pub fn with_drop_manager(mut self, drop: &'a dyn DropManager) -> Self {
        self.drop = Some(drop);
        self
    }

    /// Attaches a rule evaluator.
    #[must_use]
    pub fn with_rules(mut self, rules: &'a dyn PatternRules) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Attaches a storage query.
    #[must_use]
    pub fn with_storage(mut self, storage: &'a dyn StorageQuery) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Attaches an equipment scorer.
    #[must_use]
    pub fn with_equipment(mut self, equipment: &'a dyn EquipmentScorer) -> Self {
        self.equipment = Some(equipment);
        self
    }

    /// Evaluates `item` against the rule set. No evaluator means no match.
    #[must_use]
    pub fn evaluate(&self, item: &Item) -> RuleEvaluation {
        self.rules
            .map_or_else(RuleEvaluation::no_match, |rules| rules.evaluate_ignoring_tiers(item))
    }

    /// The reroll subsystem is active for this character.
    #[must_use]
    pub fn reroll_active(&self) -> bool {
        self.character.runeword_maker_enabled
            && !self.character.leveling
            && self.character.has_reroll_rules()
    }
}

impl std::fmt::Debug for RetentionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetentionContext")
            .field("character", &self.character)
            .field("catalog_recipes", &self.catalog.len())
            .field("drop", &self.drop.is_some())
            .field("rules", &self.rules.is_some())
            .field("storage", &self.storage.is_some())
            .field("equipment", &self.equipment.is_some())
            .finish()
    }
}
