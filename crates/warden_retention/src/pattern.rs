//! # Pattern-Rule Bridge
//!
//! Adapts the external rule evaluator into the two signals the bot uses:
//!
//! 1. **Retention** (`matches_retention_policy`) - bulk drop side. Only a
//!    full match counts as "good"; partial matches are reroll candidates.
//! 2. **Pickup** (`classify_for_pickup`) - shopping and pickup side. Tier
//!    upgrades first, then the general three-valued evaluation.
//!
//! Classification is pure. When a matched rule's quantity cap is already
//! reached the verdict carries a blacklist signal, and the caller applies it
//! to its [`RunBlacklist`].

use warden_items::{Item, ItemId};

use crate::context::{RetentionContext, RuleVerdict, Wearer};

/// True iff the rule evaluator reports a full match. No evaluator, no match.
#[must_use]
pub fn matches_retention_policy(item: &Item, ctx: &RetentionContext<'_>) -> bool {
    ctx.evaluate(item).verdict == RuleVerdict::FullMatch
}

/// Why the pickup classifier reached its verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupReason {
    /// Superior-or-lower item that beats the player's gear.
    PlayerUpgrade,
    /// Superior-or-lower item that beats the mercenary's gear.
    MercUpgrade,
    /// Magic-or-better item with a tier score; identify it later.
    TierUnidentified,
    /// Partial rule match.
    PartialMatch,
    /// Full rule match within quantity limits.
    FullMatch,
    /// Full rule match whose quantity cap is already reached.
    QuantityExceeded,
    /// No rule matched.
    NoMatch,
    /// No rule evaluator available.
    RulesUnavailable,
}

/// Result of the pickup classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickupVerdict {
    /// Pick up or buy the item.
    pub take: bool,
    /// Add the item to the run blacklist.
    pub blacklist: bool,
    /// Branch that decided.
    pub reason: PickupReason,
}

impl PickupVerdict {
    const fn take(reason: PickupReason) -> Self {
        Self { take: true, blacklist: false, reason }
    }

    const fn skip(reason: PickupReason) -> Self {
        Self { take: false, blacklist: false, reason }
    }
}

/// Decides whether an item is worth picking up or buying.
///
/// Tier rules come first: a positive player or mercenary tier takes any
/// magic-or-better item (it still needs identifying), and takes lesser
/// items only when they beat what is equipped. Otherwise the general rule
/// evaluation decides: no match skips, partial takes, full takes unless the
/// rule's quantity cap is reached.
#[must_use]
pub fn classify_for_pickup(item: &Item, ctx: &RetentionContext<'_>) -> PickupVerdict {
    let Some(rules) = ctx.rules else {
        return PickupVerdict::skip(PickupReason::RulesUnavailable);
    };

    let tiers = rules.evaluate_tiers(item);
    if tiers.player > 0.0 || tiers.merc > 0.0 {
        if item.quality.is_magic_or_above() {
            return PickupVerdict::take(PickupReason::TierUnidentified);
        }

        let (wearer, reason) = if tiers.player > 0.0 {
            (Wearer::Player, PickupReason::PlayerUpgrade)
        } else {
            (Wearer::Mercenary, PickupReason::MercUpgrade)
        };
        if ctx
            .equipment
            .is_some_and(|scorer| scorer.is_better_than_equipped(item, wearer))
        {
            return PickupVerdict::take(reason);
        }
    }

    let evaluation = rules.evaluate_ignoring_tiers(item);
    match evaluation.verdict {
        RuleVerdict::NoMatch => PickupVerdict::skip(PickupReason::NoMatch),
        RuleVerdict::Partial => PickupVerdict::take(PickupReason::PartialMatch),
        RuleVerdict::FullMatch => {
            let exceeded = evaluation
                .rule
                .as_ref()
                .is_some_and(|rule| rules.exceeds_quantity(rule));
            if exceeded {
                tracing::debug!("Quantity cap reached for {} (id {}), blacklisting", item.name, item.id);
                PickupVerdict {
                    take: false,
                    blacklist: true,
                    reason: PickupReason::QuantityExceeded,
                }
            } else {
                PickupVerdict::take(PickupReason::FullMatch)
            }
        }
    }
}

/// Items skipped for the rest of the current run.
///
/// Owned by the run; written sequentially by the caller after classification.
#[derive(Clone, Debug, Default)]
pub struct RunBlacklist {
    /// Blacklisted items in insertion order.
    items: Vec<Item>,
}

impl RunBlacklist {
    /// Creates an empty blacklist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if an item with this unit id is blacklisted.
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    /// Applies a verdict's blacklist signal. Returns true if the item was added.
    pub fn record(&mut self, item: &Item, verdict: &PickupVerdict) -> bool {
        if !verdict.blacklist || self.contains(item.id) {
            return false;
        }
        tracing::warn!("Blacklisting {} (id {}) for the rest of the run", item.name, item.id);
        self.items.push(item.clone());
        true
    }

    /// Number of blacklisted items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is blacklisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
