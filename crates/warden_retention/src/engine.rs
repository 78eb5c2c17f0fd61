//! # Retention Decision Engine
//!
//! **One verdict per item: protect or drop.**
//!
//! ## Precedence
//!
//! ```text
//! 1. survival item ─────────────────────────────────────────► PROTECT
//! 2. runeword reroll target / base ─────────────────────────► PROTECT
//! 3. pattern-matching mode ("drop = good item")
//!      essential ► PROTECT   reserved ► PROTECT
//!      no full match ► PROTECT
//!      full match ► toggles unavailable ► PROTECT
//!                   gem, gems off ► PROTECT   jewel, jewels off ► PROTECT
//!                   otherwise ► DROP
//! 4. default mode ("drop = selected item")
//!      selected, quota spent ► PROTECT   selected ► DROP
//!      reserved ► PROTECT
//!      grand charm with reroll candidate in storage ► PROTECT
//!      filters off ► DROP
//!      selected-only ► PROTECT
//!      otherwise ► DROP
//! ```
//!
//! Steps 1 and 2 are never overridden by mode policy. Modes 3 and 4 are
//! mutually exclusive. Without a drop manager there is no mode to apply and
//! the item is protected.

use warden_items::{names, Item};

use crate::charm::has_grand_charm_reroll_candidate;
use crate::classify::{is_essential_consumable, is_named_jewel, is_reserved_recipe_item, is_survival_item};
use crate::context::{DropManager, RetentionContext};
use crate::pattern::matches_retention_policy;
use crate::reroll::{reroll_protection, RerollProtection};

/// Why an item must stay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProtectReason {
    /// The bot's own crafting container.
    SurvivalItem,
    /// Runeword reroll target or base.
    Reroll(RerollProtection),
    /// Tome, scroll, key or potion.
    EssentialConsumable,
    /// Reserved by a cube recipe.
    RecipeReserved,
    /// Pattern mode: not verified good.
    NoRuleMatch,
    /// Pattern mode: category toggles could not be read.
    TogglesUnavailable,
    /// Pattern mode: gem with gem dropping disabled.
    GemCategory,
    /// Pattern mode: jewel with jewel dropping disabled.
    JewelCategory,
    /// Default mode: selected, but its drop quota is spent.
    QuotaExhausted,
    /// Default mode: grand charm while a reroll combination is stored.
    CharmRerollCandidate,
    /// Default mode: only selected items may leave.
    NotSelected,
    /// No drop manager to consult.
    DropManagerUnavailable,
}

/// Why an item may go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropReason {
    /// Pattern mode: verified good and no category holds it back.
    RuleMatch,
    /// Default mode: explicitly selected with quota left.
    Selected,
    /// Default mode: filters are off, storage is cleared.
    FiltersDisabled,
    /// Default mode: nothing protects it.
    Unprotected,
}

/// The verdict.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Retention {
    /// Keep the item.
    Protect(ProtectReason),
    /// The item may be dropped.
    Drop(DropReason),
}

impl Retention {
    /// Returns true if the item must be kept.
    #[inline]
    #[must_use]
    pub const fn is_protected(&self) -> bool {
        matches!(self, Self::Protect(_))
    }
}

/// Decides whether `item` must be kept.
#[must_use]
pub fn decide(item: &Item, ctx: &RetentionContext<'_>) -> Retention {
    let verdict = decide_inner(item, ctx);
    tracing::debug!("Retention for {} (id {}): {:?}", item.name, item.id, verdict);
    verdict
}

/// Boolean form of [`decide`].
#[must_use]
pub fn is_drop_protected(item: &Item, ctx: &RetentionContext<'_>) -> bool {
    decide(item, ctx).is_protected()
}

fn decide_inner(item: &Item, ctx: &RetentionContext<'_>) -> Retention {
    if is_survival_item(item) {
        return Retention::Protect(ProtectReason::SurvivalItem);
    }

    if let Some(reroll) = reroll_protection(item, ctx) {
        return Retention::Protect(ProtectReason::Reroll(reroll));
    }

    let Some(drop) = ctx.drop else {
        tracing::warn!("No drop manager, keeping {} (id {})", item.name, item.id);
        return Retention::Protect(ProtectReason::DropManagerUnavailable);
    };

    if drop.use_pickit() {
        decide_pattern_mode(item, ctx, drop)
    } else {
        decide_default_mode(item, ctx, drop)
    }
}

fn decide_pattern_mode(item: &Item, ctx: &RetentionContext<'_>, drop: &dyn DropManager) -> Retention {
    if is_essential_consumable(item) {
        return Retention::Protect(ProtectReason::EssentialConsumable);
    }
    if is_reserved_recipe_item(item, ctx.character) {
        return Retention::Protect(ProtectReason::RecipeReserved);
    }
    if !matches_retention_policy(item, ctx) {
        return Retention::Protect(ProtectReason::NoRuleMatch);
    }

    let Some(toggles) = drop.category_toggles() else {
        tracing::warn!("Category toggles unavailable, keeping {} (id {})", item.name, item.id);
        return Retention::Protect(ProtectReason::TogglesUnavailable);
    };

    if item.is_gem() && !toggles.drop_gems {
        return Retention::Protect(ProtectReason::GemCategory);
    }
    if is_named_jewel(item) && !toggles.drop_jewels {
        return Retention::Protect(ProtectReason::JewelCategory);
    }

    Retention::Drop(DropReason::RuleMatch)
}

fn decide_default_mode(item: &Item, ctx: &RetentionContext<'_>, drop: &dyn DropManager) -> Retention {
    let filters_enabled = drop.filters_enabled();

    let selected = filters_enabled
        && drop.should_drop(&item.name, item.quality, &item.type_code, item.is_runeword());
    if selected {
        if !drop.has_remaining_quota(&item.name) {
            return Retention::Protect(ProtectReason::QuotaExhausted);
        }
        return Retention::Drop(DropReason::Selected);
    }

    if is_reserved_recipe_item(item, ctx.character) {
        return Retention::Protect(ProtectReason::RecipeReserved);
    }

    if item.name == names::GRAND_CHARM && has_grand_charm_reroll_candidate(ctx) {
        return Retention::Protect(ProtectReason::CharmRerollCandidate);
    }

    if !filters_enabled {
        return Retention::Drop(DropReason::FiltersDisabled);
    }

    if drop.selected_only() {
        return Retention::Protect(ProtectReason::NotSelected);
    }

    Retention::Drop(DropReason::Unprotected)
}

/// Outcome of a bulk "empty storage" pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DropPlan<'a> {
    /// Items that stay, in input order.
    pub keep: Vec<&'a Item>,
    /// Items that may be dropped, in input order.
    pub drop: Vec<&'a Item>,
}

/// Runs [`decide`] over every item and partitions the result.
#[must_use]
pub fn plan_drop<'a>(items: &'a [Item], ctx: &RetentionContext<'_>) -> DropPlan<'a> {
    let mut plan = DropPlan::default();
    for item in items {
        if is_drop_protected(item, ctx) {
            plan.keep.push(item);
        } else {
            plan.drop.push(item);
        }
    }

    tracing::info!(
        "Drop plan: {} of {} items released, {} kept",
        plan.drop.len(),
        items.len(),
        plan.keep.len()
    );
    plan
}
