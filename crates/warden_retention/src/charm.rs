//! # Grand Charm Reroll Candidates
//!
//! The cube rerolls a magic grand charm when it is combined with three
//! perfect gems. While storage holds such a combination, grand charms are
//! kept out of bulk drops so the recipe stays craftable.

use warden_items::{names, Item, Quality, StorageLocation};

use crate::context::{RetentionContext, RuleVerdict};

/// Perfect gems consumed by one reroll.
pub const PERFECT_GEMS_PER_REROLL: usize = 3;

/// Locations searched for reroll ingredients.
pub const REROLL_SEARCH_LOCATIONS: [StorageLocation; 2] =
    [StorageLocation::Stash, StorageLocation::SharedStash];

/// A grand charm and the gems that would reroll it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharmRerollCombination<'a> {
    /// The charm to reroll.
    pub charm: &'a Item,
    /// The perfect gems to consume.
    pub gems: Vec<&'a Item>,
}

/// Returns true if storage currently holds a rerollable grand charm and
/// enough perfect gems. No storage collaborator means no candidate.
#[must_use]
pub fn has_grand_charm_reroll_candidate(ctx: &RetentionContext<'_>) -> bool {
    let Some(storage) = ctx.storage else {
        return false;
    };
    let items = storage.items_in(&REROLL_SEARCH_LOCATIONS);
    find_grand_charm_reroll(&items, ctx).is_some()
}

/// Finds the first reroll combination among `items`.
///
/// A charm qualifies when it is magic and the rule evaluator does not call
/// it a full match; full-match charms are keepers, not reroll fodder.
#[must_use]
pub fn find_grand_charm_reroll<'a>(
    items: &[&'a Item],
    ctx: &RetentionContext<'_>,
) -> Option<CharmRerollCombination<'a>> {
    let gems: Vec<&'a Item> = items
        .iter()
        .copied()
        .filter(|i| is_perfect_gem(i))
        .take(PERFECT_GEMS_PER_REROLL)
        .collect();
    if gems.len() < PERFECT_GEMS_PER_REROLL {
        return None;
    }

    let charm = items.iter().copied().find(|i| {
        i.name == names::GRAND_CHARM
            && i.quality == Quality::Magic
            && ctx.evaluate(i).verdict != RuleVerdict::FullMatch
    })?;

    Some(CharmRerollCombination { charm, gems })
}

fn is_perfect_gem(item: &Item) -> bool {
    names::PERFECT_GEMS.contains(&item.name.as_str())
}
