//! Stateless item predicates.

use warden_items::{names, Item};

use crate::config::CharacterConfig;

/// Items the bot needs to keep functioning: tomes, scrolls, regular keys, potions.
#[must_use]
pub fn is_essential_consumable(item: &Item) -> bool {
    let name = item.name.as_str();

    matches!(
        name,
        names::TOME_OF_TOWN_PORTAL
            | names::TOME_OF_IDENTIFY
            | names::SCROLL_OF_TOWN_PORTAL
            | names::SCROLL_OF_IDENTIFY
            | names::KEY
    ) || name.to_ascii_lowercase().contains("potion")
}

/// Item is reserved by one of the character's cube recipes.
#[must_use]
pub fn is_reserved_recipe_item(item: &Item, character: &CharacterConfig) -> bool {
    character.reserved_recipe_items.contains(&item.name)
}

/// The container the bot crafts with. Never dropped.
#[inline]
#[must_use]
pub fn is_survival_item(item: &Item) -> bool {
    item.name == names::HORADRIC_CUBE
}

/// A named jewel (not a gem, not a rune).
#[inline]
#[must_use]
pub fn is_named_jewel(item: &Item) -> bool {
    item.name == names::JEWEL
}
