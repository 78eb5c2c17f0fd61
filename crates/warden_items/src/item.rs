//! # Item Snapshots
//!
//! Read-only views of items as they exist in game memory at the moment
//! the snapshot was taken. Nothing in this module mutates an item after
//! construction.

use serde::{Deserialize, Serialize};

/// Unique identifier of an item instance (the in-game unit id).
pub type ItemId = u32;

/// Well-known item names.
pub mod names {
    /// The crafting container the bot itself relies on.
    pub const HORADRIC_CUBE: &str = "HoradricCube";
    /// Town portal tome.
    pub const TOME_OF_TOWN_PORTAL: &str = "TomeOfTownPortal";
    /// Identify tome.
    pub const TOME_OF_IDENTIFY: &str = "TomeOfIdentify";
    /// Town portal scroll.
    pub const SCROLL_OF_TOWN_PORTAL: &str = "ScrollOfTownPortal";
    /// Identify scroll.
    pub const SCROLL_OF_IDENTIFY: &str = "ScrollOfIdentify";
    /// Regular chest key. Uber keys have distinct names.
    pub const KEY: &str = "Key";
    /// Named jewel.
    pub const JEWEL: &str = "Jewel";
    /// Grand charm, the precursor of the charm reroll recipe.
    pub const GRAND_CHARM: &str = "GrandCharm";

    /// Perfect gems accepted by the charm reroll recipe.
    pub const PERFECT_GEMS: [&str; 7] = [
        "PerfectAmethyst",
        "PerfectDiamond",
        "PerfectEmerald",
        "PerfectRuby",
        "PerfectSapphire",
        "PerfectTopaz",
        "PerfectSkull",
    ];
}

/// Well-known item type codes.
pub mod type_codes {
    /// Amethyst gems (all grades).
    pub const AMETHYST: &str = "gema";
    /// Diamond gems.
    pub const DIAMOND: &str = "gemd";
    /// Emerald gems.
    pub const EMERALD: &str = "geme";
    /// Ruby gems.
    pub const RUBY: &str = "gemr";
    /// Sapphire gems.
    pub const SAPPHIRE: &str = "gems";
    /// Topaz gems.
    pub const TOPAZ: &str = "gemt";
    /// Skulls.
    pub const SKULL: &str = "gemz";

    /// Every gem subtype.
    pub const GEMS: [&str; 7] = [AMETHYST, DIAMOND, EMERALD, RUBY, SAPPHIRE, TOPAZ, SKULL];

    /// Small charm.
    pub const SMALL_CHARM: &str = "scha";
    /// Large charm.
    pub const LARGE_CHARM: &str = "mcha";
    /// Grand charm.
    pub const GRAND_CHARM: &str = "lcha";
    /// Jewel.
    pub const JEWEL: &str = "jewl";
}

/// Item quality, ordered from worst to best.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Quality {
    /// Low quality (crude, damaged).
    Low = 1,
    /// Plain white item.
    #[default]
    Normal = 2,
    /// Superior white item.
    Superior = 3,
    /// Magic (blue).
    Magic = 4,
    /// Set item.
    Set = 5,
    /// Rare (yellow).
    Rare = 6,
    /// Unique.
    Unique = 7,
    /// Crafted.
    Crafted = 8,
}

impl Quality {
    /// Returns true for magic quality and above (items that need identifying).
    #[inline]
    #[must_use]
    pub const fn is_magic_or_above(self) -> bool {
        self as u8 >= Self::Magic as u8
    }
}

/// Base item tier derived from the item description.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Normal base.
    #[default]
    Normal,
    /// Exceptional base.
    Exceptional,
    /// Elite base.
    Elite,
}

/// Where an item currently lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageLocation {
    /// Character inventory.
    #[default]
    Inventory,
    /// Personal stash tab.
    Stash,
    /// Shared stash tabs.
    SharedStash,
    /// Horadric cube contents.
    Cube,
    /// Equipped on the character.
    Equipped,
    /// Belt slots.
    Belt,
    /// Vendor window.
    Vendor,
}

/// Static description of the item's base.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDescription {
    /// Human base name, e.g. "Crystal Sword".
    pub name: String,
    /// Base type string, e.g. "swor".
    pub base_type: String,
    /// Normal / exceptional / elite.
    pub tier: Tier,
}

/// A single stat value on an item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStat {
    /// Stat name, e.g. "faster_cast_rate".
    pub stat: String,
    /// Stat layer (skill id for per-skill stats, 0 otherwise).
    pub layer: u16,
    /// Value.
    pub value: i32,
}

/// An immutable item snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unit id.
    pub id: ItemId,
    /// Item name, e.g. "GrandCharm".
    pub name: String,
    /// Stable type code, e.g. "lcha".
    pub type_code: String,
    /// Quality tier.
    pub quality: Quality,
    /// Ethereal flag.
    pub ethereal: bool,
    /// Runeword name when the item is a runeword.
    pub runeword: Option<String>,
    /// Socket count, `None` when the item carries no socket stat.
    pub sockets: Option<u8>,
    /// Names of items currently socketed into this one.
    pub socketed: Vec<String>,
    /// Base description.
    pub description: ItemDescription,
    /// Stat list.
    pub stats: Vec<ItemStat>,
    /// Storage location.
    pub location: StorageLocation,
}

impl Item {
    /// Creates a plain normal-quality item with no sockets or stats.
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>, type_code: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            type_code: type_code.into(),
            quality: Quality::Normal,
            ethereal: false,
            runeword: None,
            sockets: None,
            socketed: Vec::new(),
            description: ItemDescription::default(),
            stats: Vec::new(),
            location: StorageLocation::Inventory,
        }
    }

    /// Sets the quality.
    #[must_use]
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Marks the item ethereal.
    #[must_use]
    pub fn ethereal(mut self) -> Self {
        self.ethereal = true;
        self
    }

    /// Marks the item as the named runeword.
    #[must_use]
    pub fn with_runeword(mut self, name: impl Into<String>) -> Self {
        self.runeword = Some(name.into());
        self
    }

    /// Sets the socket count.
    #[must_use]
    pub fn with_sockets(mut self, sockets: u8) -> Self {
        self.sockets = Some(sockets);
        self
    }

    /// Adds a socketed item.
    #[must_use]
    pub fn with_socketed(mut self, name: impl Into<String>) -> Self {
        self.socketed.push(name.into());
        self
    }

    /// Sets the base description.
    #[must_use]
    pub fn with_description(mut self, name: impl Into<String>, base_type: impl Into<String>, tier: Tier) -> Self {
        self.description = ItemDescription {
            name: name.into(),
            base_type: base_type.into(),
            tier,
        };
        self
    }

    /// Adds a stat.
    #[must_use]
    pub fn with_stat(mut self, stat: impl Into<String>, layer: u16, value: i32) -> Self {
        self.stats.push(ItemStat {
            stat: stat.into(),
            layer,
            value,
        });
        self
    }

    /// Sets the storage location.
    #[must_use]
    pub fn at(mut self, location: StorageLocation) -> Self {
        self.location = location;
        self
    }

    /// Returns true if this item is a runeword.
    #[inline]
    #[must_use]
    pub fn is_runeword(&self) -> bool {
        self.runeword.is_some()
    }

    /// Returns true if anything is socketed into this item.
    #[inline]
    #[must_use]
    pub fn has_socketed_items(&self) -> bool {
        !self.socketed.is_empty()
    }

    /// Finds a stat by name and layer.
    #[must_use]
    pub fn find_stat(&self, stat: &str, layer: u16) -> Option<&ItemStat> {
        self.stats.iter().find(|s| s.stat == stat && s.layer == layer)
    }

    /// Normalized base-name code of this item's description.
    #[must_use]
    pub fn base_code(&self) -> String {
        nip_name(&self.description.name)
    }

    /// Returns true if the item's type code is a gem subtype.
    #[must_use]
    pub fn is_gem(&self) -> bool {
        type_codes::GEMS
            .iter()
            .any(|code| self.type_code.eq_ignore_ascii_case(code))
    }
}

/// Normalizes a human item name into its rule-language code.
///
/// Keeps ASCII alphanumerics only, lowercased: "Colossus Blade" becomes
/// "colossusblade", "Archon Plate" becomes "archonplate".
#[must_use]
pub fn nip_name(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
