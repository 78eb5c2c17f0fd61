//! # Runeword Catalog
//!
//! **Static recipe table, loaded once, read-only for the run.**
//!
//! A runeword is produced by socketing a specific ordered sequence of runes
//! into a base item whose socket count equals the sequence length and whose
//! type code is one the recipe accepts.
//!
//! ## Example
//!
//! ```rust,ignore
//! let catalog = RunewordCatalog::builtin();
//! let spirit = catalog.get("Spirit").unwrap();
//! assert_eq!(spirit.rune_count(), 4);
//!
//! // Every recipe a 4-socket crystal sword could become
//! let candidates: Vec<_> = catalog.candidates_for("swor", 4).collect();
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{ItemsError, ItemsResult};

/// A runeword recipe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunewordRecipe {
    /// Runeword name, e.g. "Spirit".
    pub name: String,
    /// Required runes, in socketing order.
    pub runes: Vec<String>,
    /// Accepted base item type codes.
    pub base_types: Vec<String>,
}

impl RunewordRecipe {
    /// Creates a new recipe with basic validation.
    ///
    /// # Errors
    ///
    /// Returns error if the recipe has no runes or no accepted base types.
    pub fn new(name: &str, runes: &[&str], base_types: &[&str]) -> ItemsResult<Self> {
        if runes.is_empty() {
            return Err(ItemsError::InvalidRecipe {
                name: name.to_string(),
                reason: "recipe must require at least one rune".to_string(),
            });
        }
        if base_types.is_empty() {
            return Err(ItemsError::InvalidRecipe {
                name: name.to_string(),
                reason: "recipe must accept at least one base type".to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            runes: runes.iter().map(|r| (*r).to_string()).collect(),
            base_types: base_types.iter().map(|b| (*b).to_string()).collect(),
        })
    }

    /// Number of runes, which is also the required socket count.
    #[inline]
    #[must_use]
    pub fn rune_count(&self) -> usize {
        self.runes.len()
    }

    /// Returns true if `type_code` is an accepted base for this recipe.
    #[must_use]
    pub fn accepts_base(&self, type_code: &str) -> bool {
        self.base_types.iter().any(|b| b == type_code)
    }
}

/// The runeword catalog.
///
/// Recipes keep their registration order so that iteration is deterministic.
#[derive(Debug, Default)]
pub struct RunewordCatalog {
    /// Recipes in registration order.
    recipes: Vec<RunewordRecipe>,
    /// Name to index into `recipes`.
    by_name: HashMap<String, usize>,
}

impl RunewordCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a recipe to the catalog.
    ///
    /// # Errors
    ///
    /// Returns error if a recipe with the same name already exists.
    pub fn add_recipe(&mut self, recipe: RunewordRecipe) -> ItemsResult<()> {
        if self.by_name.contains_key(&recipe.name) {
            return Err(ItemsError::DuplicateRuneword(recipe.name));
        }

        self.by_name.insert(recipe.name.clone(), self.recipes.len());
        self.recipes.push(recipe);
        Ok(())
    }

    /// Gets a recipe by runeword name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RunewordRecipe> {
        self.by_name.get(name).map(|&idx| &self.recipes[idx])
    }

    /// Returns all recipes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RunewordRecipe> {
        self.recipes.iter()
    }

    /// Returns the number of recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Returns true if the catalog holds no recipes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Recipes a base with `sockets` sockets and type `type_code` could become.
    pub fn candidates_for<'a>(
        &'a self,
        type_code: &'a str,
        sockets: u8,
    ) -> impl Iterator<Item = &'a RunewordRecipe> + 'a {
        self.recipes
            .iter()
            .filter(move |r| r.rune_count() == usize::from(sockets) && r.accepts_base(type_code))
    }

    /// The built-in catalog of commonly crafted runewords.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (name, runes, bases) in BUILTIN_RUNEWORDS {
            let added = RunewordRecipe::new(name, runes, bases).and_then(|recipe| catalog.add_recipe(recipe));
            debug_assert!(added.is_ok(), "builtin runeword {name} rejected: {added:?}");
        }
        catalog
    }
}

const SWORDS: &str = "swor";
const AXES: &str = "axe";
const MACES: &str = "mace";
const CLUBS: &str = "club";
const HAMMERS: &str = "hamm";
const SCEPTERS: &str = "scep";
const WANDS: &str = "wand";
const STAVES: &str = "staf";
const POLEARMS: &str = "pole";
const SPEARS: &str = "spea";
const BOWS: &str = "bow";
const CROSSBOWS: &str = "xbow";
const AMAZON_BOWS: &str = "abow";
const AMAZON_SPEARS: &str = "aspe";
const DAGGERS: &str = "knif";
const CLAWS: &str = "h2h";
const ORBS: &str = "orb";
const BODY_ARMOR: &str = "tors";
const SHIELDS: &str = "shie";
const PALADIN_SHIELDS: &str = "ashd";
const NECRO_HEADS: &str = "head";
const HELMS: &str = "helm";
const CIRCLETS: &str = "circ";
const PELTS: &str = "pelt";
const BARB_HELMS: &str = "phlm";

type BuiltinRecipe = (&'static str, &'static [&'static str], &'static [&'static str]);

const MELEE: &[&str] = &[
    SWORDS, AXES, MACES, CLUBS, HAMMERS, SCEPTERS, POLEARMS, SPEARS, DAGGERS, CLAWS,
    AMAZON_SPEARS,
];
const ALL_WEAPONS: &[&str] = &[
    SWORDS, AXES, MACES, CLUBS, HAMMERS, SCEPTERS, WANDS, STAVES, POLEARMS, SPEARS, BOWS,
    CROSSBOWS, AMAZON_BOWS, AMAZON_SPEARS, DAGGERS, CLAWS, ORBS,
];
const ALL_SHIELDS: &[&str] = &[SHIELDS, PALADIN_SHIELDS, NECRO_HEADS];
const ALL_HELMS: &[&str] = &[HELMS, CIRCLETS, PELTS, BARB_HELMS];

const BUILTIN_RUNEWORDS: &[BuiltinRecipe] = &[
    ("Ancient's Pledge", &["RalRune", "OrtRune", "TalRune"], ALL_SHIELDS),
    ("Stealth", &["TalRune", "EthRune"], &[BODY_ARMOR]),
    ("Lore", &["OrtRune", "SolRune"], ALL_HELMS),
    ("Rhyme", &["ShaelRune", "EthRune"], ALL_SHIELDS),
    ("Smoke", &["NefRune", "LumRune"], &[BODY_ARMOR]),
    ("Treachery", &["ShaelRune", "ThulRune", "LemRune"], &[BODY_ARMOR]),
    ("Insight", &["RalRune", "TirRune", "TalRune", "SolRune"], &[
        POLEARMS, STAVES, BOWS, CROSSBOWS, AMAZON_BOWS, AMAZON_SPEARS, SPEARS,
    ]),
    ("Spirit", &["TalRune", "ThulRune", "OrtRune", "AmnRune"], &[
        SWORDS, SHIELDS, PALADIN_SHIELDS, NECRO_HEADS,
    ]),
    ("Heart of the Oak", &["KoRune", "VexRune", "PulRune", "ThulRune"], &[
        STAVES, MACES, CLUBS, HAMMERS, SCEPTERS, WANDS,
    ]),
    ("Oath", &["ShaelRune", "PulRune", "MalRune", "LumRune"], &[
        SWORDS, AXES, MACES, CLUBS, HAMMERS, SCEPTERS,
    ]),
    ("Exile", &["VexRune", "OhmRune", "IstRune", "DolRune"], &[PALADIN_SHIELDS]),
    ("Fortitude", &["ElRune", "SolRune", "DolRune", "LoRune"], &[
        BODY_ARMOR, SWORDS, AXES, MACES, CLUBS, HAMMERS, SCEPTERS, POLEARMS, SPEARS, BOWS,
        CROSSBOWS, DAGGERS, CLAWS,
    ]),
    ("Chains of Honor", &["DolRune", "UmRune", "BerRune", "IstRune"], &[BODY_ARMOR]),
    ("Infinity", &["BerRune", "MalRune", "BerRune", "IstRune"], &[POLEARMS, SPEARS, AMAZON_SPEARS]),
    ("Phoenix", &["VexRune", "VexRune", "LoRune", "JahRune"], &[
        SWORDS, AXES, MACES, POLEARMS, SPEARS, SHIELDS, PALADIN_SHIELDS,
    ]),
    ("Dream", &["IoRune", "JahRune", "PulRune"], &[HELMS, CIRCLETS, PELTS, BARB_HELMS, SHIELDS, PALADIN_SHIELDS]),
    ("Enigma", &["JahRune", "IthRune", "BerRune"], &[BODY_ARMOR]),
    ("Grief", &["EthRune", "TirRune", "LoRune", "MalRune", "RalRune"], &[SWORDS, AXES]),
    ("Call to Arms", &["AmnRune", "RalRune", "MalRune", "IstRune", "OhmRune"], ALL_WEAPONS),
    ("Beast", &["BerRune", "TirRune", "UmRune", "MalRune", "LumRune"], &[AXES, SCEPTERS, HAMMERS]),
    ("Breath of the Dying", &["VexRune", "HelRune", "ElRune", "EldRune", "ZodRune", "EthRune"], ALL_WEAPONS),
    ("Last Wish", &["JahRune", "MalRune", "JahRune", "SurRune", "JahRune", "BerRune"], &[
        SWORDS, AXES, HAMMERS,
    ]),
    ("Doom", &["HelRune", "OhmRune", "UmRune", "LoRune", "ChamRune"], &[AXES, POLEARMS, HAMMERS]),
    ("Silence", &["DolRune", "EldRune", "HelRune", "IstRune", "TirRune", "VexRune"], MELEE),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_well_formed() {
        let catalog = RunewordCatalog::builtin();
        assert_eq!(catalog.len(), BUILTIN_RUNEWORDS.len(), "every builtin entry must register");

        for recipe in catalog.iter() {
            assert!(recipe.rune_count() >= 2);
            assert!(!recipe.base_types.is_empty());
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let catalog = RunewordCatalog::builtin();
        let spirit = catalog.get("Spirit").unwrap();
        assert_eq!(spirit.runes, vec!["TalRune", "ThulRune", "OrtRune", "AmnRune"]);
        assert!(spirit.accepts_base("swor"));
        assert!(!spirit.accepts_base("tors"));
        assert!(catalog.get("NotARuneword").is_none());
    }

    #[test]
    fn test_duplicate_recipe_rejected() {
        let mut catalog = RunewordCatalog::new();
        catalog
            .add_recipe(RunewordRecipe::new("Stealth", &["TalRune", "EthRune"], &["tors"]).unwrap())
            .unwrap();

        let result = catalog
            .add_recipe(RunewordRecipe::new("Stealth", &["TalRune", "EthRune"], &["tors"]).unwrap());
        assert_eq!(result, Err(ItemsError::DuplicateRuneword("Stealth".to_string())));
    }

    #[test]
    fn test_invalid_recipe_rejected() {
        assert!(matches!(
            RunewordRecipe::new("Empty", &[], &["tors"]),
            Err(ItemsError::InvalidRecipe { .. })
        ));
        assert!(matches!(
            RunewordRecipe::new("Baseless", &["ElRune"], &[]),
            Err(ItemsError::InvalidRecipe { .. })
        ));
    }

    #[test]
    fn test_candidates_filter_by_socket_count_and_type() {
        let catalog = RunewordCatalog::builtin();

        let four_socket_swords: Vec<&str> =
            catalog.candidates_for("swor", 4).map(|r| r.name.as_str()).collect();
        assert!(four_socket_swords.contains(&"Spirit"));
        assert!(four_socket_swords.contains(&"Oath"));
        assert!(!four_socket_swords.contains(&"Grief"), "Grief needs five sockets");
        assert!(!four_socket_swords.contains(&"Insight"), "Insight does not accept swords");

        let three_socket_armor: Vec<&str> =
            catalog.candidates_for("tors", 3).map(|r| r.name.as_str()).collect();
        assert_eq!(three_socket_armor, vec!["Treachery", "Enigma"]);
    }
}
