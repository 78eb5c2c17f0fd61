//! # Character Configuration
//!
//! Two layers:
//!
//! 1. **Raw** (`RawCharacterConfig`) - mirrors the TOML file, free-form strings
//! 2. **Decoded** (`CharacterConfig`) - closed enums, normalized base names
//!
//! Decoding happens exactly once, at load time. Matching code never compares
//! configuration strings.
//!
//! ## File Format
//!
//! ```toml
//! leveling = false
//!
//! [runeword_maker]
//! enabled = true
//!
//! [cube]
//! reserved = ["Jewel", "PerfectAmethyst"]
//!
//! [[reroll."Spirit"]]
//! eth_mode = "noneth"
//! base_name = "crystalsword, broadsword"
//!
//! [[reroll."Spirit".stats]]
//! stat = "faster_cast_rate"
//! min = 35
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use warden_items::{nip_name, Item, Quality, Tier};

use crate::error::{RetentionError, RetentionResult};

// ============================================================================
// Closed filter enums
// ============================================================================

/// Ethereal filter of a reroll rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EthMode {
    /// Accepts ethereal and non-ethereal items.
    #[default]
    Any,
    /// Ethereal items only.
    Ethereal,
    /// Non-ethereal items only.
    NonEthereal,
}

impl EthMode {
    /// Returns true if an item with this ethereal flag passes the filter.
    #[inline]
    #[must_use]
    pub const fn accepts(self, ethereal: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Ethereal => ethereal,
            Self::NonEthereal => !ethereal,
        }
    }
}

impl FromStr for EthMode {
    type Err = RetentionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "any" => Ok(Self::Any),
            "eth" => Ok(Self::Ethereal),
            "noneth" => Ok(Self::NonEthereal),
            _ => Err(RetentionError::InvalidEthMode(s.to_string())),
        }
    }
}

/// Quality filter of a reroll rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum QualityMode {
    /// Any quality.
    #[default]
    Any,
    /// Normal quality only.
    Normal,
    /// Superior quality only.
    Superior,
}

impl QualityMode {
    /// Returns true if an item of `quality` passes the filter.
    #[inline]
    #[must_use]
    pub fn accepts(self, quality: Quality) -> bool {
        match self {
            Self::Any => true,
            Self::Normal => quality == Quality::Normal,
            Self::Superior => quality == Quality::Superior,
        }
    }
}

impl FromStr for QualityMode {
    type Err = RetentionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "any" => Ok(Self::Any),
            "normal" => Ok(Self::Normal),
            "superior" => Ok(Self::Superior),
            _ => Err(RetentionError::InvalidQualityMode(s.to_string())),
        }
    }
}

/// Base tier filter of a reroll rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TierFilter {
    /// Any tier.
    #[default]
    Any,
    /// Exactly this tier.
    Only(Tier),
}

impl TierFilter {
    /// Returns true if a base of `tier` passes the filter.
    #[inline]
    #[must_use]
    pub fn accepts(self, tier: Tier) -> bool {
        match self {
            Self::Any => true,
            Self::Only(wanted) => wanted == tier,
        }
    }
}

impl FromStr for TierFilter {
    type Err = RetentionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "any" => Ok(Self::Any),
            "normal" => Ok(Self::Only(Tier::Normal)),
            "exceptional" => Ok(Self::Only(Tier::Exceptional)),
            "elite" => Ok(Self::Only(Tier::Elite)),
            _ => Err(RetentionError::InvalidBaseTier(s.to_string())),
        }
    }
}

// ============================================================================
// Decoded rules
// ============================================================================

/// A minimum (and optional maximum) stat value a runeword roll must reach.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatRequirement {
    /// Stat name.
    pub stat: String,
    /// Stat layer.
    pub layer: u16,
    /// Inclusive minimum.
    pub min: i32,
    /// Inclusive maximum, if any.
    pub max: Option<i32>,
}

impl StatRequirement {
    /// Returns true if `item` satisfies this requirement. A missing stat reads as 0.
    #[must_use]
    pub fn is_met_by(&self, item: &Item) -> bool {
        let value = item.find_stat(&self.stat, self.layer).map_or(0, |s| s.value);
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

/// One reroll rule for a runeword.
///
/// When `base_names` is non-empty it fully replaces `base_type` and
/// `base_tier`: those two are never consulted for such a rule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RerollRule {
    /// Ethereal filter.
    pub eth_mode: EthMode,
    /// Quality filter.
    pub quality_mode: QualityMode,
    /// Explicit normalized base-name codes.
    pub base_names: Vec<String>,
    /// Exact base type string.
    pub base_type: Option<String>,
    /// Base tier filter.
    pub base_tier: TierFilter,
    /// Stat thresholds a crafted runeword must reach to be kept as-is.
    pub stats: Vec<StatRequirement>,
}

impl RerollRule {
    /// A rule with no conditions.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Sets the ethereal filter.
    #[must_use]
    pub fn eth(mut self, mode: EthMode) -> Self {
        self.eth_mode = mode;
        self
    }

    /// Sets the quality filter.
    #[must_use]
    pub fn quality(mut self, mode: QualityMode) -> Self {
        self.quality_mode = mode;
        self
    }

    /// Sets the explicit base-name list from a comma-separated string.
    #[must_use]
    pub fn base_names(mut self, list: &str) -> Self {
        self.base_names = split_base_names(list);
        self
    }

    /// Sets the exact base type.
    #[must_use]
    pub fn base_type(mut self, base_type: impl Into<String>) -> Self {
        self.base_type = Some(base_type.into());
        self
    }

    /// Sets the tier filter.
    #[must_use]
    pub fn tier(mut self, tier: Tier) -> Self {
        self.base_tier = TierFilter::Only(tier);
        self
    }

    /// Adds a minimum stat requirement.
    #[must_use]
    pub fn min_stat(mut self, stat: impl Into<String>, layer: u16, min: i32) -> Self {
        self.stats.push(StatRequirement {
            stat: stat.into(),
            layer,
            min,
            max: None,
        });
        self
    }
}

/// Splits, trims and normalizes a comma-separated base-name list.
fn split_base_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(nip_name)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Decoded per-character configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharacterConfig {
    /// Character is still in its leveling phase.
    pub leveling: bool,
    /// Runeword maker (and with it, the reroll subsystem) is enabled.
    pub runeword_maker_enabled: bool,
    /// Item names reserved by enabled cube recipes.
    pub reserved_recipe_items: BTreeSet<String>,
    /// Reroll rules keyed by runeword name.
    pub reroll_rules: HashMap<String, Vec<RerollRule>>,
}

impl CharacterConfig {
    /// Rules configured for a runeword (empty if none).
    #[must_use]
    pub fn rules_for(&self, runeword: &str) -> &[RerollRule] {
        self.reroll_rules
            .get(runeword)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns true if at least one runeword has at least one rule.
    #[must_use]
    pub fn has_reroll_rules(&self) -> bool {
        self.reroll_rules.values().any(|rules| !rules.is_empty())
    }

    /// Adds a reroll rule for a runeword.
    #[must_use]
    pub fn with_reroll_rule(mut self, runeword: impl Into<String>, rule: RerollRule) -> Self {
        self.reroll_rules.entry(runeword.into()).or_default().push(rule);
        self
    }

    /// Reserves an item name for cube recipes.
    #[must_use]
    pub fn with_reserved(mut self, name: impl Into<String>) -> Self {
        self.reserved_recipe_items.insert(name.into());
        self
    }

    /// Parses and decodes configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for malformed TOML and the `Invalid*` variants for
    /// values that do not decode.
    pub fn from_toml_str(content: &str) -> RetentionResult<Self> {
        let raw: RawCharacterConfig = toml::from_str(content).map_err(|e| RetentionError::Parse {
            path: PathBuf::new(),
            reason: e.to_string(),
        })?;
        raw.decode()
    }

    /// Loads configuration from a file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file exists but cannot be read, otherwise the
    /// same errors as [`CharacterConfig::from_toml_str`].
    pub fn load_from(path: &Path) -> RetentionResult<Self> {
        if !path.exists() {
            tracing::info!("No retention config found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| RetentionError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let raw: RawCharacterConfig = toml::from_str(&content).map_err(|e| RetentionError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config = raw.decode()?;
        tracing::info!(
            "Loaded retention config from {}: {} reserved items, {} runewords with reroll rules",
            path.display(),
            config.reserved_recipe_items.len(),
            config.reroll_rules.len()
        );
        Ok(config)
    }
}

// ============================================================================
// Raw file layer
// ============================================================================

/// The configuration file as written on disk.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCharacterConfig {
    /// Leveling-phase flag.
    pub leveling: bool,
    /// Runeword maker section.
    pub runeword_maker: RawRunewordMaker,
    /// Cube recipe section.
    pub cube: RawCube,
    /// Reroll rules keyed by runeword name.
    pub reroll: HashMap<String, Vec<RawRerollRule>>,
}

/// `[runeword_maker]` section.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRunewordMaker {
    /// Enables runeword making and rerolling.
    pub enabled: bool,
}

/// `[cube]` section.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCube {
    /// Item names reserved for enabled cube recipes.
    pub reserved: Vec<String>,
}

/// One `[[reroll."<name>"]]` entry.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRerollRule {
    /// "eth", "noneth" or empty.
    pub eth_mode: String,
    /// "normal", "superior" or empty.
    pub quality_mode: String,
    /// Comma-separated base names.
    pub base_name: String,
    /// Exact base type.
    pub base_type: String,
    /// "normal", "exceptional", "elite" or empty.
    pub base_tier: String,
    /// Stat thresholds.
    pub stats: Vec<RawStatRequirement>,
}

/// One `[[reroll."<name>".stats]]` entry.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawStatRequirement {
    /// Stat name.
    pub stat: String,
    /// Stat layer.
    pub layer: u16,
    /// Inclusive minimum.
    pub min: i32,
    /// Inclusive maximum.
    pub max: Option<i32>,
}

impl RawCharacterConfig {
    /// Decodes every free-form field into its typed form.
    ///
    /// # Errors
    ///
    /// Returns the first value that fails to decode.
    pub fn decode(self) -> RetentionResult<CharacterConfig> {
        let mut reroll_rules = HashMap::with_capacity(self.reroll.len());
        for (runeword, raw_rules) in self.reroll {
            let name = runeword.trim();
            if name.is_empty() {
                return Err(RetentionError::InvalidConfig(
                    "reroll rules need a runeword name".to_string(),
                ));
            }
            let rules = raw_rules
                .into_iter()
                .map(RawRerollRule::decode)
                .collect::<RetentionResult<Vec<_>>>()?;
            reroll_rules.insert(name.to_string(), rules);
        }

        Ok(CharacterConfig {
            leveling: self.leveling,
            runeword_maker_enabled: self.runeword_maker.enabled,
            reserved_recipe_items: self
                .cube
                .reserved
                .into_iter()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
            reroll_rules,
        })
    }
}

impl RawRerollRule {
    fn decode(self) -> RetentionResult<RerollRule> {
        let base_names = split_base_names(&self.base_name);
        if base_names.is_empty() && !self.base_name.trim().is_empty() {
            return Err(RetentionError::InvalidConfig(format!(
                "base_name {:?} lists no base names",
                self.base_name
            )));
        }

        let base_type = self.base_type.trim();
        Ok(RerollRule {
            eth_mode: self.eth_mode.parse()?,
            quality_mode: self.quality_mode.parse()?,
            base_names,
            base_type: (!base_type.is_empty()).then(|| base_type.to_string()),
            base_tier: self.base_tier.parse()?,
            stats: self
                .stats
                .into_iter()
                .map(RawStatRequirement::decode)
                .collect::<RetentionResult<Vec<_>>>()?,
        })
    }
}

impl RawStatRequirement {
    fn decode(self) -> RetentionResult<StatRequirement> {
        let stat = self.stat.trim();
        if stat.is_empty() {
            return Err(RetentionError::InvalidConfig(
                "stat requirement without a stat name".to_string(),
            ));
        }
        if let Some(max) = self.max {
            if max < self.min {
                return Err(RetentionError::InvalidConfig(format!(
                    "stat {stat}: max {max} is below min {}",
                    self.min
                )));
            }
        }

        Ok(StatRequirement {
            stat: stat.to_string(),
            layer: self.layer,
            min: self.min,
            max: self.max,
        })
    }
}
