//! # Runeword Reroll Protection
//!
//! Two independent checks decide whether an item feeds the reroll loop:
//!
//! - **Target**: the item already is a configured runeword, but its roll
//!   does not yet meet any applicable rule. It is kept to be rerolled.
//! - **Base**: the item is an empty socketed base that could become a
//!   configured runeword under one of its rules.
//!
//! Both are gated on the reroll subsystem being active (runeword maker on,
//! character past leveling, at least one rule configured).
//!
//! ## Base Matching
//!
//! ```text
//! eth filter ──► quality filter ──► explicit base names? ──yes──► name in list
//!                                          │
//!                                          no
//!                                          ▼
//!                                  base type ──► base tier
//! ```
//!
//! An explicit base-name list is exclusive: a rule that lists names never
//! falls back to type or tier, even when those would match.

use warden_items::Item;

use crate::config::RerollRule;
use crate::context::RetentionContext;

/// Why an item is protected by the reroll subsystem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RerollProtection {
    /// Crafted runeword whose roll does not yet meet an applicable rule.
    Target {
        /// The runeword name.
        runeword: String,
    },
    /// Uncrafted base that matches a rule of a recipe it fits.
    Base {
        /// The first runeword the base qualifies for.
        runeword: String,
    },
}

/// Runs both reroll checks. `None` when the subsystem is inactive or the item
/// is not protected.
#[must_use]
pub fn reroll_protection(item: &Item, ctx: &RetentionContext<'_>) -> Option<RerollProtection> {
    if !ctx.reroll_active() {
        return None;
    }

    protect_target(item, ctx).or_else(|| protect_base(item, ctx))
}

/// Target check.
#[must_use]
pub fn protect_target(item: &Item, ctx: &RetentionContext<'_>) -> Option<RerollProtection> {
    let runeword = item.runeword.as_deref()?;
    let rules = ctx.character.rules_for(runeword);
    if rules.is_empty() {
        return None;
    }

    let outcome = evaluate_runeword_rules(item, rules);
    if !outcome.applicable || outcome.met {
        return None;
    }

    Some(RerollProtection::Target {
        runeword: runeword.to_string(),
    })
}

/// Base check.
#[must_use]
pub fn protect_base(item: &Item, ctx: &RetentionContext<'_>) -> Option<RerollProtection> {
    if item.is_runeword() || item.has_socketed_items() {
        return None;
    }
    let sockets = item.sockets?;

    ctx.catalog
        .candidates_for(&item.type_code, sockets)
        .find(|recipe| {
            ctx.character
                .rules_for(&recipe.name)
                .iter()
                .any(|rule| base_matches_rule(item, rule))
        })
        .map(|recipe| RerollProtection::Base {
            runeword: recipe.name.clone(),
        })
}

/// Outcome of evaluating a crafted runeword against its rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    /// At least one rule applies to this item's base.
    pub applicable: bool,
    /// At least one applicable rule has all its stat requirements met.
    pub met: bool,
}

/// Evaluates every rule against a crafted runeword.
#[must_use]
pub fn evaluate_runeword_rules(item: &Item, rules: &[RerollRule]) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for rule in rules.iter().filter(|rule| base_matches_rule(item, rule)) {
        outcome.applicable = true;
        if rule.stats.iter().all(|req| req.is_met_by(item)) {
            outcome.met = true;
            break;
        }
    }

    outcome
}

/// Returns true if the item's base satisfies every structural condition of `rule`.
#[must_use]
pub fn base_matches_rule(item: &Item, rule: &RerollRule) -> bool {
    if !rule.eth_mode.accepts(item.ethereal) {
        return false;
    }
    if !rule.quality_mode.accepts(item.quality) {
        return false;
    }

    if !rule.base_names.is_empty() {
        let code = item.base_code();
        return rule.base_names.contains(&code);
    }

    if let Some(base_type) = &rule.base_type {
        if item.description.base_type != *base_type {
            return false;
        }
    }

    rule.base_tier.accepts(item.description.tier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CharacterConfig, EthMode, QualityMode};
    use warden_items::{Quality, RunewordCatalog, Tier};

    fn crystal_sword(sockets: u8) -> Item {
        Item::new(10, "CrystalSword", "swor")
            .with_sockets(sockets)
            .with_description("Crystal Sword", "swor", Tier::Normal)
    }

    fn active(rule: RerollRule) -> CharacterConfig {
        CharacterConfig {
            runeword_maker_enabled: true,
            ..CharacterConfig::default()
        }
        .with_reroll_rule("Spirit", rule)
    }

    #[test]
    fn test_rule_without_conditions_matches_everything() {
        assert!(base_matches_rule(&crystal_sword(4), &RerollRule::any()));
        assert!(base_matches_rule(&crystal_sword(4).ethereal(), &RerollRule::any()));
    }

    #[test]
    fn test_eth_mode_filter() {
        let plain = crystal_sword(4);
        let eth = crystal_sword(4).ethereal();

        let only_eth = RerollRule::any().eth(EthMode::Ethereal);
        let only_plain = RerollRule::any().eth(EthMode::NonEthereal);

        assert!(base_matches_rule(&eth, &only_eth));
        assert!(!base_matches_rule(&plain, &only_eth));
        assert!(base_matches_rule(&plain, &only_plain));
        assert!(!base_matches_rule(&eth, &only_plain));
    }

    #[test]
    fn test_quality_mode_filter() {
        let normal = crystal_sword(4);
        let superior = crystal_sword(4).with_quality(Quality::Superior);

        let rule = RerollRule::any().quality(QualityMode::Superior);
        assert!(base_matches_rule(&superior, &rule));
        assert!(!base_matches_rule(&normal, &rule));

        let rule = RerollRule::any().quality(QualityMode::Normal);
        assert!(base_matches_rule(&normal, &rule));
        assert!(!base_matches_rule(&superior, &rule));
    }

    #[test]
    fn test_explicit_names_suppress_type_and_tier() {
        let item = crystal_sword(4);

        // Listed name wins even though type and tier would reject.
        let listed = RerollRule::any()
            .base_names("broadsword, crystalsword")
            .base_type("axe")
            .tier(Tier::Elite);
        assert!(base_matches_rule(&item, &listed));

        // Unlisted name loses even though type and tier would accept.
        let unlisted = RerollRule::any()
            .base_names("phaseblade")
            .base_type("swor")
            .tier(Tier::Normal);
        assert!(!base_matches_rule(&item, &unlisted));
    }

    #[test]
    fn test_type_and_tier_when_no_names() {
        let item = crystal_sword(4);

        assert!(base_matches_rule(&item, &RerollRule::any().base_type("swor")));
        assert!(!base_matches_rule(&item, &RerollRule::any().base_type("axe")));
        assert!(base_matches_rule(&item, &RerollRule::any().tier(Tier::Normal)));
        assert!(!base_matches_rule(&item, &RerollRule::any().tier(Tier::Exceptional)));
    }

    #[test]
    fn test_base_socket_count_boundary() {
        // Spirit needs exactly four runes.
        let character = active(RerollRule::any());
        let catalog = RunewordCatalog::builtin();
        let ctx = RetentionContext::new(&character, &catalog);

        assert_eq!(protect_base(&crystal_sword(3), &ctx), None);
        assert_eq!(
            protect_base(&crystal_sword(4), &ctx),
            Some(RerollProtection::Base { runeword: "Spirit".to_string() })
        );
        assert_eq!(protect_base(&crystal_sword(5), &ctx), None);
    }

    #[test]
    fn test_base_skips_socketed_and_unsocketed() {
        let character = active(RerollRule::any());
        let catalog = RunewordCatalog::builtin();
        let ctx = RetentionContext::new(&character, &catalog);

        let mut no_socket_stat = crystal_sword(4);
        no_socket_stat.sockets = None;
        assert_eq!(protect_base(&no_socket_stat, &ctx), None);

        let filled = crystal_sword(4).with_socketed("TalRune");
        assert_eq!(protect_base(&filled, &ctx), None);
    }

    #[test]
    fn test_base_requires_accepted_type() {
        let character = active(RerollRule::any());
        let catalog = RunewordCatalog::builtin();
        let ctx = RetentionContext::new(&character, &catalog);

        // Spirit does not accept body armor.
        let armor = Item::new(11, "MagePlate", "tors")
            .with_sockets(4)
            .with_description("Mage Plate", "tors", Tier::Exceptional);
        assert_eq!(protect_base(&armor, &ctx), None);
    }

    #[test]
    fn test_target_without_rules_is_never_protected() {
        let character = active(RerollRule::any());
        let catalog = RunewordCatalog::builtin();
        let ctx = RetentionContext::new(&character, &catalog);

        let insight = crystal_sword(4).with_runeword("Insight");
        assert_eq!(protect_target(&insight, &ctx), None);
    }

    #[test]
    fn test_target_below_threshold_is_protected() {
        let character = active(RerollRule::any().min_stat("faster_cast_rate", 0, 35));
        let catalog = RunewordCatalog::builtin();
        let ctx = RetentionContext::new(&character, &catalog);

        let low_roll = crystal_sword(4)
            .with_runeword("Spirit")
            .with_stat("faster_cast_rate", 0, 25);
        assert_eq!(
            protect_target(&low_roll, &ctx),
            Some(RerollProtection::Target { runeword: "Spirit".to_string() })
        );

        let good_roll = crystal_sword(4)
            .with_runeword("Spirit")
            .with_stat("faster_cast_rate", 0, 35);
        assert_eq!(protect_target(&good_roll, &ctx), None);
    }

    #[test]
    fn test_target_with_no_applicable_rule_is_not_protected() {
        // Rule only covers ethereal bases; this Spirit is not ethereal.
        let character = active(
            RerollRule::any()
                .eth(EthMode::Ethereal)
                .min_stat("faster_cast_rate", 0, 35),
        );
        let catalog = RunewordCatalog::builtin();
        let ctx = RetentionContext::new(&character, &catalog);

        let spirit = crystal_sword(4).with_runeword("Spirit");
        assert_eq!(protect_target(&spirit, &ctx), None);
    }

    #[test]
    fn test_any_met_rule_releases_target() {
        let rules = [
            RerollRule::any().min_stat("faster_cast_rate", 0, 35),
            RerollRule::any().min_stat("mana", 0, 100),
        ];
        let item = crystal_sword(4)
            .with_runeword("Spirit")
            .with_stat("mana", 0, 112);

        assert_eq!(
            evaluate_runeword_rules(&item, &rules),
            RuleOutcome { applicable: true, met: true }
        );
    }

    #[test]
    fn test_gates() {
        let catalog = RunewordCatalog::builtin();
        let base = crystal_sword(4);

        let disabled = CharacterConfig::default().with_reroll_rule("Spirit", RerollRule::any());
        assert_eq!(reroll_protection(&base, &RetentionContext::new(&disabled, &catalog)), None);

        let leveling = CharacterConfig { leveling: true, ..active(RerollRule::any()) };
        assert_eq!(reroll_protection(&base, &RetentionContext::new(&leveling, &catalog)), None);

        let no_rules = CharacterConfig { runeword_maker_enabled: true, ..CharacterConfig::default() };
        assert_eq!(reroll_protection(&base, &RetentionContext::new(&no_rules, &catalog)), None);

        let on = active(RerollRule::any());
        assert!(reroll_protection(&base, &RetentionContext::new(&on, &catalog)).is_some());
    }
}
