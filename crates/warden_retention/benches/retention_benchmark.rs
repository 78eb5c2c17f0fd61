//! Benchmark for the retention decision hot path.
//!
//! A bulk drop pass calls `decide` once per stored item, so a full stash
//! must clear in well under a frame.
//!
//! Run with: cargo bench --package warden_retention --bench retention_benchmark

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use warden_items::{type_codes, Item, Quality, RunewordCatalog, Tier};
use warden_retention::{
    base_matches_rule, decide, plan_drop, CategoryToggles, CharacterConfig, DropManager, EthMode, RerollRule,
    RetentionContext,
};

struct SelectRings;

impl DropManager for SelectRings {
    fn filters_enabled(&self) -> bool {
        true
    }

    fn use_pickit(&self) -> bool {
        false
    }

    fn should_drop(&self, name: &str, _quality: Quality, _type_code: &str, _is_runeword: bool) -> bool {
        name == "Ring"
    }

    fn selected_only(&self) -> bool {
        false
    }

    fn has_remaining_quota(&self, _name: &str) -> bool {
        true
    }

    fn category_toggles(&self) -> Option<CategoryToggles> {
        None
    }
}

fn character() -> CharacterConfig {
    CharacterConfig {
        runeword_maker_enabled: true,
        ..CharacterConfig::default()
    }
    .with_reroll_rule("Spirit", RerollRule::any().eth(EthMode::NonEthereal).min_stat("faster_cast_rate", 0, 35))
    .with_reroll_rule("Grief", RerollRule::any().base_names("phaseblade, berserkeraxe"))
    .with_reroll_rule("Enigma", RerollRule::any().base_type("tors").tier(Tier::Elite))
    .with_reserved("PerfectAmethyst")
}

fn stash() -> Vec<Item> {
    (0..100u32)
        .map(|id| match id % 5 {
            0 => Item::new(id, "Ring", "ring").with_quality(Quality::Rare),
            1 => Item::new(id, "CrystalSword", "swor")
                .with_sockets(4)
                .with_description("Crystal Sword", "swor", Tier::Normal),
            2 => Item::new(id, "PerfectAmethyst", type_codes::AMETHYST),
            3 => Item::new(id, "GrandCharm", type_codes::GRAND_CHARM).with_quality(Quality::Magic),
            _ => Item::new(id, "ArchonPlate", "tors")
                .with_sockets(3)
                .with_description("Archon Plate", "tors", Tier::Elite),
        })
        .collect()
}

fn benchmark_decide(c: &mut Criterion) {
    let character = character();
    let catalog = RunewordCatalog::builtin();
    let drop = SelectRings;
    let ctx = RetentionContext::new(&character, &catalog).with_drop_manager(&drop);
    let items = stash();

    c.bench_function("decide_single_item", |b| {
        let mut i = 0usize;
        b.iter(|| {
            i = (i + 1) % items.len();
            black_box(decide(black_box(&items[i]), &ctx))
        });
    });

    c.bench_function("plan_drop_100_items", |b| {
        b.iter(|| black_box(plan_drop(black_box(&items), &ctx).drop.len()));
    });
}

fn benchmark_base_match(c: &mut Criterion) {
    let rule = RerollRule::any().base_names("phaseblade, crystalsword, berserkeraxe");
    let base = Item::new(1, "CrystalSword", "swor")
        .with_sockets(4)
        .with_description("Crystal Sword", "swor", Tier::Normal);

    c.bench_function("base_matches_rule_names", |b| {
        b.iter(|| black_box(base_matches_rule(black_box(&base), &rule)));
    });
}

criterion_group!(benches, benchmark_decide, benchmark_base_match);
criterion_main!(benches);
