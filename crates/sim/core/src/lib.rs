//! Deterministic encounter & combat simulation engine.
//!
//! `sim-core` reproduces, off-chain and ahead of any transaction, the exact
//! encounter generation and combat-resolution arithmetic of the authoritative
//! on-chain game: given the same adventurer snapshot, equipment, and entropy
//! word, every function here agrees with the chain bit-for-bit. The client
//! uses it to preview "what happens if I explore/attack/flee now" and to
//! forecast upcoming encounters.
//!
//! Everything is pure function composition: no component owns mutable state,
//! performs I/O, or caches results. Identical inputs always produce identical
//! outputs, so calls are idempotent and safely concurrent.
pub mod battle;
pub mod combat;
pub mod encounter;
pub mod entropy;
pub mod forecast;
pub mod reward;
pub mod tables;
pub mod types;

pub use battle::{
    simulate_battle, simulate_flee, BattleEvent, BattleOutcome, BattleReport, BattleSide,
    FleeOutcome, FleeReport,
};
pub use combat::{
    attack_damage, matchup, neck_mitigation, CombatProfile, CombatResult, Matchup, SpecialMatch,
    ATTACK_DAMAGE_FLOOR, COUNTER_DAMAGE_FLOOR,
};
pub use encounter::{
    resolve_encounter, BeastEncounter, Discovery, DiscoveryEncounter, Encounter,
    ObstacleEncounter, BEAST_HEALTH_CAP,
};
pub use entropy::{derive, derive_with_health, Entropy, Rands};
pub use forecast::{
    list_all_encounters, next_big_encounter, BigEncounter, ForecastEntry, MAX_FORECAST,
};
pub use reward::{gold_reward, MIN_GOLD_REWARD};
pub use tables::item_by_name;
pub use types::{
    item_at, level_from_xp, AdventurerSnapshot, BeastId, BeastSnapshot, Element, EquippedItem,
    InvalidEncounterId, InvalidItemId, ItemId, ItemType, ObstacleId, ObstacleSnapshot, Slot, Stats,
};
