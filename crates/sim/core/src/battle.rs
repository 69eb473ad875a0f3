//! Turn-by-turn battle and flee resolution.
//!
//! Both simulators replay the authoritative fight loop to a terminal outcome:
//! derive fresh randomness from `(xp, current_health, entropy)`, resolve the
//! adventurer's half-turn, then the beast's counter. Domain outcomes (the
//! beast dies, the adventurer dies, the flee succeeds) are ordinary result
//! variants, never errors.
//!
//! Termination is guaranteed without any iteration cap: both damage floors
//! are positive, so both health pools strictly decrease on every round that
//! does not already terminate.

use crate::combat::{
    self, CombatProfile, CombatResult, SpecialMatch, ATTACK_DAMAGE_FLOOR, COUNTER_DAMAGE_FLOOR,
};
use crate::encounter::attack_location;
use crate::entropy::{self, Entropy};
use crate::types::{item_at, AdventurerSnapshot, BeastSnapshot, EquippedItem, Slot};

/// Who acted in one half-turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleSide {
    Adventurer,
    Beast,
}

/// One half-turn of a simulated fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleEvent {
    pub side: BattleSide,
    pub damage: u32,
    pub is_critical: bool,
    /// Struck body slot; None for the adventurer's own attacks.
    pub location: Option<Slot>,
}

/// Terminal state of a simulated battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    BeastSlain { health_left: u32 },
    AdventurerSlain,
}

/// Full battle trace: the outcome plus every half-turn in order.
///
/// The killing blow is always the last event.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub events: Vec<BattleEvent>,
}

/// Terminal state of a simulated flee attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FleeOutcome {
    Fled { health_left: u32 },
    AdventurerSlain,
}

/// Full flee trace; failed rounds each contribute one beast counter event.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleeReport {
    pub outcome: FleeOutcome,
    pub events: Vec<BattleEvent>,
}

/// Simulates fighting the engaged beast to the death.
///
/// `adventurer.beast_health` is the beast's remaining pool. An adventurer
/// with no weapon still lands the attack floor each turn.
pub fn simulate_battle(
    adventurer: &AdventurerSnapshot,
    items: &[EquippedItem],
    beast: &BeastSnapshot,
    entropy: &Entropy,
) -> BattleReport {
    let weapon = item_at(items, Slot::Weapon);
    let ring = item_at(items, Slot::Ring);
    let adv_level = adventurer.level();

    let mut health = adventurer.health;
    let mut beast_health = adventurer.beast_health;
    let mut events = Vec::new();

    loop {
        let rands = entropy::derive_with_health(adventurer.xp, health, entropy);

        // Adventurer half-turn, driven by rnd1.
        let attack_rnd = rands.rnd1;
        let hit = adventurer_attack(weapon, ring, beast, adventurer, attack_rnd);
        events.push(BattleEvent {
            side: BattleSide::Adventurer,
            damage: hit.total_damage,
            is_critical: hit.is_critical,
            location: None,
        });
        if hit.total_damage >= beast_health {
            return BattleReport {
                outcome: BattleOutcome::BeastSlain {
                    health_left: health,
                },
                events,
            };
        }

        // Beast counter, driven by rnd2.
        let counter_rnd = rands.rnd2;
        let counter = beast_counter(items, beast, counter_rnd, adv_level);
        events.push(BattleEvent {
            side: BattleSide::Beast,
            damage: counter.damage,
            is_critical: counter.is_critical,
            location: Some(counter.location),
        });
        if counter.damage >= health {
            return BattleReport {
                outcome: BattleOutcome::AdventurerSlain,
                events,
            };
        }

        beast_health -= hit.total_damage;
        health -= counter.damage;
    }
}

/// Simulates fleeing the engaged beast.
///
/// Each round rolls `rnd1 mod level` against dexterity; success escapes with
/// no damage, failure eats one counter and retries. Zero dexterity can never
/// beat the roll, so the attempt is reported fatal immediately.
pub fn simulate_flee(
    adventurer: &AdventurerSnapshot,
    items: &[EquippedItem],
    beast: &BeastSnapshot,
    entropy: &Entropy,
) -> FleeReport {
    let dexterity = u32::from(adventurer.stats.dexterity);
    if dexterity == 0 {
        return FleeReport {
            outcome: FleeOutcome::AdventurerSlain,
            events: Vec::new(),
        };
    }

    let adv_level = adventurer.level();
    let level = adv_level.max(1);
    let mut health = adventurer.health;
    let mut events = Vec::new();

    loop {
        let rands = entropy::derive_with_health(adventurer.xp, health, entropy);

        let flee_rnd = rands.rnd1;
        let roll = (flee_rnd % u128::from(level)) as u32;
        if dexterity > roll {
            return FleeReport {
                outcome: FleeOutcome::Fled {
                    health_left: health,
                },
                events,
            };
        }

        let counter_rnd = rands.rnd2;
        let counter = beast_counter(items, beast, counter_rnd, adv_level);
        events.push(BattleEvent {
            side: BattleSide::Beast,
            damage: counter.damage,
            is_critical: counter.is_critical,
            location: Some(counter.location),
        });
        if counter.damage >= health {
            return FleeReport {
                outcome: FleeOutcome::AdventurerSlain,
                events,
            };
        }
        health -= counter.damage;
    }
}

/// The adventurer's weapon strike. No weapon still deals the attack floor.
fn adventurer_attack(
    weapon: Option<&EquippedItem>,
    ring: Option<&EquippedItem>,
    beast: &BeastSnapshot,
    adventurer: &AdventurerSnapshot,
    attack_rnd: u128,
) -> CombatResult {
    let Some((weapon, profile)) =
        weapon.and_then(|weapon| CombatProfile::of_item(weapon).map(|profile| (weapon, profile)))
    else {
        return CombatResult {
            total_damage: ATTACK_DAMAGE_FLOOR,
            is_critical: false,
        };
    };

    combat::attack_damage(
        profile,
        Some(CombatProfile::of_beast(beast)),
        SpecialMatch::between(weapon, beast),
        adventurer.stats.strength,
        u32::from(adventurer.stats.luck),
        ring,
        attack_rnd,
        ATTACK_DAMAGE_FLOOR,
    )
}

struct CounterAttack {
    damage: u32,
    is_critical: bool,
    location: Slot,
}

/// One beast counterattack: location from the round's rnd2, luck from the
/// adventurer's level, neck mitigation applied and then re-floored.
fn beast_counter(
    items: &[EquippedItem],
    beast: &BeastSnapshot,
    counter_rnd: u128,
    adv_level: u32,
) -> CounterAttack {
    let location_rnd = counter_rnd;
    let location = attack_location(location_rnd);
    let armor = item_at(items, location);

    let crit_rnd = counter_rnd;
    let result = combat::attack_damage(
        CombatProfile::of_beast(beast),
        armor.and_then(CombatProfile::of_item),
        SpecialMatch::NONE,
        0,
        adv_level,
        None,
        crit_rnd,
        COUNTER_DAMAGE_FLOOR,
    );

    let mitigation = combat::neck_mitigation(armor, item_at(items, Slot::Neck));
    let damage = result
        .total_damage
        .saturating_sub(mitigation)
        .max(COUNTER_DAMAGE_FLOOR);

    CounterAttack {
        damage,
        is_critical: result.is_critical,
        location,
    }
}
