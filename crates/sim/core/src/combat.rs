//! Directional damage calculation.
//!
//! This module provides pure functions for computing the damage one
//! "weapon-like" entity deals to one "armor-like" entity. It is used in both
//! directions: adventurer weapon against beast, and beast/obstacle against the
//! adventurer's armor at the struck location.
//!
//! # Arithmetic
//!
//! Every operation is integer floor division, and flooring happens only at the
//! points the authoritative formulas floor. The single fractional intermediate
//! (`base · 1.5` against an unarmored defender) is carried exactly in doubled
//! units, so no floating point ever enters the pipeline.

use crate::types::{BeastSnapshot, Element, EquippedItem, ItemId, ItemType, ObstacleSnapshot};

/// Damage floor for the adventurer's own attacks.
pub const ATTACK_DAMAGE_FLOOR: u32 = 4;

/// Damage floor for counterattacks and obstacles.
pub const COUNTER_DAMAGE_FLOOR: u32 = 2;

/// Outcome of one directional damage computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatResult {
    pub total_damage: u32,
    pub is_critical: bool,
}

/// Elemental relation between an attack type and an armor type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Matchup {
    /// +50% damage (Magic>Metal, Blade>Cloth, Bludgeon>Hide).
    Strong,
    /// Unlisted pairing; damage unchanged.
    Fair,
    /// −50% damage; the exact reverse of every Strong pairing.
    Weak,
}

/// The fixed three-way elemental matchup.
pub const fn matchup(attack: Element, defense: Element) -> Matchup {
    use Element::*;
    match (attack, defense) {
        (Magic, Metal) | (Blade, Cloth) | (Bludgeon, Hide) => Matchup::Strong,
        (Magic, Hide) | (Blade, Metal) | (Bludgeon, Cloth) => Matchup::Weak,
        _ => Matchup::Fair,
    }
}

/// What a combatant looks like to the damage formulas: element, tier, level.
///
/// Weapons, armor pieces, beasts, and obstacles all reduce to this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatProfile {
    pub element: Element,
    pub tier: u8,
    pub level: u32,
}

impl CombatProfile {
    pub const fn new(element: Element, tier: u8, level: u32) -> Self {
        Self {
            element,
            tier,
            level,
        }
    }

    /// Profile of an equipped item; None for jewelry, which never fights.
    pub fn of_item(item: &EquippedItem) -> Option<Self> {
        Some(Self {
            element: item.element()?,
            tier: item.tier(),
            level: item.level(),
        })
    }

    pub fn of_beast(beast: &BeastSnapshot) -> Self {
        Self {
            element: beast.element(),
            tier: beast.tier(),
            level: beast.level,
        }
    }

    pub fn of_obstacle(obstacle: &ObstacleSnapshot) -> Self {
        Self {
            element: obstacle.element(),
            tier: obstacle.tier(),
            level: obstacle.level,
        }
    }

    /// `level · (6 − tier)`: base attack when attacking, base armor when
    /// defending.
    pub fn base_power(&self) -> u64 {
        u64::from(self.level) * (6 - u64::from(self.tier))
    }
}

/// Which of the weapon's unlocked name fragments match the target beast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpecialMatch {
    pub prefix: bool,
    pub suffix: bool,
}

impl SpecialMatch {
    /// No fragment matches; used for every non-beast target.
    pub const NONE: Self = Self {
        prefix: false,
        suffix: false,
    };

    /// Compares a weapon's unlocked fragments against a beast's name.
    /// Fragment 0 (locked) never matches.
    pub fn between(weapon: &EquippedItem, beast: &BeastSnapshot) -> Self {
        Self {
            prefix: weapon.special2 != 0 && weapon.special2 == beast.prefix,
            suffix: weapon.special3 != 0 && weapon.special3 == beast.suffix,
        }
    }
}

/// Computes directional damage.
///
/// # Formula
///
/// ```text
/// base_attack = level · (6 − tier)
/// elemental   = base ± base/2 per matchup, or base · 1.5 with no defender
/// strength    = ⌊elemental · strength · 10 / 100⌋
/// critical    = luck > entropy % 100
///             ? ⌊elemental/5⌋ · (entropy % 5 + 1)   (+3%·√xp Titanium Ring)
///             : 0
/// special     = prefix: ⌊elemental · (entropy % 4 + 4)⌋
///             + suffix: ⌊elemental/4⌋ · (entropy % 4 + 1)
///               (sum +3%·√xp Platinum Ring)
/// total       = max(⌊elemental + strength + critical + special⌋ − base_armor,
///               floor)
/// ```
///
/// Neck mitigation is deliberately NOT part of this function; callers apply
/// [`neck_mitigation`] as a separate step so each call site keeps its own
/// location derivation and re-flooring rule explicit.
pub fn attack_damage(
    attacker: CombatProfile,
    defender: Option<CombatProfile>,
    specials: SpecialMatch,
    strength: u8,
    luck: u32,
    ring: Option<&EquippedItem>,
    entropy: u128,
    floor: u32,
) -> CombatResult {
    let base = attacker.base_power();

    // Elemental damage in half units; only the no-defender 1.5x multiplier
    // can produce a half.
    let (elemental_x2, base_armor) = match defender {
        Some(defender) => {
            let adjusted = match matchup(attacker.element, defender.element) {
                Matchup::Strong => base + base / 2,
                Matchup::Fair => base,
                Matchup::Weak => base - base / 2,
            };
            (adjusted * 2, defender.base_power())
        }
        None => (base * 3, 0),
    };

    let strength_bonus = if strength == 0 {
        0
    } else {
        elemental_x2 * u64::from(strength) / 20
    };

    let crit_bonus = critical_hit_bonus(elemental_x2, luck, ring, entropy);
    let special_bonus = special_attack_bonus(elemental_x2, specials, ring, entropy);

    let total = (elemental_x2 / 2 + strength_bonus + crit_bonus + special_bonus) as i64
        - base_armor as i64;

    CombatResult {
        total_damage: total.max(i64::from(floor)) as u32,
        is_critical: crit_bonus > 0,
    }
}

/// Critical bonus: `⌊elemental/5⌋ · (entropy % 5 + 1)` when the luck check
/// passes, scaled +3% per √xp of an equipped Titanium Ring.
fn critical_hit_bonus(
    elemental_x2: u64,
    luck: u32,
    ring: Option<&EquippedItem>,
    entropy: u128,
) -> u64 {
    if u128::from(luck) <= entropy % 100 {
        return 0;
    }

    let mut bonus = elemental_x2 / 10 * ((entropy % 5) as u64 + 1);
    if bonus > 0 {
        if let Some(ring) = ring {
            if ring.id == ItemId::TITANIUM_RING {
                bonus += bonus * 3 * u64::from(ring.level()) / 100;
            }
        }
    }
    bonus
}

/// Name-fragment bonus, weapon-vs-beast only. The Platinum Ring scales the
/// combined sum, not the individual fragments.
fn special_attack_bonus(
    elemental_x2: u64,
    specials: SpecialMatch,
    ring: Option<&EquippedItem>,
    entropy: u128,
) -> u64 {
    let roll = (entropy % 4) as u64;

    let prefix_bonus = if specials.prefix {
        elemental_x2 * (roll + 4) / 2
    } else {
        0
    };
    let suffix_bonus = if specials.suffix {
        elemental_x2 / 8 * (roll + 1)
    } else {
        0
    };

    let mut total = prefix_bonus + suffix_bonus;
    if total > 0 {
        if let Some(ring) = ring {
            if ring.id == ItemId::PLATINUM_RING {
                total += total * 3 * u64::from(ring.level()) / 100;
            }
        }
    }
    total
}

/// Damage absorbed by a matched neck item:
/// `⌊√armor.xp · (6 − armor.tier) · √neck.xp · 3 / 100⌋`.
///
/// Pairings: Cloth+Amulet, Hide+Pendant, Metal+Necklace. Returns 0 when the
/// pairing does not apply. Callers subtract this from an already-computed
/// damage value; whether the result is re-floored afterwards is the call
/// site's rule, not this function's.
pub fn neck_mitigation(armor: Option<&EquippedItem>, neck: Option<&EquippedItem>) -> u32 {
    let (Some(armor), Some(neck)) = (armor, neck) else {
        return 0;
    };

    let paired = match armor.id.item_type() {
        ItemType::Cloth => neck.id == ItemId::AMULET,
        ItemType::Hide => neck.id == ItemId::PENDANT,
        ItemType::Metal => neck.id == ItemId::NECKLACE,
        _ => false,
    };
    if !paired {
        return 0;
    }

    (u64::from(armor.level()) * (6 - u64::from(armor.tier())) * u64::from(neck.level()) * 3 / 100)
        as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemId;

    fn blade_attacker() -> CombatProfile {
        // base_attack = 10 · (6 − 1) = 50
        CombatProfile::new(Element::Blade, 1, 10)
    }

    fn cloth_defender() -> CombatProfile {
        // base_armor = 2 · (6 − 5) = 2
        CombatProfile::new(Element::Cloth, 5, 2)
    }

    #[test]
    fn matchup_is_antisymmetric() {
        use Element::*;
        let strong = [(Magic, Metal), (Blade, Cloth), (Bludgeon, Hide)];
        for (attack, defense) in strong {
            assert_eq!(matchup(attack, defense), Matchup::Strong);
            // The reverse pairing swaps the attack element for the one that
            // is weak into the same armor.
        }
        assert_eq!(matchup(Magic, Hide), Matchup::Weak);
        assert_eq!(matchup(Blade, Metal), Matchup::Weak);
        assert_eq!(matchup(Bludgeon, Cloth), Matchup::Weak);

        // Attack-vs-attack elements are unlisted and therefore neutral.
        for attack in [Magic, Blade, Bludgeon] {
            for defense in [Magic, Blade, Bludgeon] {
                assert_eq!(matchup(attack, defense), Matchup::Fair);
            }
        }
    }

    #[test]
    fn strong_weak_fair_damage() {
        // Strong: 50 + 25 = 75, minus armor 2.
        let strong = attack_damage(
            blade_attacker(),
            Some(cloth_defender()),
            SpecialMatch::NONE,
            0,
            0,
            None,
            0,
            ATTACK_DAMAGE_FLOOR,
        );
        assert_eq!(strong.total_damage, 73);
        assert!(!strong.is_critical);

        // Weak: 50 − 25 = 25, minus armor 2.
        let weak = attack_damage(
            blade_attacker(),
            Some(CombatProfile::new(Element::Metal, 5, 2)),
            SpecialMatch::NONE,
            0,
            0,
            None,
            0,
            ATTACK_DAMAGE_FLOOR,
        );
        assert_eq!(weak.total_damage, 23);

        // Fair: 50, minus armor 2.
        let fair = attack_damage(
            blade_attacker(),
            Some(CombatProfile::new(Element::Hide, 5, 2)),
            SpecialMatch::NONE,
            0,
            0,
            None,
            0,
            ATTACK_DAMAGE_FLOOR,
        );
        assert_eq!(fair.total_damage, 48);
    }

    #[test]
    fn unarmored_defender_gets_one_and_a_half() {
        // base 50 · 1.5 = 75, no armor to subtract.
        let hit = attack_damage(
            blade_attacker(),
            None,
            SpecialMatch::NONE,
            0,
            0,
            None,
            0,
            ATTACK_DAMAGE_FLOOR,
        );
        assert_eq!(hit.total_damage, 75);

        // Odd base: 3 · 5 = 15, 15 · 1.5 = 22.5, floored at the total.
        let odd = attack_damage(
            CombatProfile::new(Element::Blade, 1, 3),
            None,
            SpecialMatch::NONE,
            0,
            0,
            None,
            0,
            COUNTER_DAMAGE_FLOOR,
        );
        assert_eq!(odd.total_damage, 22);
    }

    #[test]
    fn damage_never_drops_below_the_floor() {
        // base 1 vs armor 500; raw damage is hugely negative.
        let hit = attack_damage(
            CombatProfile::new(Element::Magic, 5, 1),
            Some(CombatProfile::new(Element::Magic, 1, 100)),
            SpecialMatch::NONE,
            0,
            0,
            None,
            0,
            COUNTER_DAMAGE_FLOOR,
        );
        assert_eq!(hit.total_damage, 2);

        let hit = attack_damage(
            CombatProfile::new(Element::Magic, 5, 1),
            Some(CombatProfile::new(Element::Magic, 1, 100)),
            SpecialMatch::NONE,
            0,
            0,
            None,
            0,
            ATTACK_DAMAGE_FLOOR,
        );
        assert_eq!(hit.total_damage, 4);
    }

    #[test]
    fn strength_bonus_is_ten_percent_per_point() {
        // elemental 75, strength 10 → +75.
        let hit = attack_damage(
            blade_attacker(),
            Some(cloth_defender()),
            SpecialMatch::NONE,
            10,
            0,
            None,
            0,
            ATTACK_DAMAGE_FLOOR,
        );
        assert_eq!(hit.total_damage, 148);
    }

    #[test]
    fn critical_hit_multiplies_a_fifth() {
        // entropy 0: roll 0 < luck 100, multiplier (0 % 5) + 1 = 1.
        // bonus = ⌊75/5⌋ · 1 = 15.
        let hit = attack_damage(
            blade_attacker(),
            Some(cloth_defender()),
            SpecialMatch::NONE,
            0,
            100,
            None,
            0,
            ATTACK_DAMAGE_FLOOR,
        );
        assert!(hit.is_critical);
        assert_eq!(hit.total_damage, 88);

        // Luck equal to the roll is not enough: 50 > 50 fails.
        let no_crit = attack_damage(
            blade_attacker(),
            Some(cloth_defender()),
            SpecialMatch::NONE,
            0,
            50,
            None,
            50,
            ATTACK_DAMAGE_FLOOR,
        );
        assert!(!no_crit.is_critical);
        assert_eq!(no_crit.total_damage, 73);
    }

    #[test]
    fn titanium_ring_scales_critical_bonus() {
        // ring xp 400 → level 20 → +60% of the 15 bonus = +9.
        let ring = EquippedItem::new(ItemId::TITANIUM_RING, 400);
        let hit = attack_damage(
            blade_attacker(),
            Some(cloth_defender()),
            SpecialMatch::NONE,
            0,
            100,
            Some(&ring),
            0,
            ATTACK_DAMAGE_FLOOR,
        );
        assert_eq!(hit.total_damage, 97);

        // A Gold Ring does nothing for crits.
        let gold = EquippedItem::new(ItemId::GOLD_RING, 400);
        let hit = attack_damage(
            blade_attacker(),
            Some(cloth_defender()),
            SpecialMatch::NONE,
            0,
            100,
            Some(&gold),
            0,
            ATTACK_DAMAGE_FLOOR,
        );
        assert_eq!(hit.total_damage, 88);
    }

    #[test]
    fn special_fragments_stack_and_platinum_scales_the_sum() {
        // entropy 6: roll = 6 % 4 = 2.
        // prefix: ⌊75 · 6⌋ = 450; suffix: ⌊75/4⌋ · 3 = 54. (luck 0: no crit.)
        let both = SpecialMatch {
            prefix: true,
            suffix: true,
        };
        let hit = attack_damage(
            blade_attacker(),
            Some(cloth_defender()),
            both,
            0,
            0,
            None,
            6,
            ATTACK_DAMAGE_FLOOR,
        );
        assert_eq!(hit.total_damage, 75 + 450 + 54 - 2);

        // Platinum Ring at xp 100 (level 10): +30% of 504 = +151.
        let ring = EquippedItem::new(ItemId::PLATINUM_RING, 100);
        let hit = attack_damage(
            blade_attacker(),
            Some(cloth_defender()),
            both,
            0,
            0,
            Some(&ring),
            6,
            ATTACK_DAMAGE_FLOOR,
        );
        assert_eq!(hit.total_damage, 75 + 504 + 151 - 2);
    }

    #[test]
    fn special_match_requires_unlocked_fragments() {
        let beast = BeastSnapshot {
            id: crate::types::BeastId::new(30).unwrap(),
            level: 5,
            health: 40,
            prefix: 12,
            suffix: 3,
        };
        let mut weapon = EquippedItem::new(ItemId::new(42).unwrap(), 400);
        assert_eq!(SpecialMatch::between(&weapon, &beast), SpecialMatch::NONE);

        weapon.special2 = 12;
        weapon.special3 = 7;
        let matched = SpecialMatch::between(&weapon, &beast);
        assert!(matched.prefix);
        assert!(!matched.suffix);
    }

    #[test]
    fn neck_mitigation_requires_the_paired_jewelry() {
        // Chain Mail (Metal, tier 4) at xp 400 → level 20.
        let armor = EquippedItem::new(ItemId::new(80).unwrap(), 400);
        let necklace = EquippedItem::new(ItemId::NECKLACE, 100);
        // 20 · 2 · 10 · 3 / 100 = 12.
        assert_eq!(neck_mitigation(Some(&armor), Some(&necklace)), 12);

        // Wrong neck item for Metal armor.
        let amulet = EquippedItem::new(ItemId::AMULET, 100);
        assert_eq!(neck_mitigation(Some(&armor), Some(&amulet)), 0);

        // No armor or no neck: nothing to mitigate.
        assert_eq!(neck_mitigation(None, Some(&necklace)), 0);
        assert_eq!(neck_mitigation(Some(&armor), None), 0);
    }
}
