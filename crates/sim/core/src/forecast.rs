//! Bounded, queue-driven encounter forecasting.
//!
//! The forecaster previews the tree of upcoming encounters: each resolved
//! encounter tells us the xp the adventurer would have afterwards, which seeds
//! further resolutions. An explicit sorted work-queue with a visited-set
//! replaces the authority's recursion so the entry cap and the termination
//! condition are both directly testable, and adversarial xp sequences cannot
//! recurse or loop unboundedly.

use std::collections::BTreeSet;

use arrayvec::ArrayVec;

use crate::encounter::{resolve_encounter, Encounter};
use crate::entropy::Entropy;
use crate::types::{level_from_xp, EquippedItem};

/// Hard cap on forecast length. Enforced defensively even if the natural
/// stop (xp growth outrunning the adventurer's level) never triggers.
pub const MAX_FORECAST: usize = 50;

/// One forecast row: the encounter plus the xp state it was resolved at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForecastEntry {
    /// The xp value this encounter was resolved for.
    pub xp: u32,
    /// Adventurer level at that xp.
    pub adventurer_level: u32,
    pub encounter: Encounter,
}

/// Previews every reachable upcoming encounter, smallest xp first.
///
/// Zero entropy means no randomness has been published for this decision yet;
/// the preview is empty rather than wrong. An xp of 0 seeds the queue at 4,
/// matching the authority. `has_beast_now` forces the first resolution to be
/// the beast the adventurer is already facing.
///
/// The walk stops at [`MAX_FORECAST`] entries, or as soon as the smallest
/// pending xp would put the adventurer above `adventurer_level` (leveling up
/// re-rolls entropy on chain, so nothing past that point is predictable).
pub fn list_all_encounters(
    xp: u32,
    entropy: &Entropy,
    has_beast_now: bool,
    adventurer_level: u32,
) -> ArrayVec<ForecastEntry, MAX_FORECAST> {
    let mut out = ArrayVec::new();
    if entropy.is_zero() {
        return out;
    }

    let start = xp.max(4);
    let mut pending = BTreeSet::new();
    let mut seen = BTreeSet::new();
    pending.insert(start);
    seen.insert(start);

    let mut force_beast = has_beast_now;
    while let Some(xp) = pending.pop_first() {
        if out.is_full() {
            break;
        }
        if level_from_xp(xp) > adventurer_level {
            break;
        }

        let encounter = resolve_encounter(xp, entropy, &[], force_beast);
        force_beast = false;

        // A beast can be fought (next_xp) or fled (one survival xp); both
        // futures stay on the queue. Everything else yields next_xp only.
        if encounter.is_beast() && seen.insert(xp + 1) {
            pending.insert(xp + 1);
        }
        let next_xp = encounter.next_xp();
        if seen.insert(next_xp) {
            pending.insert(next_xp);
        }

        out.push(ForecastEntry {
            xp,
            adventurer_level: level_from_xp(xp),
            encounter,
        });
    }

    out
}

/// Result of scanning ahead for the next consequential encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BigEncounter {
    /// A beast or obstacle, and the xp it will be met at.
    Found { xp: u32, encounter: Encounter },
    /// Nothing but discoveries before the next level-up re-rolls entropy.
    LevelUp { next_xp: u32 },
}

/// Finds the next non-discovery encounter at or after `xp`.
///
/// Discoveries are worth one xp each, so the scan advances one xp at a time;
/// it terminates because the level check eventually trips.
pub fn next_big_encounter(
    level: u32,
    xp: u32,
    entropy: &Entropy,
    items: &[EquippedItem],
) -> BigEncounter {
    let mut xp = xp;
    loop {
        if level_from_xp(xp) > level {
            return BigEncounter::LevelUp { next_xp: xp + 1 };
        }

        let encounter = resolve_encounter(xp, entropy, items, false);
        if !encounter.is_discovery() {
            return BigEncounter::Found { xp, encounter };
        }
        xp += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_entropy_yields_nothing() {
        let forecast = list_all_encounters(100, &Entropy::ZERO, false, 10);
        assert!(forecast.is_empty());
    }

    #[test]
    fn forecast_never_exceeds_the_cap() {
        // A generous level ceiling keeps the natural stop from firing first.
        let entropy = Entropy::from_u128(0x00de_ad00_beef);
        let forecast = list_all_encounters(4, &entropy, false, u32::MAX);
        assert_eq!(forecast.len(), MAX_FORECAST);
    }

    #[test]
    fn forecast_stops_at_the_level_ceiling() {
        let entropy = Entropy::from_u128(0x1337);
        let forecast = list_all_encounters(4, &entropy, false, 3);
        assert!(forecast.len() < MAX_FORECAST);
        for entry in &forecast {
            assert!(entry.adventurer_level <= 3);
        }
    }

    #[test]
    fn entries_come_back_in_ascending_xp_order() {
        let entropy = Entropy::from_u128(0x9999_1111);
        let forecast = list_all_encounters(4, &entropy, false, 40);
        assert!(!forecast.is_empty());
        for pair in forecast.windows(2) {
            assert!(pair[0].xp < pair[1].xp);
        }
    }

    #[test]
    fn in_battle_forecasts_lead_with_the_beast() {
        let entropy = Entropy::from_u128(0xaaaa_bbbb);
        let forecast = list_all_encounters(30, &entropy, true, 30);
        assert!(forecast[0].encounter.is_beast());
    }

    #[test]
    fn zero_xp_seeds_the_queue_at_four() {
        let entropy = Entropy::from_u128(0x77);
        let forecast = list_all_encounters(0, &entropy, false, 10);
        assert_eq!(forecast[0].xp, 4);
    }

    #[test]
    fn forecast_is_a_pure_function() {
        let entropy = Entropy::from_u128(0x4242);
        let first = list_all_encounters(16, &entropy, false, 20);
        let second = list_all_encounters(16, &entropy, false, 20);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn big_encounter_scan_skips_discoveries() {
        let entropy = Entropy::from_u128(0xfeed_f00d);
        match next_big_encounter(30, 100, &entropy, &[]) {
            BigEncounter::Found { encounter, .. } => {
                assert!(!encounter.is_discovery());
            }
            BigEncounter::LevelUp { next_xp } => {
                assert!(next_xp > 100);
            }
        }
    }

    #[test]
    fn big_encounter_reports_levelup_past_the_ceiling() {
        let entropy = Entropy::from_u128(0x1);
        // xp 100 is level 10; a ceiling of 9 is already exceeded.
        let result = next_big_encounter(9, 100, &entropy, &[]);
        assert_eq!(result, BigEncounter::LevelUp { next_xp: 101 });
    }
}
