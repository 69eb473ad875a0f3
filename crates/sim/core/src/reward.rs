//! Gold payout for a beast kill.

use crate::entropy::{self, Entropy};
use crate::types::{BeastSnapshot, EquippedItem, ItemId};

/// Minimum gold for any kill.
pub const MIN_GOLD_REWARD: u32 = 4;

/// Computes the gold reward for slaying `beast` at `xp`.
///
/// # Formula
///
/// ```text
/// base  = max(4, (6 − tier) · level / 4)
/// base += (base / 4) · (seed % 5)          seed = derive(xp, entropy).rnd1
/// base += ⌊base · √ring.xp · 3 / 100⌋      if a Gold Ring is equipped
/// gold  = max(4, base)
/// ```
///
/// Pre-combat adventurers (xp < 1) always collect the minimum.
pub fn gold_reward(
    xp: u32,
    entropy: &Entropy,
    beast: &BeastSnapshot,
    ring: Option<&EquippedItem>,
) -> u32 {
    if xp < 1 {
        return MIN_GOLD_REWARD;
    }

    let seed = entropy::derive(xp, entropy).rnd1;

    let mut base = ((6 - u32::from(beast.tier())) * beast.level / 4).max(MIN_GOLD_REWARD);
    base += base / 4 * (seed % 5) as u32;

    if let Some(ring) = ring {
        if ring.id == ItemId::GOLD_RING {
            base += base * ring.level() * 3 / 100;
        }
    }

    base.max(MIN_GOLD_REWARD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BeastId;

    fn beast(id: u8, level: u32) -> BeastSnapshot {
        BeastSnapshot {
            id: BeastId::new(id).unwrap(),
            level,
            health: 10,
            prefix: 0,
            suffix: 0,
        }
    }

    #[test]
    fn zero_xp_pays_the_minimum() {
        let entropy = Entropy::from_u128(u128::MAX / 3);
        assert_eq!(gold_reward(0, &entropy, &beast(1, 60), None), 4);
    }

    #[test]
    fn reward_never_drops_below_the_minimum() {
        // Tier-5 level-1 beast: base (6−5)·1/4 = 0 → clamped to 4.
        for raw in 0..50u32 {
            let entropy = Entropy::from_u128(u128::from(raw) + 1);
            let reward = gold_reward(25, &entropy, &beast(25, 1), None);
            assert!(reward >= MIN_GOLD_REWARD);
        }
    }

    #[test]
    fn seed_scales_the_base_by_quarters() {
        // Tier-1 level-40 beast: base (6−1)·40/4 = 50; possible rewards are
        // 50 + 12·k for k = seed % 5.
        let expected: [u32; 5] = [50, 62, 74, 86, 98];
        for raw in 0..20u32 {
            let entropy = Entropy::from_u128(u128::from(raw) * 31 + 7);
            let seed = crate::entropy::derive(36, &entropy).rnd1;
            let reward = gold_reward(36, &entropy, &beast(1, 40), None);
            assert_eq!(reward, expected[(seed % 5) as usize]);
        }
    }

    #[test]
    fn gold_ring_pays_interest() {
        // Ring at xp 400 → level 20 → +60%.
        let gold_ring = EquippedItem::new(ItemId::GOLD_RING, 400);
        let other_ring = EquippedItem::new(ItemId::SILVER_RING, 400);
        for raw in 0..20u32 {
            let entropy = Entropy::from_u128(u128::from(raw) * 997 + 3);
            let bare = gold_reward(49, &entropy, &beast(1, 40), None);
            let ringed = gold_reward(49, &entropy, &beast(1, 40), Some(&gold_ring));
            let wrong = gold_reward(49, &entropy, &beast(1, 40), Some(&other_ring));
            assert_eq!(ringed, bare + bare * 20 * 3 / 100);
            assert_eq!(wrong, bare);
        }
    }
}
