//! Decoding indexed chain records into engine inputs.
//!
//! The indexer hands the client JSON documents with name-keyed items and a
//! hex-encoded entropy word. This module turns one such document into the
//! read-only [`DecisionContext`] every preview runs against. Malformed
//! documents are typed errors; malformed values the engine tolerates (xp 0,
//! missing items) pass through and get clamped downstream.

use serde::Deserialize;

use sim_core::{
    item_by_name, AdventurerSnapshot, BeastId, BeastSnapshot, Entropy, EquippedItem, ItemId,
    Stats,
};

use crate::error::RuntimeError;

/// Everything one decision needs: who is playing, what they carry, and the
/// entropy word governing the outcome.
#[derive(Clone, Debug)]
pub struct DecisionContext {
    pub adventurer: AdventurerSnapshot,
    pub items: Vec<EquippedItem>,
    pub entropy: Entropy,
    /// The engaged beast, when the snapshot was taken mid-battle.
    pub beast: Option<BeastSnapshot>,
}

impl DecisionContext {
    /// True when the adventurer is locked in a battle right now.
    pub fn in_battle(&self) -> bool {
        self.adventurer.beast_health > 0
    }

    /// Parses a snapshot document produced by the indexer.
    pub fn from_json(document: &str) -> Result<Self, RuntimeError> {
        let record: DecisionRecord = serde_json::from_str(document)?;
        record.try_into()
    }
}

/// Wire shape of one snapshot document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRecord {
    pub adventurer: AdventurerRecord,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
    pub entropy: String,
    #[serde(default)]
    pub beast: Option<BeastRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdventurerRecord {
    pub xp: u32,
    pub health: u32,
    #[serde(default)]
    pub beast_health: u32,
    #[serde(default)]
    pub strength: u8,
    #[serde(default)]
    pub dexterity: u8,
    #[serde(default)]
    pub intelligence: u8,
    #[serde(default)]
    pub wisdom: u8,
    #[serde(default)]
    pub charisma: u8,
    #[serde(default)]
    pub luck: u8,
}

/// One equipped item row. Items are keyed by display name, the way the
/// indexer stores them; `special2`/`special3` are unlocked name fragments.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub item: String,
    #[serde(default)]
    pub xp: u16,
    #[serde(default)]
    pub special2: u8,
    #[serde(default)]
    pub special3: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeastRecord {
    pub id: u8,
    pub level: u32,
    #[serde(default)]
    pub health: u32,
    #[serde(default)]
    pub prefix: u8,
    #[serde(default)]
    pub suffix: u8,
}

impl TryFrom<DecisionRecord> for DecisionContext {
    type Error = RuntimeError;

    fn try_from(record: DecisionRecord) -> Result<Self, RuntimeError> {
        let adventurer = AdventurerSnapshot {
            xp: record.adventurer.xp,
            health: record.adventurer.health,
            beast_health: record.adventurer.beast_health,
            stats: Stats {
                strength: record.adventurer.strength,
                dexterity: record.adventurer.dexterity,
                intelligence: record.adventurer.intelligence,
                wisdom: record.adventurer.wisdom,
                charisma: record.adventurer.charisma,
                luck: record.adventurer.luck,
            },
        };

        let items = record
            .items
            .iter()
            .map(decode_item)
            .collect::<Result<Vec<_>, _>>()?;

        let beast = record
            .beast
            .map(|beast| -> Result<_, RuntimeError> {
                Ok(BeastSnapshot {
                    id: BeastId::new(beast.id)?,
                    level: beast.level,
                    health: beast.health,
                    prefix: beast.prefix,
                    suffix: beast.suffix,
                })
            })
            .transpose()?;

        Ok(Self {
            adventurer,
            items,
            entropy: parse_entropy(&record.entropy)?,
            beast,
        })
    }
}

fn decode_item(record: &ItemRecord) -> Result<EquippedItem, RuntimeError> {
    let id: ItemId =
        item_by_name(&record.item).ok_or_else(|| RuntimeError::UnknownItem(record.item.clone()))?;
    Ok(EquippedItem {
        id,
        xp: record.xp,
        special2: record.special2,
        special3: record.special3,
    })
}

/// Parses a hex entropy word ("0x"-prefixed or bare, up to 64 digits).
///
/// The value is right-aligned into the 256-bit scalar, so short words decode
/// the same way the chain's integer encoding does.
pub fn parse_entropy(value: &str) -> Result<Entropy, RuntimeError> {
    let digits = value.trim().trim_start_matches("0x");
    if digits.is_empty() {
        return Err(RuntimeError::BadEntropy {
            value: value.to_owned(),
            reason: "empty",
        });
    }
    if digits.len() > 64 {
        return Err(RuntimeError::BadEntropy {
            value: value.to_owned(),
            reason: "wider than 256 bits",
        });
    }

    // hex::decode wants an even digit count; re-align odd words.
    let padded;
    let digits = if digits.len() % 2 == 0 {
        digits
    } else {
        padded = format!("0{digits}");
        &padded
    };

    let decoded = hex::decode(digits).map_err(|_| RuntimeError::BadEntropy {
        value: value.to_owned(),
        reason: "not hexadecimal",
    })?;

    let mut bytes = [0u8; 32];
    bytes[32 - decoded.len()..].copy_from_slice(&decoded);
    Ok(Entropy::from_be_bytes(bytes))
}
