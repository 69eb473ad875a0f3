//! Snapshot and item types consumed by the engine.
//!
//! Everything here is a read-only view the caller assembles from indexed chain
//! state. The engine never mutates a snapshot; levels and item properties are
//! always derived on demand so a stored value can never disagree with the
//! tables.

use crate::tables;

/// Adventurer level curve: `level = floor(sqrt(xp))`.
///
/// Applied universally: adventurers, items, anything xp-tracked. Callers that
/// divide by a level clamp it to at least 1 first.
#[inline]
pub fn level_from_xp(xp: u32) -> u32 {
    xp.isqrt()
}

/// The six core attributes of an adventurer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub strength: u8,
    pub dexterity: u8,
    pub intelligence: u8,
    pub wisdom: u8,
    pub charisma: u8,
    pub luck: u8,
}

/// Read-only view of the adventurer at one decision point.
///
/// `beast_health` is the remaining health of the currently engaged beast
/// (0 when not in battle). Level is derived, never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdventurerSnapshot {
    pub xp: u32,
    pub health: u32,
    pub beast_health: u32,
    pub stats: Stats,
}

impl AdventurerSnapshot {
    pub fn level(&self) -> u32 {
        level_from_xp(self.xp)
    }
}

/// Equipment slot. The five body slots double as attack locations.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Slot {
    Weapon,
    Chest,
    Head,
    Waist,
    Foot,
    Hand,
    Neck,
    Ring,
}

/// Combat type of a weapon, a piece of armor, or an encounter.
///
/// Magic, Blade, and Bludgeon attack; Metal, Cloth, and Hide defend. The
/// matchup between them is the fixed three-way relation in [`crate::combat`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Element {
    Magic,
    Blade,
    Bludgeon,
    Metal,
    Cloth,
    Hide,
}

/// Item category as recorded in the authoritative item table.
///
/// Jewelry (necklaces, rings) carries no element and never enters the
/// elemental matchup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemType {
    Necklace,
    Ring,
    Magic,
    Cloth,
    Blade,
    Hide,
    Bludgeon,
    Metal,
}

impl ItemType {
    /// Combat element of this item type, if it has one.
    pub const fn element(self) -> Option<Element> {
        match self {
            ItemType::Magic => Some(Element::Magic),
            ItemType::Blade => Some(Element::Blade),
            ItemType::Bludgeon => Some(Element::Bludgeon),
            ItemType::Metal => Some(Element::Metal),
            ItemType::Cloth => Some(Element::Cloth),
            ItemType::Hide => Some(Element::Hide),
            ItemType::Necklace | ItemType::Ring => None,
        }
    }
}

/// Identifier into the 101-entry item table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub(crate) u8);

/// Raw id outside the item table's `[1, 101]` range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("item id {0} outside 1..=101")]
pub struct InvalidItemId(pub u8);

impl ItemId {
    pub const COUNT: u8 = 101;

    // Jewelry ids; ring and neck effects key off these, never off strings.
    pub const PENDANT: Self = Self(1);
    pub const NECKLACE: Self = Self(2);
    pub const AMULET: Self = Self(3);
    pub const SILVER_RING: Self = Self(4);
    pub const BRONZE_RING: Self = Self(5);
    pub const PLATINUM_RING: Self = Self(6);
    pub const TITANIUM_RING: Self = Self(7);
    pub const GOLD_RING: Self = Self(8);

    /// Wraps a raw id, rejecting values outside the table.
    pub const fn new(raw: u8) -> Result<Self, InvalidItemId> {
        if raw >= 1 && raw <= Self::COUNT {
            Ok(Self(raw))
        } else {
            Err(InvalidItemId(raw))
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn tier(self) -> u8 {
        tables::item_tier(self)
    }

    pub fn slot(self) -> Slot {
        tables::item_slot(self)
    }

    pub fn item_type(self) -> ItemType {
        tables::item_type(self)
    }

    pub fn name(self) -> &'static str {
        tables::item_name(self)
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// One equipped item as the indexer reports it.
///
/// Slot, type, and tier are all functions of the id; only xp and the unlocked
/// special-name fragments are per-instance state. Fragment index 0 means the
/// special is not unlocked yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquippedItem {
    pub id: ItemId,
    pub xp: u16,
    pub special2: u8,
    pub special3: u8,
}

impl EquippedItem {
    /// Item with no unlocked specials.
    pub const fn new(id: ItemId, xp: u16) -> Self {
        Self {
            id,
            xp,
            special2: 0,
            special3: 0,
        }
    }

    pub fn level(&self) -> u32 {
        level_from_xp(u32::from(self.xp))
    }

    pub fn slot(&self) -> Slot {
        self.id.slot()
    }

    pub fn tier(&self) -> u8 {
        self.id.tier()
    }

    pub fn element(&self) -> Option<Element> {
        self.id.item_type().element()
    }
}

/// Finds the equipped item occupying `slot`, if any.
pub fn item_at(items: &[EquippedItem], slot: Slot) -> Option<&EquippedItem> {
    items.iter().find(|item| item.slot() == slot)
}

/// Identifier into the 75-entry beast roster.
///
/// Type and tier are pure functions of the id: three 25-id element bands
/// (Magic, Blade, Bludgeon), each cycling tiers 1..=5 in sub-ranges of five.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeastId(pub(crate) u8);

/// Raw id outside the encounter roster's `[1, 75]` range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("encounter id {0} outside 1..=75")]
pub struct InvalidEncounterId(pub u8);

impl BeastId {
    pub const COUNT: u8 = 75;

    pub const fn new(raw: u8) -> Result<Self, InvalidEncounterId> {
        if raw >= 1 && raw <= Self::COUNT {
            Ok(Self(raw))
        } else {
            Err(InvalidEncounterId(raw))
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn element(self) -> Element {
        tables::encounter_element(self.0)
    }

    pub const fn tier(self) -> u8 {
        tables::encounter_tier(self.0)
    }
}

/// Identifier into the 75-entry obstacle roster; same banding as beasts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleId(pub(crate) u8);

impl ObstacleId {
    pub const COUNT: u8 = 75;

    pub const fn new(raw: u8) -> Result<Self, InvalidEncounterId> {
        if raw >= 1 && raw <= Self::COUNT {
            Ok(Self(raw))
        } else {
            Err(InvalidEncounterId(raw))
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn element(self) -> Element {
        tables::encounter_element(self.0)
    }

    pub const fn tier(self) -> u8 {
        tables::encounter_tier(self.0)
    }
}

/// A beast as it exists on chain (or as the resolver predicts it).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeastSnapshot {
    pub id: BeastId,
    pub level: u32,
    pub health: u32,
    /// Special-name prefix fragment (1..=69), 0 if unnamed.
    pub prefix: u8,
    /// Special-name suffix fragment (1..=18), 0 if unnamed.
    pub suffix: u8,
}

impl BeastSnapshot {
    pub const fn element(&self) -> Element {
        self.id.element()
    }

    pub const fn tier(&self) -> u8 {
        self.id.tier()
    }

    /// "Agony Bane"-style display name, if the fragments are set.
    pub fn special_name(&self) -> Option<(&'static str, &'static str)> {
        let prefix = tables::name_prefix(self.prefix)?;
        let suffix = tables::name_suffix(self.suffix)?;
        Some((prefix, suffix))
    }
}

/// An obstacle; no health pool, no special name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleSnapshot {
    pub id: ObstacleId,
    pub level: u32,
}

impl ObstacleSnapshot {
    pub const fn element(&self) -> Element {
        self.id.element()
    }

    pub const fn tier(&self) -> u8 {
        self.id.tier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_curve_boundaries() {
        for (xp, level) in [
            (0, 0),
            (1, 1),
            (3, 1),
            (4, 2),
            (8, 2),
            (9, 3),
            (15, 3),
            (16, 4),
            (99, 9),
            (100, 10),
        ] {
            assert_eq!(level_from_xp(xp), level, "xp={xp}");
        }
    }

    #[test]
    fn item_id_bounds() {
        assert!(ItemId::new(0).is_err());
        assert!(ItemId::new(1).is_ok());
        assert!(ItemId::new(101).is_ok());
        assert!(ItemId::new(102).is_err());
    }

    #[test]
    fn beast_id_bounds() {
        assert!(BeastId::new(0).is_err());
        assert!(BeastId::new(75).is_ok());
        assert!(BeastId::new(76).is_err());
    }

    #[test]
    fn jewelry_has_no_element() {
        assert_eq!(ItemId::GOLD_RING.item_type(), ItemType::Ring);
        assert_eq!(ItemId::GOLD_RING.item_type().element(), None);
        assert_eq!(ItemId::AMULET.item_type(), ItemType::Necklace);
    }

    #[test]
    fn item_lookup_by_slot() {
        let items = [
            EquippedItem::new(ItemId::new(42).unwrap(), 400), // Katana: Weapon
            EquippedItem::new(ItemId::new(80).unwrap(), 100), // Chain Mail: Chest
        ];
        assert_eq!(item_at(&items, Slot::Weapon).unwrap().id.get(), 42);
        assert_eq!(item_at(&items, Slot::Chest).unwrap().id.get(), 80);
        assert!(item_at(&items, Slot::Head).is_none());
    }
}
