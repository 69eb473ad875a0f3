//! Static lookup tables.
//!
//! These reproduce the authoritative game's data tables entry-for-entry: the
//! 101-item registry (tier, slot, type, display name), the two special-name
//! fragment tables, and the five loot rarity bands. Any divergence here breaks
//! bit-exact agreement with the chain, so the tables are immutable consts and
//! everything downstream derives from them.

use crate::types::{Element, ItemId, ItemType, Slot};

/// One row of the item registry.
#[derive(Clone, Copy, Debug)]
struct ItemRecord {
    name: &'static str,
    tier: u8,
    slot: Slot,
    item_type: ItemType,
}

const fn item(name: &'static str, tier: u8, slot: Slot, item_type: ItemType) -> ItemRecord {
    ItemRecord {
        name,
        tier,
        slot,
        item_type,
    }
}

/// The item registry, indexed by `id - 1`.
#[rustfmt::skip]
const ITEMS: [ItemRecord; ItemId::COUNT as usize] = [
    // Jewelry (ids 1..=8)
    item("Pendant", 1, Slot::Neck, ItemType::Necklace),
    item("Necklace", 1, Slot::Neck, ItemType::Necklace),
    item("Amulet", 1, Slot::Neck, ItemType::Necklace),
    item("Silver Ring", 2, Slot::Ring, ItemType::Ring),
    item("Bronze Ring", 3, Slot::Ring, ItemType::Ring),
    item("Platinum Ring", 1, Slot::Ring, ItemType::Ring),
    item("Titanium Ring", 1, Slot::Ring, ItemType::Ring),
    item("Gold Ring", 1, Slot::Ring, ItemType::Ring),
    // Magic weapons (ids 9..=16)
    item("Ghost Wand", 1, Slot::Weapon, ItemType::Magic),
    item("Grave Wand", 2, Slot::Weapon, ItemType::Magic),
    item("Bone Wand", 3, Slot::Weapon, ItemType::Magic),
    item("Wand", 5, Slot::Weapon, ItemType::Magic),
    item("Grimoire", 1, Slot::Weapon, ItemType::Magic),
    item("Chronicle", 2, Slot::Weapon, ItemType::Magic),
    item("Tome", 3, Slot::Weapon, ItemType::Magic),
    item("Book", 5, Slot::Weapon, ItemType::Magic),
    // Cloth armor (ids 17..=41)
    item("Divine Robe", 1, Slot::Chest, ItemType::Cloth),
    item("Silk Robe", 2, Slot::Chest, ItemType::Cloth),
    item("Linen Robe", 3, Slot::Chest, ItemType::Cloth),
    item("Robe", 4, Slot::Chest, ItemType::Cloth),
    item("Shirt", 5, Slot::Chest, ItemType::Cloth),
    item("Crown", 1, Slot::Head, ItemType::Cloth),
    item("Divine Hood", 2, Slot::Head, ItemType::Cloth),
    item("Silk Hood", 3, Slot::Head, ItemType::Cloth),
    item("Linen Hood", 4, Slot::Head, ItemType::Cloth),
    item("Hood", 5, Slot::Head, ItemType::Cloth),
    item("Brightsilk Sash", 1, Slot::Waist, ItemType::Cloth),
    item("Silk Sash", 2, Slot::Waist, ItemType::Cloth),
    item("Wool Sash", 3, Slot::Waist, ItemType::Cloth),
    item("Linen Sash", 4, Slot::Waist, ItemType::Cloth),
    item("Sash", 5, Slot::Waist, ItemType::Cloth),
    item("Divine Slippers", 1, Slot::Foot, ItemType::Cloth),
    item("Silk Slippers", 2, Slot::Foot, ItemType::Cloth),
    item("Wool Shoes", 3, Slot::Foot, ItemType::Cloth),
    item("Linen Shoes", 4, Slot::Foot, ItemType::Cloth),
    item("Shoes", 5, Slot::Foot, ItemType::Cloth),
    item("Divine Gloves", 1, Slot::Hand, ItemType::Cloth),
    item("Silk Gloves", 2, Slot::Hand, ItemType::Cloth),
    item("Wool Gloves", 3, Slot::Hand, ItemType::Cloth),
    item("Linen Gloves", 4, Slot::Hand, ItemType::Cloth),
    item("Gloves", 5, Slot::Hand, ItemType::Cloth),
    // Blade weapons (ids 42..=46)
    item("Katana", 1, Slot::Weapon, ItemType::Blade),
    item("Falchion", 2, Slot::Weapon, ItemType::Blade),
    item("Scimitar", 3, Slot::Weapon, ItemType::Blade),
    item("Long Sword", 4, Slot::Weapon, ItemType::Blade),
    item("Short Sword", 5, Slot::Weapon, ItemType::Blade),
    // Hide armor (ids 47..=71)
    item("Demon Husk", 1, Slot::Chest, ItemType::Hide),
    item("Dragonskin Armor", 2, Slot::Chest, ItemType::Hide),
    item("Studded Leather Armor", 3, Slot::Chest, ItemType::Hide),
    item("Hard Leather Armor", 4, Slot::Chest, ItemType::Hide),
    item("Leather Armor", 5, Slot::Chest, ItemType::Hide),
    item("Demon Crown", 1, Slot::Head, ItemType::Hide),
    item("Dragons Crown", 2, Slot::Head, ItemType::Hide),
    item("War Cap", 3, Slot::Head, ItemType::Hide),
    item("Leather Cap", 4, Slot::Head, ItemType::Hide),
    item("Cap", 5, Slot::Head, ItemType::Hide),
    item("Demonhide Belt", 1, Slot::Waist, ItemType::Hide),
    item("Dragonskin Belt", 2, Slot::Waist, ItemType::Hide),
    item("Studded Leather Belt", 3, Slot::Waist, ItemType::Hide),
    item("Hard Leather Belt", 4, Slot::Waist, ItemType::Hide),
    item("Leather Belt", 5, Slot::Waist, ItemType::Hide),
    item("Demonhide Boots", 1, Slot::Foot, ItemType::Hide),
    item("Dragonskin Boots", 2, Slot::Foot, ItemType::Hide),
    item("Studded Leather Boots", 3, Slot::Foot, ItemType::Hide),
    item("Hard Leather Boots", 4, Slot::Foot, ItemType::Hide),
    item("Leather Boots", 5, Slot::Foot, ItemType::Hide),
    item("Demons Hands", 1, Slot::Hand, ItemType::Hide),
    item("Dragonskin Gloves", 2, Slot::Hand, ItemType::Hide),
    item("Studded Leather Gloves", 3, Slot::Hand, ItemType::Hide),
    item("Hard Leather Gloves", 4, Slot::Hand, ItemType::Hide),
    item("Leather Gloves", 5, Slot::Hand, ItemType::Hide),
    // Bludgeon weapons (ids 72..=76)
    item("Warhammer", 1, Slot::Weapon, ItemType::Bludgeon),
    item("Quarterstaff", 2, Slot::Weapon, ItemType::Bludgeon),
    item("Maul", 3, Slot::Weapon, ItemType::Bludgeon),
    item("Mace", 4, Slot::Weapon, ItemType::Bludgeon),
    item("Club", 5, Slot::Weapon, ItemType::Bludgeon),
    // Metal armor (ids 77..=101)
    item("Holy Chestplate", 1, Slot::Chest, ItemType::Metal),
    item("Ornate Chestplate", 2, Slot::Chest, ItemType::Metal),
    item("Plate Mail", 3, Slot::Chest, ItemType::Metal),
    item("Chain Mail", 4, Slot::Chest, ItemType::Metal),
    item("Ring Mail", 5, Slot::Chest, ItemType::Metal),
    item("Ancient Helm", 1, Slot::Head, ItemType::Metal),
    item("Ornate Helm", 2, Slot::Head, ItemType::Metal),
    item("Great Helm", 3, Slot::Head, ItemType::Metal),
    item("Full Helm", 4, Slot::Head, ItemType::Metal),
    item("Helm", 5, Slot::Head, ItemType::Metal),
    item("Ornate Belt", 1, Slot::Waist, ItemType::Metal),
    item("War Belt", 2, Slot::Waist, ItemType::Metal),
    item("Plated Belt", 3, Slot::Waist, ItemType::Metal),
    item("Mesh Belt", 4, Slot::Waist, ItemType::Metal),
    item("Heavy Belt", 5, Slot::Waist, ItemType::Metal),
    item("Holy Greaves", 1, Slot::Foot, ItemType::Metal),
    item("Ornate Greaves", 2, Slot::Foot, ItemType::Metal),
    item("Greaves", 3, Slot::Foot, ItemType::Metal),
    item("Chain Boots", 4, Slot::Foot, ItemType::Metal),
    item("Heavy Boots", 5, Slot::Foot, ItemType::Metal),
    item("Holy Gauntlets", 1, Slot::Hand, ItemType::Metal),
    item("Ornate Gauntlets", 2, Slot::Hand, ItemType::Metal),
    item("Gauntlets", 3, Slot::Hand, ItemType::Metal),
    item("Chain Gloves", 4, Slot::Hand, ItemType::Metal),
    item("Heavy Gloves", 5, Slot::Hand, ItemType::Metal),
];

pub(crate) fn item_tier(id: ItemId) -> u8 {
    ITEMS[(id.0 - 1) as usize].tier
}

pub(crate) fn item_slot(id: ItemId) -> Slot {
    ITEMS[(id.0 - 1) as usize].slot
}

pub(crate) fn item_type(id: ItemId) -> ItemType {
    ITEMS[(id.0 - 1) as usize].item_type
}

pub(crate) fn item_name(id: ItemId) -> &'static str {
    ITEMS[(id.0 - 1) as usize].name
}

/// Reverse lookup from a display name (case-insensitive) to an item id.
///
/// Indexer records key items by name; this is the decoding side of
/// [`crate::types::ItemId::name`].
pub fn item_by_name(name: &str) -> Option<ItemId> {
    ITEMS
        .iter()
        .position(|record| record.name.eq_ignore_ascii_case(name))
        .map(|index| ItemId(index as u8 + 1))
}

// ============================================================================
// Encounter banding
// ============================================================================

/// Element band of a beast/obstacle id: 1–25 Magic, 26–50 Blade, 51–75
/// Bludgeon.
pub(crate) const fn encounter_element(id: u8) -> Element {
    match id {
        1..=25 => Element::Magic,
        26..=50 => Element::Blade,
        _ => Element::Bludgeon,
    }
}

/// Tier of a beast/obstacle id: within each 25-id element band, sub-ranges of
/// five cycle tiers 1..=5.
pub(crate) const fn encounter_tier(id: u8) -> u8 {
    ((id - 1) % 25) / 5 + 1
}

// ============================================================================
// Loot rarity bands
// ============================================================================

const fn loot<const N: usize>(ids: [u8; N]) -> [ItemId; N] {
    let mut band = [ItemId(1); N];
    let mut i = 0;
    while i < N {
        band[i] = ItemId(ids[i]);
        i += 1;
    }
    band
}

/// Tier-1 items (2% of loot discoveries), ascending id order.
pub const LOOT_TIER_1: [ItemId; 25] = loot([
    1, 2, 3, 6, 7, 8, 9, 13, 17, 22, 27, 32, 37, 42, 47, 52, 57, 62, 67, 72, 77, 82, 87, 92, 97,
]);

/// Tier-2 items (6%).
pub const LOOT_TIER_2: [ItemId; 20] = loot([
    4, 10, 14, 18, 23, 28, 33, 38, 43, 48, 53, 58, 63, 68, 73, 78, 83, 88, 93, 98,
]);

/// Tier-3 items (12%).
pub const LOOT_TIER_3: [ItemId; 20] = loot([
    5, 11, 15, 19, 24, 29, 34, 39, 44, 49, 54, 59, 64, 69, 74, 79, 84, 89, 94, 99,
]);

/// Tier-4 items (30%).
pub const LOOT_TIER_4: [ItemId; 17] = loot([
    20, 25, 30, 35, 40, 45, 50, 55, 60, 65, 70, 75, 80, 85, 90, 95, 100,
]);

/// Tier-5 items (50%).
pub const LOOT_TIER_5: [ItemId; 19] = loot([
    12, 16, 21, 26, 31, 36, 41, 46, 51, 56, 61, 66, 71, 76, 81, 86, 91, 96, 101,
]);

// ============================================================================
// Special-name fragments
// ============================================================================

/// The 69 name prefixes, indexed by fragment value 1..=69.
#[rustfmt::skip]
const NAME_PREFIXES: [&str; 69] = [
    "Agony", "Apocalypse", "Armageddon", "Beast", "Behemoth", "Blight",
    "Blood", "Bramble", "Brimstone", "Brood", "Carrion", "Cataclysm",
    "Chimeric", "Corpse", "Corruption", "Damnation", "Death", "Demon",
    "Dire", "Dragon", "Dread", "Doom", "Dusk", "Eagle", "Empyrean", "Fate",
    "Foe", "Gale", "Ghoul", "Gloom", "Glyph", "Golem", "Grim", "Hate",
    "Havoc", "Honour", "Horror", "Hypnotic", "Kraken", "Loath", "Maelstrom",
    "Mind", "Miracle", "Morbid", "Oblivion", "Onslaught", "Pain",
    "Pandemonium", "Phoenix", "Plague", "Rage", "Rapture", "Rune", "Skull",
    "Sol", "Soul", "Sorrow", "Spirit", "Storm", "Tempest", "Torment",
    "Vengeance", "Victory", "Viper", "Vortex", "Woe", "Wrath", "Lights",
    "Shimmering",
];

/// The 18 name suffixes, indexed by fragment value 1..=18.
#[rustfmt::skip]
const NAME_SUFFIXES: [&str; 18] = [
    "Bane", "Root", "Bite", "Song", "Roar", "Grasp", "Instrument", "Glow",
    "Bender", "Shadow", "Whisper", "Shout", "Growl", "Tear", "Peak", "Form",
    "Sun", "Moon",
];

/// Total number of name prefixes; special-name derivation reduces mod this.
pub const NAME_PREFIX_COUNT: u8 = NAME_PREFIXES.len() as u8;

/// Total number of name suffixes.
pub const NAME_SUFFIX_COUNT: u8 = NAME_SUFFIXES.len() as u8;

/// Looks up a prefix fragment (1..=69); 0 or out-of-range means unnamed.
pub fn name_prefix(index: u8) -> Option<&'static str> {
    if (1..=NAME_PREFIX_COUNT).contains(&index) {
        Some(NAME_PREFIXES[(index - 1) as usize])
    } else {
        None
    }
}

/// Looks up a suffix fragment (1..=18); 0 or out-of-range means unnamed.
pub fn name_suffix(index: u8) -> Option<&'static str> {
    if (1..=NAME_SUFFIX_COUNT).contains(&index) {
        Some(NAME_SUFFIXES[(index - 1) as usize])
    } else {
        None
    }
}
