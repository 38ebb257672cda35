use serde::{Deserialize, Serialize};

/// Price fields carried by every item, in constructor order.
pub const PRICE_FIELDS: [&str; 6] = [
    "freemiumGoldPrice",
    "premiumGoldPrice",
    "freemiumCoinPrice",
    "premiumCoinPrice",
    "baseFreemiumSellPrice",
    "basePremiumSellPrice",
];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    Sword,
    Hammer,
    Spear,
    Staff,
    Dagger,
    Axe,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 6] = [
        WeaponKind::Sword,
        WeaponKind::Hammer,
        WeaponKind::Spear,
        WeaponKind::Staff,
        WeaponKind::Dagger,
        WeaponKind::Axe,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            WeaponKind::Sword => "sword",
            WeaponKind::Hammer => "hammer",
            WeaponKind::Spear => "spear",
            WeaponKind::Staff => "staff",
            WeaponKind::Dagger => "dagger",
            WeaponKind::Axe => "axe",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL.into_iter().find(|k| k.tag().eq_ignore_ascii_case(tag))
    }

    /// Bucket for an online weapon's `secondaryType`. Shuriken count as
    /// daggers; anything unrecognised lands with the swords.
    pub fn from_secondary_type(secondary: &str) -> Self {
        let secondary = secondary.trim();
        if secondary.eq_ignore_ascii_case("shuriken") {
            return WeaponKind::Dagger;
        }
        Self::from_tag(secondary).unwrap_or(WeaponKind::Sword)
    }
}

/// Type tag with item rules attached.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Armor,
    Ring,
    Weapon(WeaponKind),
}

impl ItemKind {
    /// Tags every item collection is expected to carry.
    pub const STANDARD_TAGS: [&'static str; 8] = [
        "armor", "ring", "sword", "hammer", "spear", "staff", "dagger", "axe",
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        let trimmed = tag.trim();
        if trimmed.eq_ignore_ascii_case("armor") {
            Some(ItemKind::Armor)
        } else if trimmed.eq_ignore_ascii_case("ring") {
            Some(ItemKind::Ring)
        } else {
            WeaponKind::from_tag(trimmed).map(ItemKind::Weapon)
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            ItemKind::Armor => "armor",
            ItemKind::Ring => "ring",
            ItemKind::Weapon(kind) => kind.tag(),
        }
    }

    /// Sprite file names used for unfinished entries of this kind.
    pub fn placeholder_sprites(self) -> &'static [&'static str] {
        match self {
            ItemKind::Armor => &["armor_dummy.png"],
            ItemKind::Ring => &["question_mark_entity.png", "ring_dummy.png"],
            ItemKind::Weapon(_) => &["sword_dummy.png", "question_mark_entity.png"],
        }
    }

    /// Max-level stat backfilled from the online feed, if any.
    pub fn max_level_field(self) -> Option<&'static str> {
        match self {
            ItemKind::Armor => Some("maxLevelArmor"),
            ItemKind::Weapon(_) => Some("maxLevelDamage"),
            ItemKind::Ring => None,
        }
    }
}
