//! # Player Data Model
//!
//! The full persisted character state. This is exactly what the save file
//! carries, which means the player can open it in a text editor and change
//! anything they like — `dungeonheart_security` exists because of that.

use serde::{Deserialize, Serialize};

/// Item rarity tiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    /// Baseline drops.
    #[default]
    Common,
    /// Slightly better drops.
    Uncommon,
    /// Dungeon-floor rewards.
    Rare,
    /// Mini-boss rewards.
    Epic,
    /// Boss rewards.
    Legendary,
}

/// A stack of identical items in the player's inventory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Display name of the item.
    pub name: String,
    /// Number of items in this stack.
    pub quantity: i64,
    /// Rarity tier; legacy saves without one default to common.
    #[serde(default)]
    pub rarity: Rarity,
}

impl Rarity {
    /// Save-format (lowercase) name of this tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }
}

impl ItemStack {
    /// Creates a new stack.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: i64, rarity: Rarity) -> Self {
        Self {
            name: name.into(),
            quantity,
            rarity,
        }
    }
}

/// Complete character state as persisted in the save blob.
///
/// Field names serialize in camelCase for compatibility with saves written
/// by earlier releases.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    /// Character name.
    pub name: String,
    /// Current level.
    pub level: i64,
    /// Current hit points.
    pub health: i64,
    /// Hit point ceiling.
    pub max_health: i64,
    /// Primary stat: raw strength, also drives max health scaling.
    pub power: i64,
    /// Primary stat: damage mitigation.
    pub defense: i64,
    /// Primary stat: initiative and dodge.
    pub agility: i64,
    /// Primary stat: spell potency.
    pub spirit: i64,
    /// Primary stat: vendor prices and dialogue checks.
    pub presence: i64,
    /// Gold on hand.
    pub gold: i64,
    /// Lifetime experience points.
    pub xp: i64,
    /// Unspent stat points.
    pub stat_points: i64,
    /// Lifetime kill count.
    pub kills: i64,
    /// Lifetime death count.
    pub deaths: i64,
    /// Campaign bosses defeated.
    pub bosses_defeated: i64,
    /// Current energy.
    pub energy: i64,
    /// Energy ceiling.
    pub max_energy: i64,
    /// Current mana.
    pub mana: i64,
    /// Mana ceiling.
    pub max_mana: i64,
    /// Carried items.
    #[serde(default)]
    pub inventory: Vec<ItemStack>,
}

impl PlayerState {
    /// Creates a fresh level-1 character with starting resources.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 1,
            health: 100,
            max_health: 100,
            power: 10,
            defense: 10,
            agility: 10,
            spirit: 10,
            presence: 10,
            gold: 0,
            xp: 0,
            stat_points: 0,
            kills: 0,
            deaths: 0,
            bosses_defeated: 0,
            energy: 100,
            max_energy: 100,
            mana: 50,
            max_mana: 50,
            inventory: Vec::new(),
        }
    }

    /// Sum of the five primary stats.
    #[must_use]
    pub const fn primary_stat_total(&self) -> i64 {
        self.power + self.defense + self.agility + self.spirit + self.presence
    }
}
