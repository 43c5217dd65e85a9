//! # Player Data Validation
//!
//! Hard validation of persisted character state.
//!
//! ## Philosophy
//!
//! NEVER trust the save file. The player owns the disk it lives on.
//! We verify:
//! 1. Every tracked numeric field sits inside its declared range
//! 2. Cross-field rules hold (`health <= maxHealth`, ...)
//! 3. The inventory is structurally sound
//!
//! Range and logical violations are hard failures that block the load.
//! The plausibility auditors called afterwards only ever produce warnings.

use std::collections::HashMap;

use dungeonheart_shared::constants::{
    ENERGY_CEILING, GOLD_CEILING, HEALTH_CEILING, KILL_COUNTER_CEILING, MANA_CEILING, MAX_BOSSES,
    MAX_LEVEL, MAX_STACK_QUANTITY, MAX_STAT_POINTS, STAT_CEILING, STOCKPILE_WARN_QUANTITY,
    XP_CEILING,
};
use dungeonheart_shared::player::{ItemStack, PlayerState, Rarity};

use crate::anti_cheat::{self, CheatWarning, WarningCategory};
use crate::error::{LogicalRule, SecurityError, SecurityResult};

/// The closed set of numeric player fields subject to range validation.
///
/// Declaration order is load-bearing: it fixes both the validation order
/// and the canonical checksum encoding. Fields not listed here (name,
/// inventory) are simply outside the range table's scope; a new numeric
/// field is invisible to validation until it gets a variant and a row in
/// [`RANGES`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatField {
    /// Character level.
    Level,
    /// Current hit points.
    Health,
    /// Hit point ceiling.
    MaxHealth,
    /// Primary stat.
    Power,
    /// Primary stat.
    Defense,
    /// Primary stat.
    Agility,
    /// Primary stat.
    Spirit,
    /// Primary stat.
    Presence,
    /// Gold on hand.
    Gold,
    /// Lifetime experience.
    Xp,
    /// Unspent stat points.
    StatPoints,
    /// Lifetime kills.
    Kills,
    /// Lifetime deaths.
    Deaths,
    /// Campaign bosses defeated.
    BossesDefeated,
    /// Current energy.
    Energy,
    /// Energy ceiling.
    MaxEnergy,
    /// Current mana.
    Mana,
    /// Mana ceiling.
    MaxMana,
}

impl StatField {
    /// Reads this field's value out of a player state.
    #[must_use]
    pub const fn value_of(self, player: &PlayerState) -> i64 {
        match self {
            Self::Level => player.level,
            Self::Health => player.health,
            Self::MaxHealth => player.max_health,
            Self::Power => player.power,
            Self::Defense => player.defense,
            Self::Agility => player.agility,
            Self::Spirit => player.spirit,
            Self::Presence => player.presence,
            Self::Gold => player.gold,
            Self::Xp => player.xp,
            Self::StatPoints => player.stat_points,
            Self::Kills => player.kills,
            Self::Deaths => player.deaths,
            Self::BossesDefeated => player.bosses_defeated,
            Self::Energy => player.energy,
            Self::MaxEnergy => player.max_energy,
            Self::Mana => player.mana,
            Self::MaxMana => player.max_mana,
        }
    }

    /// Save-format (camelCase) name of this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::Health => "health",
            Self::MaxHealth => "maxHealth",
            Self::Power => "power",
            Self::Defense => "defense",
            Self::Agility => "agility",
            Self::Spirit => "spirit",
            Self::Presence => "presence",
            Self::Gold => "gold",
            Self::Xp => "xp",
            Self::StatPoints => "statPoints",
            Self::Kills => "kills",
            Self::Deaths => "deaths",
            Self::BossesDefeated => "bossesDefeated",
            Self::Energy => "energy",
            Self::MaxEnergy => "maxEnergy",
            Self::Mana => "mana",
            Self::MaxMana => "maxMana",
        }
    }
}

impl core::fmt::Display for StatField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inclusive validation range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    /// Lower bound, inclusive.
    pub min: i64,
    /// Upper bound, inclusive.
    pub max: i64,
}

impl Range {
    /// Creates a range.
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Returns true if `value` lies inside the range.
    #[must_use]
    pub const fn contains(self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Declared bounds for every tracked field, in canonical field order.
pub const RANGES: [(StatField, Range); 18] = [
    (StatField::Level, Range::new(1, MAX_LEVEL)),
    (StatField::Health, Range::new(1, HEALTH_CEILING)),
    (StatField::MaxHealth, Range::new(1, HEALTH_CEILING)),
    (StatField::Power, Range::new(1, STAT_CEILING)),
    (StatField::Defense, Range::new(1, STAT_CEILING)),
    (StatField::Agility, Range::new(1, STAT_CEILING)),
    (StatField::Spirit, Range::new(1, STAT_CEILING)),
    (StatField::Presence, Range::new(1, STAT_CEILING)),
    (StatField::Gold, Range::new(0, GOLD_CEILING)),
    (StatField::Xp, Range::new(0, XP_CEILING)),
    (StatField::StatPoints, Range::new(0, MAX_STAT_POINTS)),
    (StatField::Kills, Range::new(0, KILL_COUNTER_CEILING)),
    (StatField::Deaths, Range::new(0, KILL_COUNTER_CEILING)),
    (StatField::BossesDefeated, Range::new(0, MAX_BOSSES)),
    (StatField::Energy, Range::new(0, ENERGY_CEILING)),
    (StatField::MaxEnergy, Range::new(0, ENERGY_CEILING)),
    (StatField::Mana, Range::new(0, MANA_CEILING)),
    (StatField::MaxMana, Range::new(0, MANA_CEILING)),
];

/// Looks up the declared range for a field, if it is tracked.
#[must_use]
pub fn range_of(field: StatField) -> Option<Range> {
    RANGES
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, range)| *range)
}

/// Validates a player state.
///
/// Fail-fast over the range table in canonical order, then the ordered
/// cross-field rules, then the advisory plausibility auditors. The returned
/// warnings never affect acceptance.
///
/// # Errors
///
/// [`SecurityError::RangeViolation`] naming the first out-of-bounds field,
/// or [`SecurityError::LogicalViolation`] for a cross-field rule.
pub fn validate_player(player: &PlayerState) -> SecurityResult<Vec<CheatWarning>> {
    for (field, range) in RANGES {
        let value = field.value_of(player);
        if !range.contains(value) {
            return Err(SecurityError::RangeViolation {
                field,
                value,
                min: range.min,
                max: range.max,
            });
        }
    }

    if let Some(rule) = logical_violations(player) {
        return Err(SecurityError::LogicalViolation { rule });
    }

    let mut warnings = anti_cheat::audit_progression(player);
    warnings.extend(anti_cheat::audit_stat_distribution(player));
    for warning in &warnings {
        tracing::warn!(category = %warning.category, "{}", warning.message);
    }
    Ok(warnings)
}

/// Evaluates the ordered cross-field rules, yielding the first violation.
fn logical_violations(player: &PlayerState) -> Option<LogicalRule> {
    if player.health > player.max_health {
        Some(LogicalRule::HealthAboveMax)
    } else if player.energy > player.max_energy {
        Some(LogicalRule::EnergyAboveMax)
    } else if player.mana > player.max_mana {
        Some(LogicalRule::ManaAboveMax)
    } else {
        None
    }
}

/// Validates the inventory collection.
///
/// Empty names and quantities outside `1..=999` are hard failures.
/// Aggregate stockpiles over the per-stack cap only warn: a hoard of 40
/// potion stacks is weird, not impossible.
///
/// # Errors
///
/// [`SecurityError::Structural`] for a malformed item.
pub fn validate_inventory(items: &[ItemStack]) -> SecurityResult<Vec<CheatWarning>> {
    let mut totals: HashMap<(&str, Rarity), i64> = HashMap::new();

    for item in items {
        if item.name.is_empty() {
            return Err(SecurityError::Structural {
                reason: "inventory item with empty name".to_string(),
            });
        }
        if item.quantity < 1 || item.quantity > MAX_STACK_QUANTITY {
            return Err(SecurityError::Structural {
                reason: format!(
                    "invalid quantity {} for item '{}' (must be 1-{MAX_STACK_QUANTITY})",
                    item.quantity, item.name
                ),
            });
        }
        *totals.entry((item.name.as_str(), item.rarity)).or_insert(0) += item.quantity;
    }

    let mut warnings = Vec::new();
    for ((name, rarity), total) in totals {
        if total > STOCKPILE_WARN_QUANTITY {
            let warning = CheatWarning::new(
                WarningCategory::Stockpile,
                format!("suspicious item count: {name} ({rarity:?}) = {total}"),
            );
            tracing::warn!(category = %warning.category, "{}", warning.message);
            warnings.push(warning);
        }
    }
    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_player() -> PlayerState {
        PlayerState {
            level: 10,
            health: 200,
            max_health: 250,
            power: 25,
            defense: 20,
            agility: 18,
            spirit: 22,
            presence: 15,
            gold: 5_000,
            xp: 15_000,
            stat_points: 5,
            kills: 150,
            deaths: 10,
            bosses_defeated: 2,
            energy: 80,
            max_energy: 100,
            mana: 120,
            max_mana: 150,
            ..PlayerState::new("Test Hero")
        }
    }

    #[test]
    fn test_valid_player_accepted() {
        let result = validate_player(&valid_player());
        assert!(result.is_ok());
    }

    #[test]
    fn test_minimum_boundary_player_accepted() {
        let player = PlayerState {
            level: 1,
            health: 1,
            max_health: 1,
            power: 1,
            defense: 1,
            agility: 1,
            spirit: 1,
            presence: 1,
            gold: 0,
            xp: 0,
            stat_points: 0,
            kills: 0,
            deaths: 0,
            bosses_defeated: 0,
            energy: 0,
            max_energy: 0,
            mana: 0,
            max_mana: 0,
            ..PlayerState::new("Min")
        };
        assert!(validate_player(&player).is_ok());
    }

    #[test]
    fn test_level_above_cap_names_field() {
        let player = PlayerState {
            level: 25,
            ..valid_player()
        };
        let err = validate_player(&player).unwrap_err();
        assert_eq!(
            err,
            SecurityError::RangeViolation {
                field: StatField::Level,
                value: 25,
                min: 1,
                max: 24,
            }
        );
    }

    #[test]
    fn test_every_field_rejected_one_past_each_bound() {
        for (field, range) in RANGES {
            for bad in [range.min - 1, range.max + 1] {
                let mut player = valid_player();
                set_field(&mut player, field, bad);
                let err = validate_player(&player).unwrap_err();
                match err {
                    SecurityError::RangeViolation { field: named, value, .. } => {
                        assert_eq!(named, field, "wrong field named for {field}");
                        assert_eq!(value, bad);
                    }
                    other => panic!("expected range violation for {field}, got {other:?}"),
                }
            }
        }
    }

    fn set_field(player: &mut PlayerState, field: StatField, value: i64) {
        match field {
            StatField::Level => player.level = value,
            StatField::Health => player.health = value,
            StatField::MaxHealth => player.max_health = value,
            StatField::Power => player.power = value,
            StatField::Defense => player.defense = value,
            StatField::Agility => player.agility = value,
            StatField::Spirit => player.spirit = value,
            StatField::Presence => player.presence = value,
            StatField::Gold => player.gold = value,
            StatField::Xp => player.xp = value,
            StatField::StatPoints => player.stat_points = value,
            StatField::Kills => player.kills = value,
            StatField::Deaths => player.deaths = value,
            StatField::BossesDefeated => player.bosses_defeated = value,
            StatField::Energy => player.energy = value,
            StatField::MaxEnergy => player.max_energy = value,
            StatField::Mana => player.mana = value,
            StatField::MaxMana => player.max_mana = value,
        }
        // Keep the paired ceiling consistent so only the range rule fires.
        match field {
            StatField::Health => player.max_health = player.max_health.max(value),
            StatField::Energy => player.max_energy = player.max_energy.max(value),
            StatField::Mana => player.max_mana = player.max_mana.max(value),
            _ => {}
        }
    }

    #[test]
    fn test_health_above_max_is_logical_violation() {
        let player = PlayerState {
            health: 251,
            max_health: 250,
            ..valid_player()
        };
        let err = validate_player(&player).unwrap_err();
        assert_eq!(
            err,
            SecurityError::LogicalViolation {
                rule: LogicalRule::HealthAboveMax
            }
        );
    }

    #[test]
    fn test_energy_above_max_is_logical_violation() {
        let player = PlayerState {
            energy: 101,
            max_energy: 100,
            ..valid_player()
        };
        let err = validate_player(&player).unwrap_err();
        assert_eq!(
            err,
            SecurityError::LogicalViolation {
                rule: LogicalRule::EnergyAboveMax
            }
        );
    }

    #[test]
    fn test_mana_above_max_is_logical_violation() {
        let player = PlayerState {
            mana: 151,
            max_mana: 150,
            ..valid_player()
        };
        let err = validate_player(&player).unwrap_err();
        assert_eq!(
            err,
            SecurityError::LogicalViolation {
                rule: LogicalRule::ManaAboveMax
            }
        );
    }

    #[test]
    fn test_range_lookup() {
        assert_eq!(range_of(StatField::Level), Some(Range::new(1, 24)));
        assert_eq!(range_of(StatField::Gold), Some(Range::new(0, 999_999)));
    }

    #[test]
    fn test_inventory_accepts_valid_stacks() {
        let items = vec![
            ItemStack::new("Healing Potion", 5, Rarity::Common),
            ItemStack::new("Legendary Sword", 1, Rarity::Legendary),
            ItemStack::new("Iron Ore", 999, Rarity::Common),
        ];
        let warnings = validate_inventory(&items).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_inventory_rejects_zero_quantity() {
        let items = vec![ItemStack::new("Dust", 0, Rarity::Common)];
        assert!(matches!(
            validate_inventory(&items),
            Err(SecurityError::Structural { .. })
        ));
    }

    #[test]
    fn test_inventory_rejects_oversized_stack() {
        let items = vec![ItemStack::new("Gold Bar", 9_999, Rarity::Common)];
        assert!(matches!(
            validate_inventory(&items),
            Err(SecurityError::Structural { .. })
        ));
    }

    #[test]
    fn test_inventory_rejects_empty_name() {
        let items = vec![ItemStack::new("", 1, Rarity::Common)];
        assert!(matches!(
            validate_inventory(&items),
            Err(SecurityError::Structural { .. })
        ));
    }

    #[test]
    fn test_inventory_stockpile_warns_but_passes() {
        // Two legal stacks of the same item aggregate past the cap.
        let items = vec![
            ItemStack::new("Healing Potion", 600, Rarity::Common),
            ItemStack::new("Healing Potion", 600, Rarity::Common),
        ];
        let warnings = validate_inventory(&items).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, WarningCategory::Stockpile);
    }

    #[test]
    fn test_stockpile_keyed_by_name_and_rarity() {
        // Same name, different rarities: two separate aggregates, no warning.
        let items = vec![
            ItemStack::new("Healing Potion", 600, Rarity::Common),
            ItemStack::new("Healing Potion", 600, Rarity::Rare),
        ];
        let warnings = validate_inventory(&items).unwrap();
        assert!(warnings.is_empty());
    }
}
