//! # Game Constants
//!
//! Hard caps baked into the client binary. Changing any of these invalidates
//! every checksum-stamped save produced under the old values, so treat them
//! as part of the save format.

// =============================================================================
// PROGRESSION CAPS
// =============================================================================

/// Highest reachable character level.
pub const MAX_LEVEL: i64 = 24;

/// Number of bosses in the campaign.
pub const MAX_BOSSES: i64 = 4;

/// Unspent stat points can never exceed two per level.
pub const MAX_STAT_POINTS: i64 = MAX_LEVEL * 2;

// =============================================================================
// RESOURCE CEILINGS
// =============================================================================

/// Global gold ceiling, enforced as a hard gate on every gold mutation.
pub const GOLD_CEILING: i64 = 999_999;

/// Per-stat ceiling for the five primary stats.
pub const STAT_CEILING: i64 = 150;

/// Lifetime XP ceiling.
pub const XP_CEILING: i64 = 999_999;

/// Health and max-health ceiling.
pub const HEALTH_CEILING: i64 = 3_000;

/// Energy and max-energy ceiling.
pub const ENERGY_CEILING: i64 = 200;

/// Mana and max-mana ceiling.
pub const MANA_CEILING: i64 = 300;

/// Kill/death counter ceiling.
pub const KILL_COUNTER_CEILING: i64 = 99_999;

// =============================================================================
// INVENTORY LIMITS
// =============================================================================

/// Largest quantity a single item stack may hold.
pub const MAX_STACK_QUANTITY: i64 = 999;

/// Aggregate quantity per (name, rarity) above which a stockpile is
/// considered suspicious. Advisory only; big hoards are legal.
pub const STOCKPILE_WARN_QUANTITY: i64 = 999;
