//! # Action Gates
//!
//! Synchronous pre-condition checks invoked immediately before a critical
//! mutation commits. This is the one place in the subsystem with a hard
//! block contract at mutation time: a rejection here means the caller must
//! not apply the change, full stop. Everything runs on the caller's thread
//! between the check and the commit, so there is no check-then-act gap.

use crate::config::SecurityConfig;
use crate::error::{SecurityError, SecurityResult};

/// A gated mutation, carrying the old/new values the gate needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionPayload {
    /// A level-up about to commit.
    LevelUp {
        /// Level before the mutation.
        old_level: i64,
        /// Level the mutation would set.
        new_level: i64,
    },
    /// A gold balance change about to commit.
    GoldChange {
        /// Gold the mutation would set.
        new_gold: i64,
    },
    /// A primary stat increase about to commit.
    StatIncrease {
        /// Stat value the mutation would set.
        new_value: i64,
    },
    /// A health change about to commit.
    HealthChange {
        /// Health the mutation would set.
        new_health: i64,
        /// The character's current max health.
        max_health: i64,
    },
}

impl ActionPayload {
    /// Wire name of the gated action, used in rejection errors and logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::LevelUp { .. } => "levelUp",
            Self::GoldChange { .. } => "goldChange",
            Self::StatIncrease { .. } => "statIncrease",
            Self::HealthChange { .. } => "healthChange",
        }
    }
}

/// Validates a gated mutation.
///
/// # Errors
///
/// [`SecurityError::ActionRejected`] when the mutation must not commit:
/// - `LevelUp`: new level must be exactly old level + 1
/// - `GoldChange`: new gold must not exceed the gold ceiling
/// - `StatIncrease`: new value must not exceed the stat ceiling
/// - `HealthChange`: new health must not exceed max health
pub fn validate_action(payload: &ActionPayload, config: &SecurityConfig) -> SecurityResult<()> {
    let reason = match *payload {
        ActionPayload::LevelUp {
            old_level,
            new_level,
        } => (new_level != old_level + 1).then(|| {
            format!("level must increase by exactly 1 (got {old_level} -> {new_level})")
        }),
        ActionPayload::GoldChange { new_gold } => (new_gold > config.gold_ceiling)
            .then(|| format!("gold {new_gold} exceeds ceiling {}", config.gold_ceiling)),
        ActionPayload::StatIncrease { new_value } => (new_value > config.stat_ceiling)
            .then(|| format!("stat {new_value} exceeds ceiling {}", config.stat_ceiling)),
        ActionPayload::HealthChange {
            new_health,
            max_health,
        } => (new_health > max_health)
            .then(|| format!("health {new_health} exceeds max health {max_health}")),
    };

    match reason {
        Some(reason) => {
            tracing::error!(action = payload.kind(), "{reason}");
            Err(SecurityError::ActionRejected {
                action: payload.kind(),
                reason,
            })
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_up_by_one_passes() {
        let payload = ActionPayload::LevelUp {
            old_level: 4,
            new_level: 5,
        };
        assert!(validate_action(&payload, &SecurityConfig::default()).is_ok());
    }

    #[test]
    fn test_level_up_by_two_rejected() {
        let payload = ActionPayload::LevelUp {
            old_level: 4,
            new_level: 6,
        };
        let err = validate_action(&payload, &SecurityConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SecurityError::ActionRejected {
                action: "levelUp",
                ..
            }
        ));
    }

    #[test]
    fn test_level_down_rejected() {
        let payload = ActionPayload::LevelUp {
            old_level: 4,
            new_level: 3,
        };
        assert!(validate_action(&payload, &SecurityConfig::default()).is_err());
    }

    #[test]
    fn test_gold_at_ceiling_passes() {
        let payload = ActionPayload::GoldChange { new_gold: 999_999 };
        assert!(validate_action(&payload, &SecurityConfig::default()).is_ok());
    }

    #[test]
    fn test_gold_over_ceiling_rejected() {
        let payload = ActionPayload::GoldChange {
            new_gold: 1_000_000,
        };
        let err = validate_action(&payload, &SecurityConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SecurityError::ActionRejected {
                action: "goldChange",
                ..
            }
        ));
    }

    #[test]
    fn test_stat_over_ceiling_rejected() {
        let payload = ActionPayload::StatIncrease { new_value: 151 };
        assert!(validate_action(&payload, &SecurityConfig::default()).is_err());
    }

    #[test]
    fn test_health_over_max_rejected() {
        let payload = ActionPayload::HealthChange {
            new_health: 300,
            max_health: 250,
        };
        let err = validate_action(&payload, &SecurityConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SecurityError::ActionRejected {
                action: "healthChange",
                ..
            }
        ));
    }

    #[test]
    fn test_heal_to_max_passes() {
        let payload = ActionPayload::HealthChange {
            new_health: 250,
            max_health: 250,
        };
        assert!(validate_action(&payload, &SecurityConfig::default()).is_ok());
    }

    #[test]
    fn test_custom_ceiling_respected() {
        let config = SecurityConfig {
            gold_ceiling: 100,
            ..SecurityConfig::default()
        };
        let payload = ActionPayload::GoldChange { new_gold: 101 };
        assert!(validate_action(&payload, &config).is_err());
    }
}
