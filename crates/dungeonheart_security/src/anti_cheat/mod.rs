//! # Heuristic Cheat Auditors
//!
//! Plausibility checks over player state. Every finding in this module is
//! advisory: legitimate play can and does land outside these bands, so a
//! warning here is telemetry for a human to look at, never a block.
//!
//! ## Detection Methods
//!
//! - **Progression curve**: XP and boss pacing implausible for the level
//! - **Stat distribution**: primary stats or max health off the growth curve
//! - **Known patterns**: signatures left by common save editors
//! - **Rate of leveling**: levels gained faster than the game can hand out

use dungeonheart_shared::constants::MAX_BOSSES;
use dungeonheart_shared::player::PlayerState;
use dungeonheart_shared::save::IntegrityMetadata;

use crate::config::SecurityConfig;

/// What a warning is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WarningCategory {
    /// XP outside the plausible band for the level.
    Progression,
    /// Bosses defeated too early for the level.
    BossPacing,
    /// Primary stat total off the growth curve.
    StatDistribution,
    /// Max health off the level/power-derived band.
    HealthScaling,
    /// A known cheat signature matched.
    CheatPattern,
    /// Leveled faster than the game can hand out levels.
    ProgressionRate,
    /// Aggregate item quantity past the per-stack cap.
    Stockpile,
    /// Integrity envelope missing, stale or mismatching.
    Metadata,
    /// Runtime monitor observed a suspicious state change.
    Runtime,
}

impl core::fmt::Display for WarningCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            Self::Progression => "progression",
            Self::BossPacing => "boss-pacing",
            Self::StatDistribution => "stat-distribution",
            Self::HealthScaling => "health-scaling",
            Self::CheatPattern => "cheat-pattern",
            Self::ProgressionRate => "progression-rate",
            Self::Stockpile => "stockpile",
            Self::Metadata => "metadata",
            Self::Runtime => "runtime",
        };
        f.write_str(text)
    }
}

/// An advisory finding. Accumulated into lists and logged, never fatal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheatWarning {
    /// What the warning is about.
    pub category: WarningCategory,
    /// Human-readable description with the offending values.
    pub message: String,
}

impl CheatWarning {
    /// Creates a warning.
    #[must_use]
    pub fn new(category: WarningCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}

/// Audits XP and boss pacing against the level.
///
/// The XP band is deliberately wide (half the curve minimum to double the
/// curve maximum): grinding and rushing are both legal.
#[must_use]
pub fn audit_progression(player: &PlayerState) -> Vec<CheatWarning> {
    let mut warnings = Vec::new();
    let level = player.level as f64;

    let curve_min = if player.level > 1 {
        (level - 1.0).powf(1.5) * 50.0
    } else {
        0.0
    };
    let curve_max = (level + 1.0).powi(2) * 100.0;
    let xp = player.xp as f64;

    if xp < curve_min * 0.5 || xp > curve_max * 2.0 {
        warnings.push(CheatWarning::new(
            WarningCategory::Progression,
            format!("suspicious XP: {} for level {}", player.xp, player.level),
        ));
    }

    let bosses_for_level = MAX_BOSSES.min(player.level / 5);
    if player.bosses_defeated > bosses_for_level + 1 {
        warnings.push(CheatWarning::new(
            WarningCategory::BossPacing,
            format!(
                "suspicious boss count: {} for level {}",
                player.bosses_defeated, player.level
            ),
        ));
    }

    warnings
}

/// Audits the primary stat total and max health scaling.
///
/// Stat band: 50 base (10 per stat), up to 5 points per level-up plus a
/// 60-point allowance for item bonuses; at least half the earned points
/// are assumed spent. Health band: the level curve with ±50% slack plus a
/// power-scaled top end.
#[must_use]
pub fn audit_stat_distribution(player: &PlayerState) -> Vec<CheatWarning> {
    let mut warnings = Vec::new();
    let levels_gained = (player.level - 1) as f64;

    let total = player.primary_stat_total() as f64;
    let stat_min = 50.0 + levels_gained * 0.5;
    let stat_max = 50.0 + levels_gained * 5.0 + 60.0;

    if total < stat_min || total > stat_max {
        warnings.push(CheatWarning::new(
            WarningCategory::StatDistribution,
            format!(
                "suspicious stats total: {} for level {} (expected {stat_min}-{stat_max})",
                player.primary_stat_total(),
                player.level
            ),
        ));
    }

    let hp_curve_min = 100.0 + levels_gained * 15.0;
    let hp_curve_max = 200.0 + levels_gained * 25.0 + (player.power * 5) as f64;
    let max_health = player.max_health as f64;

    if max_health < hp_curve_min * 0.5 || max_health > hp_curve_max * 1.5 {
        warnings.push(CheatWarning::new(
            WarningCategory::HealthScaling,
            format!(
                "suspicious max health: {} for level {}",
                player.max_health, player.level
            ),
        ));
    }

    warnings
}

/// Matches the known cheat-editor signatures.
///
/// Each rule yields at most one warning. "Many kills, zero deaths" is
/// deliberately not a rule: skilled players do that, and flagging them
/// taught us more about our false-positive rate than about cheaters.
#[must_use]
pub fn detect_patterns(player: &PlayerState) -> Vec<CheatWarning> {
    let mut warnings = Vec::new();

    if player.gold > 10_000 && player.kills < 10 {
        warnings.push(CheatWarning::new(
            WarningCategory::CheatPattern,
            "excessive gold without kills",
        ));
    }

    if player.level > 10 && player.kills < player.level * 5 {
        warnings.push(CheatWarning::new(
            WarningCategory::CheatPattern,
            "high level with suspiciously low kills",
        ));
    }

    if player.bosses_defeated >= MAX_BOSSES && player.level < 15 {
        warnings.push(CheatWarning::new(
            WarningCategory::CheatPattern,
            "all bosses defeated at low level",
        ));
    }

    if player.primary_stat_total() > 200 && player.level < 10 {
        warnings.push(CheatWarning::new(
            WarningCategory::CheatPattern,
            "excessive stats for level",
        ));
    }

    if player.kills > 100 && player.deaths == 0 {
        tracing::debug!(
            kills = player.kills,
            "many kills with no deaths (impressive, not flagged)"
        );
    }

    warnings
}

/// Level and wall-clock stamp of a previously persisted state, used by the
/// rate-of-leveling auditor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressionSample {
    /// Level at the time of the previous save.
    pub level: i64,
    /// Unix milliseconds of the previous save.
    pub timestamp_ms: i64,
}

impl ProgressionSample {
    /// Builds a sample from a save's integrity envelope (`version` records
    /// the level at stamp time).
    #[must_use]
    pub const fn from_metadata(metadata: &IntegrityMetadata) -> Self {
        Self {
            level: metadata.version,
            timestamp_ms: metadata.timestamp_ms,
        }
    }
}

/// Flags more than one level gained inside the configured window.
///
/// No previous sample trivially passes.
#[must_use]
pub fn check_progression_rate(
    player: &PlayerState,
    previous: Option<&ProgressionSample>,
    now_ms: i64,
    config: &SecurityConfig,
) -> Option<CheatWarning> {
    let previous = previous?;
    let elapsed_ms = now_ms - previous.timestamp_ms;
    let levels_gained = player.level - previous.level;

    if elapsed_ms < config.leveling_window_ms && levels_gained > 1 {
        let warning = CheatWarning::new(
            WarningCategory::ProgressionRate,
            format!(
                "suspicious leveling rate: {levels_gained} levels in {:.1}s",
                elapsed_ms as f64 / 1000.0
            ),
        );
        tracing::warn!(category = %warning.category, "{}", warning.message);
        return Some(warning);
    }
    None
}
