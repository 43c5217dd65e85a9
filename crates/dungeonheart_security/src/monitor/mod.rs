//! # Runtime Integrity Monitor
//!
//! Periodic snapshot/diff of live player state. Purely observational: the
//! monitor never blocks gameplay, it accumulates anomalies into a
//! leaky-bucket counter and escalates to a severe log event when the
//! bucket fills. Single false positives decay away on the next clean tick.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ──start()──► Sampling ──sample()──► Comparing ──► Clean
//!   ▲                  ▲                       │           │
//!   └─────stop()───────┘                       └─► Anomalous (counter +n)
//! ```
//!
//! Everything here runs synchronously on the game's cooperative thread;
//! the game loop owns the cadence and calls [`RuntimeMonitor::sample`]
//! when [`RuntimeMonitor::due`] says the interval has elapsed. Ticks never
//! interleave with mutations, so every sample sees a fully settled state.

use dungeonheart_shared::player::PlayerState;

use crate::anti_cheat::{CheatWarning, WarningCategory};
use crate::config::SecurityConfig;

/// Point-in-time projection of the monitored field subset.
///
/// Single-slot history: only the previous snapshot is retained, and only
/// until the next one replaces it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Level at capture time.
    pub level: i64,
    /// Health at capture time.
    pub health: i64,
    /// Max health at capture time.
    pub max_health: i64,
    /// Gold at capture time.
    pub gold: i64,
    /// XP at capture time.
    pub xp: i64,
    /// Kills at capture time.
    pub kills: i64,
    /// Power at capture time.
    pub power: i64,
    /// Defense at capture time.
    pub defense: i64,
    /// Capture wall-clock time, unix milliseconds.
    pub timestamp_ms: i64,
}

impl Snapshot {
    /// Captures the monitored subset of a player state.
    #[must_use]
    pub const fn capture(player: &PlayerState, now_ms: i64) -> Self {
        Self {
            level: player.level,
            health: player.health,
            max_health: player.max_health,
            gold: player.gold,
            xp: player.xp,
            kills: player.kills,
            power: player.power,
            defense: player.defense,
            timestamp_ms: now_ms,
        }
    }
}

/// What one monitoring tick observed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// Anomalies found this tick (empty on a clean tick).
    pub anomalies: Vec<CheatWarning>,
    /// Counter value after this tick.
    pub counter: u32,
    /// True when the counter hit the threshold and was reset.
    pub escalated: bool,
}

impl TickReport {
    /// A tick that observed nothing.
    #[must_use]
    pub const fn idle(counter: u32) -> Self {
        Self {
            anomalies: Vec::new(),
            counter,
            escalated: false,
        }
    }
}

/// The leaky-bucket runtime monitor.
///
/// Owns the single-slot snapshot and the anomaly counter; nothing else
/// may touch either. All state lives in this object — there are no free
/// module-level variables to reset or race on.
#[derive(Clone, Debug)]
pub struct RuntimeMonitor {
    config: SecurityConfig,
    running: bool,
    last_snapshot: Option<Snapshot>,
    last_tick_ms: Option<i64>,
    anomaly_count: u32,
}

impl RuntimeMonitor {
    /// Creates a monitor in the idle state with no prior snapshot.
    #[must_use]
    pub const fn new(config: SecurityConfig) -> Self {
        Self {
            config,
            running: false,
            last_snapshot: None,
            last_tick_ms: None,
            anomaly_count: 0,
        }
    }

    /// Begins sampling. Idempotent.
    pub fn start(&mut self) {
        if !self.running {
            tracing::info!("starting runtime integrity monitoring");
            self.running = true;
        }
    }

    /// Halts sampling. Idempotent; there is no in-flight work to cancel
    /// since every tick is synchronous.
    pub fn stop(&mut self) {
        if self.running {
            tracing::info!("stopping runtime integrity monitoring");
            self.running = false;
        }
    }

    /// Whether the monitor is currently sampling.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Current anomaly counter value.
    #[must_use]
    pub const fn anomaly_count(&self) -> u32 {
        self.anomaly_count
    }

    /// Whether the configured interval has elapsed since the last tick.
    /// Always false while stopped; true for the first tick after a start.
    #[must_use]
    pub fn due(&self, now_ms: i64) -> bool {
        if !self.running {
            return false;
        }
        self.last_tick_ms
            .map_or(true, |last| now_ms - last >= self.config.check_interval_ms)
    }

    /// Forgets the previous snapshot.
    ///
    /// Called on an explicit, player-initiated game reset so the fresh
    /// level-1 character is not reported as a level decrease. This is the
    /// only legitimate path to a lower level.
    pub fn notify_reset(&mut self) {
        self.last_snapshot = None;
        self.last_tick_ms = None;
    }

    /// Takes a snapshot and diffs it against the previous one.
    ///
    /// Each triggered rule adds one to the anomaly counter; a clean tick
    /// drains one (floored at zero). At the configured threshold the
    /// monitor emits a severe log event, reports `escalated`, and resets
    /// the counter — hysteresis, not punishment: gameplay continues.
    pub fn sample(&mut self, player: &PlayerState, now_ms: i64) -> TickReport {
        if !self.running {
            return TickReport::idle(self.anomaly_count);
        }

        let current = Snapshot::capture(player, now_ms);
        let anomalies = match &self.last_snapshot {
            Some(previous) => diff_snapshots(&current, previous, &self.config),
            None => Vec::new(),
        };

        if anomalies.is_empty() {
            self.anomaly_count = self.anomaly_count.saturating_sub(1);
        } else {
            for anomaly in &anomalies {
                tracing::warn!(category = %anomaly.category, "{}", anomaly.message);
            }
            self.anomaly_count += u32::try_from(anomalies.len()).unwrap_or(u32::MAX);
        }

        let escalated = self.anomaly_count >= self.config.anomaly_threshold;
        if escalated {
            tracing::error!(
                count = self.anomaly_count,
                "multiple anomalies detected, game state may be compromised"
            );
            self.anomaly_count = 0;
        }

        self.last_snapshot = Some(current);
        self.last_tick_ms = Some(now_ms);
        TickReport {
            anomalies,
            counter: self.anomaly_count,
            escalated,
        }
    }
}

/// Applies the between-sample rules. All findings are advisory-severity;
/// their weight comes from accumulation in the counter.
fn diff_snapshots(
    current: &Snapshot,
    previous: &Snapshot,
    config: &SecurityConfig,
) -> Vec<CheatWarning> {
    let mut warnings = Vec::new();
    let elapsed_ms = current.timestamp_ms - previous.timestamp_ms;
    let within_window = elapsed_ms < config.rate_window_ms;
    let minutes = elapsed_ms as f64 / 60_000.0;

    for (name, now, before) in [
        ("power", current.power, previous.power),
        ("defense", current.defense, previous.defense),
    ] {
        if now > before + config.max_stat_jump {
            warnings.push(CheatWarning::new(
                WarningCategory::Runtime,
                format!("suspicious {name} increase: +{}", now - before),
            ));
        }
    }

    let gold_gained = current.gold - previous.gold;
    if gold_gained > config.max_gold_gain && within_window {
        warnings.push(CheatWarning::new(
            WarningCategory::Runtime,
            format!("rapid gold gain: +{gold_gained} in {minutes:.1} minutes"),
        ));
    }

    let levels_gained = current.level - previous.level;
    if levels_gained > config.max_level_gain && within_window {
        warnings.push(CheatWarning::new(
            WarningCategory::Runtime,
            format!("rapid level gain: +{levels_gained} levels in {minutes:.1} minutes"),
        ));
    }

    if current.health > current.max_health {
        warnings.push(CheatWarning::new(
            WarningCategory::Runtime,
            format!(
                "health ({}) exceeds max health ({})",
                current.health, current.max_health
            ),
        ));
    }

    if current.level < previous.level {
        warnings.push(CheatWarning::new(WarningCategory::Runtime, "level decreased"));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> PlayerState {
        PlayerState {
            level: 10,
            health: 200,
            max_health: 250,
            power: 25,
            defense: 20,
            gold: 5_000,
            xp: 15_000,
            kills: 150,
            ..PlayerState::new("Test Hero")
        }
    }

    fn started_monitor() -> RuntimeMonitor {
        let mut monitor = RuntimeMonitor::new(SecurityConfig::default());
        monitor.start();
        monitor
    }

    #[test]
    fn test_start_stop_idempotent() {
        let mut monitor = RuntimeMonitor::new(SecurityConfig::default());
        assert!(!monitor.is_running());
        monitor.start();
        monitor.start();
        assert!(monitor.is_running());
        monitor.stop();
        monitor.stop();
        assert!(!monitor.is_running());
    }

    #[test]
    fn test_stopped_monitor_ignores_samples() {
        let mut monitor = RuntimeMonitor::new(SecurityConfig::default());
        let report = monitor.sample(&player(), 0);
        assert!(report.anomalies.is_empty());
        assert!(!monitor.due(1_000_000));
    }

    #[test]
    fn test_first_tick_has_nothing_to_compare() {
        let mut monitor = started_monitor();
        let report = monitor.sample(&player(), 0);
        assert!(report.anomalies.is_empty());
        assert_eq!(report.counter, 0);
    }

    #[test]
    fn test_due_respects_interval() {
        let mut monitor = started_monitor();
        assert!(monitor.due(0));
        monitor.sample(&player(), 0);
        assert!(!monitor.due(29_999));
        assert!(monitor.due(30_000));
    }

    #[test]
    fn test_clean_ticks_never_go_negative() {
        let mut monitor = started_monitor();
        for i in 0..5 {
            let report = monitor.sample(&player(), i * 30_000);
            assert_eq!(report.counter, 0);
        }
    }

    #[test]
    fn test_stat_jump_flagged() {
        let mut monitor = started_monitor();
        monitor.sample(&player(), 0);
        let modded = PlayerState {
            power: 100,
            ..player()
        };
        let report = monitor.sample(&modded, 30_000);
        assert_eq!(report.anomalies.len(), 1);
        assert!(report.anomalies[0].message.contains("power"));
        assert_eq!(report.counter, 1);
    }

    #[test]
    fn test_rapid_gold_gain_flagged_only_inside_window() {
        let mut monitor = started_monitor();
        monitor.sample(&player(), 0);
        let rich = PlayerState {
            gold: 100_000,
            ..player()
        };
        let report = monitor.sample(&rich, 30_000);
        assert_eq!(report.anomalies.len(), 1);

        // Same gain over ten minutes is fine.
        let mut slow = started_monitor();
        slow.sample(&player(), 0);
        let report = slow.sample(&rich, 600_000);
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_health_over_max_flagged() {
        let mut monitor = started_monitor();
        monitor.sample(&player(), 0);
        let glitched = PlayerState {
            health: 400,
            max_health: 250,
            ..player()
        };
        let report = monitor.sample(&glitched, 30_000);
        assert!(report
            .anomalies
            .iter()
            .any(|a| a.message.contains("exceeds max health")));
    }

    #[test]
    fn test_level_decrease_flagged() {
        let mut monitor = started_monitor();
        monitor.sample(&player(), 0);
        let lower = PlayerState {
            level: 9,
            ..player()
        };
        let report = monitor.sample(&lower, 30_000);
        assert!(report.anomalies.iter().any(|a| a.message == "level decreased"));
    }

    #[test]
    fn test_reset_suppresses_level_decrease() {
        let mut monitor = started_monitor();
        monitor.sample(&player(), 0);
        monitor.notify_reset();
        let fresh = PlayerState::new("Test Hero");
        let report = monitor.sample(&fresh, 30_000);
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_escalation_after_three_anomalous_ticks() {
        let mut monitor = started_monitor();
        monitor.sample(&player(), 0);

        // One anomaly per tick: level decreases every sample.
        for (i, level) in [9, 8, 7].iter().enumerate() {
            let lower = PlayerState {
                level: *level,
                ..player()
            };
            let report = monitor.sample(&lower, (i as i64 + 1) * 30_000);
            if i < 2 {
                assert!(!report.escalated);
                assert_eq!(report.counter, u32::try_from(i).unwrap() + 1);
            } else {
                assert!(report.escalated);
                assert_eq!(report.counter, 0, "counter resets on escalation");
            }
        }
    }

    #[test]
    fn test_counter_decays_on_clean_ticks() {
        let mut monitor = started_monitor();
        monitor.sample(&player(), 0);
        let lower = PlayerState {
            level: 9,
            ..player()
        };
        monitor.sample(&lower, 30_000);
        assert_eq!(monitor.anomaly_count(), 1);

        let stable = PlayerState {
            level: 9,
            ..player()
        };
        let report = monitor.sample(&stable, 60_000);
        assert_eq!(report.counter, 0);
        let report = monitor.sample(&stable, 90_000);
        assert_eq!(report.counter, 0);
    }
}
