//! # Load-Time Pipeline
//!
//! Stitches the validators together into the contract the save/load
//! collaborator consumes: one call in with a deserialized blob, one
//! accept/reject plus warning list out. On reject the caller must not
//! enter gameplay with that state; the on-disk blob is left untouched
//! either way.

use dungeonheart_shared::player::PlayerState;
use dungeonheart_shared::protocol::ScoreSubmission;
use dungeonheart_shared::save::SaveBlob;

use crate::anti_cheat::{self, CheatWarning, ProgressionSample, WarningCategory};
use crate::config::{ChecksumPolicy, SecurityConfig};
use crate::error::{MetadataRejection, SecurityError, SecurityResult};
use crate::integrity::{self, MetadataStatus};
use crate::validation;

/// Outcome of a successful save audit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadReport {
    /// All advisory findings, in check order.
    pub warnings: Vec<CheatWarning>,
    /// What the integrity envelope verification concluded.
    pub metadata: MetadataStatus,
}

/// Audits a deserialized save blob before gameplay may begin.
///
/// Hard checks (player ranges, cross-field rules, inventory structure) run
/// first and abort the load on violation. Everything after that is
/// advisory and accumulates into the report: integrity envelope
/// verification (hard only under [`ChecksumPolicy::Enforce`]), cheat
/// patterns, and the rate-of-leveling check against the previous session's
/// sample if the caller has one.
///
/// # Errors
///
/// Any hard validation failure, or [`SecurityError::MetadataRejected`]
/// under the enforcing checksum policy.
pub fn audit_save(
    blob: &SaveBlob,
    previous: Option<&ProgressionSample>,
    config: &SecurityConfig,
    now_ms: i64,
) -> SecurityResult<LoadReport> {
    let mut warnings = validation::validate_player(&blob.player)?;
    warnings.extend(validation::validate_inventory(&blob.player.inventory)?);

    let metadata = integrity::verify_metadata(blob, config, now_ms);
    match &metadata {
        MetadataStatus::Missing => {
            if config.checksum_policy == ChecksumPolicy::Enforce {
                return Err(SecurityError::MetadataRejected(MetadataRejection::Missing));
            }
            // Pre-envelope saves are legal; note it and move on.
            tracing::warn!("save data missing integrity metadata, allowing load");
            warnings.push(CheatWarning::new(
                WarningCategory::Metadata,
                "save data missing integrity metadata",
            ));
        }
        MetadataStatus::ChecksumMismatch { stored, computed } => {
            if config.checksum_policy == ChecksumPolicy::Enforce {
                return Err(SecurityError::MetadataRejected(
                    MetadataRejection::ChecksumMismatch,
                ));
            }
            tracing::warn!(
                stored = stored.as_str(),
                computed = computed.as_str(),
                "checksum mismatch, save data may be corrupted or tampered; allowing load"
            );
            warnings.push(CheatWarning::new(
                WarningCategory::Metadata,
                format!("checksum mismatch (stored {stored}, computed {computed})"),
            ));
        }
        MetadataStatus::Valid {
            warnings: metadata_warnings,
        } => {
            warnings.extend(metadata_warnings.iter().cloned());
        }
    }

    warnings.extend(anti_cheat::detect_patterns(&blob.player));
    if let Some(warning) =
        anti_cheat::check_progression_rate(&blob.player, previous, now_ms, config)
    {
        warnings.push(warning);
    }

    Ok(LoadReport { warnings, metadata })
}

/// Builds a stamped save blob ready for the save collaborator to persist.
#[must_use]
pub fn stamp_save(player: PlayerState, now_ms: i64) -> SaveBlob {
    let mut blob = SaveBlob::new(player);
    integrity::attach_metadata(&mut blob, now_ms);
    blob
}

/// Projects a player into the leaderboard submission subset.
///
/// The leaderboard contract: only state that passes the hard player
/// validation may be exposed for submission. This function is the only
/// producer of [`ScoreSubmission`].
///
/// # Errors
///
/// Whatever hard failure the player validator raised.
pub fn prepare_submission(player: &PlayerState) -> SecurityResult<ScoreSubmission> {
    validation::validate_player(player)?;
    Ok(ScoreSubmission {
        name: player.name.clone(),
        level: player.level,
        kills: player.kills,
        power: player.power,
        defense: player.defense,
        gold: player.gold,
    })
}
