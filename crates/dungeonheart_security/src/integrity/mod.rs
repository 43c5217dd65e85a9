//! # Checksum Engine & Integrity Metadata
//!
//! Tamper *evidence* for save blobs, not tamper proof. The digest is a
//! non-cryptographic rolling hash: it reliably catches corruption and naive
//! field edits, and is trivially forgeable by anyone willing to recompute
//! it — which is every process that can read the save. Real enforcement
//! would need a trust anchor outside the client; until one exists, this
//! module is detection and telemetry.
//!
//! The digest is computed over a canonical encoding with a fixed, explicit
//! field order, so it does not depend on how the in-memory value happened
//! to be built or serialized.

use dungeonheart_shared::player::PlayerState;
use dungeonheart_shared::save::{IntegrityMetadata, SaveBlob};

use crate::anti_cheat::{CheatWarning, WarningCategory};
use crate::config::SecurityConfig;
use crate::validation::RANGES;

/// Outcome of verifying a blob's integrity envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetadataStatus {
    /// No envelope present. Legal for legacy saves.
    Missing,
    /// Stored digest does not match the recomputed one.
    ChecksumMismatch {
        /// Digest found in the envelope.
        stored: String,
        /// Digest recomputed from the player data.
        computed: String,
    },
    /// Envelope checks out; may still carry advisory findings.
    Valid {
        /// Advisory findings (e.g. implausible timestamp).
        warnings: Vec<CheatWarning>,
    },
}

/// Renders a player state into the canonical checksum encoding.
///
/// Key/value pairs in the declared [`RANGES`] order, then the name, then
/// inventory stacks in collection order. Every digest-relevant byte flows
/// through here; change this format and every stamped save in the wild
/// stops verifying.
#[must_use]
pub fn canonical_encoding(player: &PlayerState) -> String {
    let mut out = String::with_capacity(256);
    for (field, _) in RANGES {
        out.push_str(field.as_str());
        out.push('=');
        out.push_str(&field.value_of(player).to_string());
        out.push(';');
    }
    out.push_str("name=");
    out.push_str(&player.name);
    out.push_str(";inventory=[");
    for (i, item) in player.inventory.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&item.name);
        out.push(':');
        out.push_str(&item.quantity.to_string());
        out.push(':');
        out.push_str(item.rarity.as_str());
    }
    out.push(']');
    out
}

/// Computes the rolling digest of a player state.
///
/// `h = h * 31 + byte` over the canonical encoding, in a wrapping signed
/// 32-bit accumulator, rendered base-36. Collisions exist; tamper
/// divergence is probabilistic, not guaranteed.
#[must_use]
pub fn checksum(player: &PlayerState) -> String {
    let mut hash: i32 = 0;
    for byte in canonical_encoding(player).bytes() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(byte));
    }
    to_base36(hash)
}

/// Recomputes the digest and compares by equality.
#[must_use]
pub fn verify_checksum(player: &PlayerState, expected: &str) -> bool {
    checksum(player) == expected
}

/// Stamps a `{timestamp, version, checksum}` envelope onto a blob.
///
/// `version` records the player level at stamp time, which both versions
/// the save coarsely and feeds the rate-of-leveling auditor on the next
/// load.
pub fn attach_metadata(blob: &mut SaveBlob, now_ms: i64) {
    blob.integrity = Some(IntegrityMetadata {
        timestamp_ms: now_ms,
        version: blob.player.level,
        checksum: checksum(&blob.player),
    });
}

/// Verifies a blob's envelope.
///
/// Never fails hard by itself: the session layer decides what a
/// [`MetadataStatus::Missing`] or [`MetadataStatus::ChecksumMismatch`]
/// means under the configured [`ChecksumPolicy`]. A timestamp outside the
/// configured window of `now` is only ever an advisory warning.
///
/// [`ChecksumPolicy`]: crate::config::ChecksumPolicy
#[must_use]
pub fn verify_metadata(blob: &SaveBlob, config: &SecurityConfig, now_ms: i64) -> MetadataStatus {
    let Some(metadata) = &blob.integrity else {
        return MetadataStatus::Missing;
    };

    let computed = checksum(&blob.player);
    if computed != metadata.checksum {
        return MetadataStatus::ChecksumMismatch {
            stored: metadata.checksum.clone(),
            computed,
        };
    }

    let mut warnings = Vec::new();
    let drift = (now_ms - metadata.timestamp_ms).abs();
    if drift > config.timestamp_window_ms {
        warnings.push(CheatWarning::new(
            WarningCategory::Metadata,
            format!(
                "suspicious save timestamp: {} ({}ms from now)",
                metadata.timestamp_ms, drift
            ),
        ));
    }
    MetadataStatus::Valid { warnings }
}

/// Renders a signed 32-bit value in base-36, lowercase, `-` prefix for
/// negatives (compatible with the digests legacy saves carry).
fn to_base36(value: i32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut magnitude = u64::from(value.unsigned_abs());
    let mut buf = [0_u8; 8];
    let mut used = 0;
    while magnitude > 0 {
        buf[used] = DIGITS[(magnitude % 36) as usize];
        used += 1;
        magnitude /= 36;
    }
    let mut out = String::with_capacity(used + 1);
    if value < 0 {
        out.push('-');
    }
    for i in (0..used).rev() {
        out.push(char::from(buf[i]));
    }
    out
}
