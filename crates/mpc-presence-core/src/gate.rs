//! Publish-or-suppress decision over consecutive playback snapshots.

use crate::playback::{PlaybackSnapshot, PlaybackState};
use crate::timecode;

/// Position drift beyond which a Playing cycle is worth announcing.
///
/// Normal playback advances by roughly one poll interval per cycle; a
/// larger jump means a seek, stall, or resume.
const DRIFT_THRESHOLD_MS: u64 = 6000;

/// Decide whether the current cycle should publish an update.
///
/// `raw_position` is the unnormalized position text of this cycle, compared
/// against the snapshot's `prev_position` baseline.
pub fn should_publish(
    snapshot: &PlaybackSnapshot,
    state: PlaybackState,
    raw_position: &str,
) -> bool {
    if snapshot.prev_state != Some(state) {
        return true;
    }
    if snapshot.filename != snapshot.last_filename {
        return true;
    }
    state == PlaybackState::Playing
        && timecode::to_millis(raw_position)
            .abs_diff(timecode::to_millis(&snapshot.prev_position))
            > DRIFT_THRESHOLD_MS
}

/// Record a published update: every hysteresis baseline advances.
pub fn commit_published(
    snapshot: &mut PlaybackSnapshot,
    state: PlaybackState,
    raw_position: &str,
) {
    snapshot.prev_state = Some(state);
    snapshot.prev_position = raw_position.to_string();
    snapshot.last_filename = snapshot.filename.clone();
}

/// Record a suppressed cycle: only the position baseline advances.
pub fn commit_suppressed(snapshot: &mut PlaybackSnapshot, raw_position: &str) {
    snapshot.prev_position = raw_position.to_string();
}
