//! Outward-facing presence payload and its per-state composition rules.

use crate::playback::{PlaybackSnapshot, PlaybackState};
use crate::timecode;

/// Alternate player build that ships its own presence artwork.
const MPC_BE: &str = "MPC-BE";

/// One presence update, ready for the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresencePayload {
    pub details: Option<String>,
    pub state: Option<String>,
    pub large_image_key: String,
    pub large_image_text: String,
    pub small_image_key: String,
    pub small_image_text: String,
    /// Unix milliseconds; set only while playing in elapsed mode.
    pub start_timestamp: Option<i64>,
    /// Unix milliseconds; set only while playing in remaining mode.
    pub end_timestamp: Option<i64>,
}

/// Compose the payload for the given playback state.
///
/// Display strings come from the snapshot; the timestamps are computed from
/// the raw, unnormalized clock strings. At most one of the two timestamps
/// is ever set, and only while playing.
pub fn compose(
    snapshot: &PlaybackSnapshot,
    state: PlaybackState,
    raw_duration: &str,
    raw_position: &str,
    product: &str,
    now_ms: i64,
    show_remaining: bool,
) -> PresencePayload {
    let large_image_key = if product == MPC_BE { "mpcbe_logo" } else { "default" };

    let mut payload = PresencePayload {
        details: Some(snapshot.filename.clone()),
        state: None,
        large_image_key: large_image_key.to_string(),
        large_image_text: product.to_string(),
        small_image_key: state.icon().to_string(),
        small_image_text: state.label().to_string(),
        start_timestamp: None,
        end_timestamp: None,
    };

    match state {
        PlaybackState::Idling => {
            payload.details = None;
            payload.state = Some(state.label().to_string());
        }
        PlaybackState::Stopped => {}
        PlaybackState::Paused => {
            payload.state = Some(format!("{} / {}", snapshot.position, snapshot.duration));
        }
        PlaybackState::Playing => {
            payload.state = Some(format!("{} total", snapshot.duration));
            let duration_ms = timecode::to_millis(raw_duration) as i64;
            let position_ms = timecode::to_millis(raw_position) as i64;
            if show_remaining {
                payload.end_timestamp = Some(now_ms + (duration_ms - position_ms));
            } else {
                payload.start_timestamp = Some(now_ms - position_ms);
            }
        }
    }

    payload
}
