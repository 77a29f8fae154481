//! Playback state table and the cross-cycle snapshot.

/// The four playback states the web interface can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idling,
    Stopped,
    Paused,
    Playing,
}

impl PlaybackState {
    /// Map the web interface state code to a variant.
    ///
    /// Any other code is unrecognized; the cycle must produce no output and
    /// leave the snapshot untouched.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "-1" => Some(Self::Idling),
            "0" => Some(Self::Stopped),
            "1" => Some(Self::Paused),
            "2" => Some(Self::Playing),
            _ => None,
        }
    }

    /// Human-readable label shown in the presence card.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idling => "Idling",
            Self::Stopped => "Stopped",
            Self::Paused => "Paused",
            Self::Playing => "Playing",
        }
    }

    /// Small-image asset key for this state.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Idling | Self::Stopped => "stop_small",
            Self::Paused => "pause_small",
            Self::Playing => "play_small",
        }
    }
}

/// What we last knew and last announced.
///
/// Owned by whoever drives the poll loop and passed into the engine by
/// mutable reference each cycle. The asymmetry between `prev_position`
/// (advances every processed cycle) and `prev_state`/`last_filename`
/// (advance only on publish) is what keeps steady playback from producing
/// an update on every poll.
#[derive(Debug, Clone, Default)]
pub struct PlaybackSnapshot {
    /// Presented title, post-transform and length-capped.
    pub filename: String,
    /// Display position, zero-value hour segment stripped.
    pub position: String,
    /// Display duration, zero-value hour segment stripped.
    pub duration: String,
    /// State as of the current cycle.
    pub state: Option<PlaybackState>,
    /// State as of the last published update.
    pub prev_state: Option<PlaybackState>,
    /// Raw position text as of the last processed cycle.
    pub prev_position: String,
    /// Presented title as of the last published update.
    pub last_filename: String,
}
