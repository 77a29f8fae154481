pub mod config;
pub mod engine;
pub mod error;
pub mod gate;
pub mod playback;
pub mod presence;
pub mod status;
pub mod timecode;
pub mod title;

pub use engine::{CycleOutcome, Engine, PresenceSink};
pub use playback::{PlaybackSnapshot, PlaybackState};
pub use presence::PresencePayload;
