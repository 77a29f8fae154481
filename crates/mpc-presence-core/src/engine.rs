//! One poll cycle: extract, present, compose, gate.

use tracing::{debug, info};

use crate::config::PresentationConfig;
use crate::gate;
use crate::playback::{PlaybackSnapshot, PlaybackState};
use crate::presence::{self, PresencePayload};
use crate::status::StatusExtractor;
use crate::timecode;
use crate::title;

/// Sink for published presence updates.
///
/// Publishing is fire-and-forget: the sink must not block the poll loop,
/// and a failed publish surfaces through the sink's own logging only.
pub trait PresenceSink {
    fn publish(&self, payload: PresencePayload);
}

/// What a processed cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The presentation changed enough to announce.
    Published { state: PlaybackState },
    /// Nothing announcement-worthy; the position baseline advanced.
    Suppressed,
    /// The document carried an unknown state code; the snapshot was not
    /// touched.
    UnrecognizedState { code: String },
}

/// The presence derivation engine.
///
/// Holds the compiled extractor and the presentation toggles; the snapshot
/// stays with the caller and is passed in by mutable reference, so cycles
/// must not overlap.
pub struct Engine {
    extractor: StatusExtractor,
    options: PresentationConfig,
}

impl Engine {
    pub fn new(options: PresentationConfig) -> Self {
        Self {
            extractor: StatusExtractor::new(),
            options,
        }
    }

    /// Process one status document against the snapshot.
    ///
    /// `product` is the player's declared product name (fork identifier),
    /// `now_ms` the current Unix time in milliseconds.
    pub fn process(
        &self,
        document: &str,
        product: &str,
        snapshot: &mut PlaybackSnapshot,
        sink: &dyn PresenceSink,
        now_ms: i64,
    ) -> CycleOutcome {
        let raw = self.extractor.extract(document);

        let state = match PlaybackState::from_code(&raw.state_code) {
            Some(state) => state,
            None => {
                debug!(code = %raw.state_code, "Unrecognized state code, skipping cycle");
                return CycleOutcome::UnrecognizedState {
                    code: raw.state_code,
                };
            }
        };

        snapshot.state = Some(state);
        snapshot.duration = timecode::display(&raw.duration).to_string();
        snapshot.position = timecode::display(&raw.position).to_string();
        snapshot.filename = title::present(&raw.filepath, &self.options);

        if !gate::should_publish(snapshot, state, &raw.position) {
            gate::commit_suppressed(snapshot, &raw.position);
            return CycleOutcome::Suppressed;
        }

        let payload = presence::compose(
            snapshot,
            state,
            &raw.duration,
            &raw.position,
            product,
            now_ms,
            self.options.show_remaining_time,
        );
        sink.publish(payload);
        info!(
            "UPDATE: {} - {}/{} - {}",
            state.label(),
            snapshot.position,
            snapshot.duration,
            snapshot.filename
        );
        gate::commit_published(snapshot, state, &raw.position);

        CycleOutcome::Published { state }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        published: Mutex<Vec<PresencePayload>>,
    }

    impl RecordingSink {
        fn count(&self) -> usize {
            self.published.lock().unwrap().len()
        }

        fn last(&self) -> PresencePayload {
            self.published.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl PresenceSink for RecordingSink {
        fn publish(&self, payload: PresencePayload) {
            self.published.lock().unwrap().push(payload);
        }
    }

    fn options() -> PresentationConfig {
        PresentationConfig {
            replace_underscores: false,
            strip_brackets: false,
            replace_dots: false,
            strip_extension: false,
            show_remaining_time: false,
        }
    }

    fn doc(filepath: &str, state: &str, duration: &str, position: &str) -> String {
        format!(
            "<html><body>\
             <p id=\"filepath\">{filepath}</p>\
             <p id=\"state\">{state}</p>\
             <p id=\"durationstring\">{duration}</p>\
             <p id=\"positionstring\">{position}</p>\
             </body></html>"
        )
    }

    #[test]
    fn first_recognized_cycle_publishes() {
        let engine = Engine::new(options());
        let sink = RecordingSink::default();
        let mut snapshot = PlaybackSnapshot::default();

        let outcome = engine.process(
            &doc(r"C:\Videos\a.mkv", "2", "00:20:00", "00:00:10"),
            "MPC-HC",
            &mut snapshot,
            &sink,
            0,
        );

        assert_eq!(
            outcome,
            CycleOutcome::Published {
                state: PlaybackState::Playing
            }
        );
        assert_eq!(sink.count(), 1);
        assert_eq!(snapshot.prev_state, Some(PlaybackState::Playing));
        assert_eq!(snapshot.prev_position, "00:00:10");
        assert_eq!(snapshot.last_filename, "a.mkv");
    }

    #[test]
    fn steady_playback_is_suppressed() {
        let engine = Engine::new(options());
        let sink = RecordingSink::default();
        let mut snapshot = PlaybackSnapshot::default();

        engine.process(
            &doc(r"C:\Videos\a.mkv", "2", "00:20:00", "00:00:10"),
            "MPC-HC",
            &mut snapshot,
            &sink,
            0,
        );
        // 3 s later: normal playback.
        let outcome = engine.process(
            &doc(r"C:\Videos\a.mkv", "2", "00:20:00", "00:00:13"),
            "MPC-HC",
            &mut snapshot,
            &sink,
            0,
        );

        assert_eq!(outcome, CycleOutcome::Suppressed);
        assert_eq!(sink.count(), 1);
        // Position baseline advanced, publish baselines untouched.
        assert_eq!(snapshot.prev_position, "00:00:13");
        assert_eq!(snapshot.prev_state, Some(PlaybackState::Playing));
        assert_eq!(snapshot.last_filename, "a.mkv");
    }

    #[test]
    fn seek_beyond_threshold_publishes() {
        let engine = Engine::new(options());
        let sink = RecordingSink::default();
        let mut snapshot = PlaybackSnapshot::default();

        engine.process(
            &doc(r"C:\Videos\a.mkv", "2", "00:20:00", "00:00:10"),
            "MPC-HC",
            &mut snapshot,
            &sink,
            0,
        );
        // 7 s jump: a seek.
        let outcome = engine.process(
            &doc(r"C:\Videos\a.mkv", "2", "00:20:00", "00:00:17"),
            "MPC-HC",
            &mut snapshot,
            &sink,
            0,
        );

        assert_eq!(
            outcome,
            CycleOutcome::Published {
                state: PlaybackState::Playing
            }
        );
        assert_eq!(sink.count(), 2);
        assert_eq!(snapshot.prev_position, "00:00:17");
    }

    #[test]
    fn pause_transition_publishes() {
        let engine = Engine::new(options());
        let sink = RecordingSink::default();
        let mut snapshot = PlaybackSnapshot::default();

        engine.process(
            &doc(r"C:\Videos\a.mkv", "2", "00:20:00", "00:04:12"),
            "MPC-HC",
            &mut snapshot,
            &sink,
            0,
        );
        engine.process(
            &doc(r"C:\Videos\a.mkv", "1", "00:20:00", "00:04:12"),
            "MPC-HC",
            &mut snapshot,
            &sink,
            0,
        );

        assert_eq!(sink.count(), 2);
        assert_eq!(sink.last().state.as_deref(), Some("04:12 / 20:00"));
        assert_eq!(sink.last().small_image_key, "pause_small");
    }

    #[test]
    fn unrecognized_state_touches_nothing() {
        let engine = Engine::new(options());
        let sink = RecordingSink::default();
        let mut snapshot = PlaybackSnapshot::default();

        let outcome = engine.process(
            &doc(r"C:\Videos\a.mkv", "9", "00:20:00", "00:00:10"),
            "MPC-HC",
            &mut snapshot,
            &sink,
            0,
        );

        assert_eq!(
            outcome,
            CycleOutcome::UnrecognizedState { code: "9".into() }
        );
        assert_eq!(sink.count(), 0);
        assert_eq!(snapshot.filename, "");
        assert_eq!(snapshot.state, None);
        assert_eq!(snapshot.prev_position, "");
    }

    #[test]
    fn idling_payload_has_no_details() {
        let engine = Engine::new(options());
        let sink = RecordingSink::default();
        let mut snapshot = PlaybackSnapshot::default();

        engine.process(&doc("", "-1", "", ""), "MPC-HC", &mut snapshot, &sink, 0);

        assert_eq!(sink.count(), 1);
        assert_eq!(sink.last().details, None);
        assert_eq!(sink.last().state.as_deref(), Some("Idling"));
    }

    #[test]
    fn remaining_time_mode_sets_end_timestamp() {
        let mut opts = options();
        opts.show_remaining_time = true;
        let engine = Engine::new(opts);
        let sink = RecordingSink::default();
        let mut snapshot = PlaybackSnapshot::default();

        engine.process(
            &doc(r"C:\Videos\a.mkv", "2", "00:20:00", "00:00:10"),
            "MPC-HC",
            &mut snapshot,
            &sink,
            1_000_000,
        );

        let payload = sink.last();
        assert_eq!(payload.start_timestamp, None);
        // 19:50 left of the 20-minute runtime.
        assert_eq!(payload.end_timestamp, Some(1_000_000 + 1_190_000));
    }

    #[test]
    fn new_file_same_state_publishes() {
        let engine = Engine::new(options());
        let sink = RecordingSink::default();
        let mut snapshot = PlaybackSnapshot::default();

        engine.process(
            &doc(r"C:\Videos\a.mkv", "2", "00:20:00", "00:00:10"),
            "MPC-HC",
            &mut snapshot,
            &sink,
            0,
        );
        let outcome = engine.process(
            &doc(r"C:\Videos\b.mkv", "2", "00:20:00", "00:00:12"),
            "MPC-HC",
            &mut snapshot,
            &sink,
            0,
        );

        assert_eq!(
            outcome,
            CycleOutcome::Published {
                state: PlaybackState::Playing
            }
        );
        assert_eq!(sink.last().details.as_deref(), Some("b.mkv"));
        assert_eq!(snapshot.last_filename, "b.mkv");
    }
}
