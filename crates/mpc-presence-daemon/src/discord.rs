//! Discord Rich Presence integration.
//!
//! Runs a `DiscordIpcClient` on a dedicated OS thread (IPC is blocking)
//! and exposes a non-blocking `DiscordHandle` via an MPSC channel.
//! Connects lazily on the first update and reconnects after failures, so
//! Discord can come and go without affecting the poll loop.

use std::sync::mpsc;

use discord_rich_presence::{activity, DiscordIpc, DiscordIpcClient};
use mpc_presence_core::engine::PresenceSink;
use mpc_presence_core::presence::PresencePayload;

/// Discord Application ID for mpc-presence.
///
/// Not a secret; it selects the application name and artwork assets shown
/// in the activity card.
const APP_ID: &str = "1461687438417072159";

/// Commands sent to the Discord actor thread.
enum DiscordCommand {
    Update(PresencePayload),
    Shutdown,
}

/// Handle to the Discord actor thread.
pub struct DiscordHandle {
    tx: mpsc::Sender<DiscordCommand>,
    thread: std::thread::JoinHandle<()>,
}

impl DiscordHandle {
    /// Spawn the Discord actor thread and return a handle.
    pub fn start() -> Self {
        let (tx, rx) = mpsc::channel();

        let thread = std::thread::Builder::new()
            .name("discord-rpc".into())
            .spawn(move || actor_loop(rx))
            .expect("failed to spawn discord-rpc thread");

        Self { tx, thread }
    }

    /// Clear the presence, close the IPC connection, and wait for the
    /// actor to finish.
    pub fn shutdown(self) {
        let _ = self.tx.send(DiscordCommand::Shutdown);
        let _ = self.thread.join();
    }
}

impl PresenceSink for DiscordHandle {
    /// Hand a payload to the actor thread; never blocks the poll loop.
    fn publish(&self, payload: PresencePayload) {
        let _ = self.tx.send(DiscordCommand::Update(payload));
    }
}

/// The actor loop: owns the IPC client and processes commands.
fn actor_loop(rx: mpsc::Receiver<DiscordCommand>) {
    let mut client: Option<DiscordIpcClient> = None;
    let mut connected = false;

    for cmd in rx {
        match cmd {
            DiscordCommand::Update(payload) => {
                // Lazy-connect on first update.
                if client.is_none() {
                    client = Some(DiscordIpcClient::new(APP_ID));
                }

                let ipc = client.as_mut().unwrap();

                if !connected {
                    match ipc.connect() {
                        Ok(()) => {
                            connected = true;
                            tracing::info!("Connected to Discord IPC");
                        }
                        Err(e) => {
                            tracing::debug!(error = %e, "Discord not available");
                            continue;
                        }
                    }
                }

                if let Err(e) = ipc.set_activity(build_activity(&payload)) {
                    tracing::debug!(error = %e, "Failed to set Discord activity");
                    // Connection probably died — reset state for reconnect.
                    connected = false;
                    client = None;
                }
            }
            DiscordCommand::Shutdown => {
                if let Some(ref mut ipc) = client {
                    if connected {
                        let _ = ipc.clear_activity();
                        let _ = ipc.close();
                    }
                }
                break;
            }
        }
    }
}

/// Convert an engine payload into the wire activity.
///
/// The engine computes Unix milliseconds; the IPC layer wants seconds.
fn build_activity(payload: &PresencePayload) -> activity::Activity<'_> {
    let assets = activity::Assets::new()
        .large_image(&payload.large_image_key)
        .large_text(&payload.large_image_text)
        .small_image(&payload.small_image_key)
        .small_text(&payload.small_image_text);

    let mut act = activity::Activity::new().assets(assets);

    if let Some(details) = payload.details.as_deref() {
        act = act.details(details);
    }
    if let Some(state) = payload.state.as_deref() {
        act = act.state(state);
    }
    if let Some(start_ms) = payload.start_timestamp {
        act = act.timestamps(activity::Timestamps::new().start(start_ms / 1000));
    }
    if let Some(end_ms) = payload.end_timestamp {
        act = act.timestamps(activity::Timestamps::new().end(end_ms / 1000));
    }

    act
}
