//! Status polling loop against the player's web interface.
//!
//! One tick = one fetch-parse-decide-publish cycle. The loop awaits the
//! fetch and runs the engine synchronously before the next tick, so cycles
//! never overlap and the snapshot needs no synchronization.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use mpc_presence_core::config::AppConfig;
use mpc_presence_core::engine::{Engine, PresenceSink};
use mpc_presence_core::playback::PlaybackSnapshot;
use tracing::debug;

/// Suffix the player appends to its product name in the `Server` header.
const SERVER_SUFFIX: &str = " WebServer";

/// Product name assumed when the player sends no `Server` header.
const DEFAULT_PRODUCT: &str = "MPC";

/// Per-request timeout; the web interface is local and answers fast.
const HTTP_TIMEOUT: Duration = Duration::from_secs(2);

/// Run the fetch-and-process loop until cancelled.
pub async fn run(config: &AppConfig, sink: &dyn PresenceSink) {
    let url = format!("http://127.0.0.1:{}/variables.html", config.player.port);
    let http = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .expect("reqwest client builds with static options");

    let engine = Engine::new(config.presentation);
    let mut snapshot = PlaybackSnapshot::default();
    let mut ticker = tokio::time::interval(Duration::from_secs(config.player.poll_interval));

    loop {
        ticker.tick().await;
        match fetch_status(&http, &url).await {
            Ok((document, product)) => {
                engine.process(&document, &product, &mut snapshot, sink, unix_millis());
            }
            Err(e) => {
                // Player closed or web interface disabled; retry next tick.
                debug!(error = %e, "Player web interface not reachable");
            }
        }
    }
}

/// Fetch the status document and derive the product name from the
/// `Server` response header.
async fn fetch_status(
    http: &reqwest::Client,
    url: &str,
) -> Result<(String, String), reqwest::Error> {
    let resp = http.get(url).send().await?.error_for_status()?;
    let product = product_name(
        resp.headers()
            .get("server")
            .and_then(|value| value.to_str().ok()),
    );
    let document = resp.text().await?;
    Ok((document, product))
}

/// "MPC-HC WebServer" identifies itself per fork; strip the common suffix.
fn product_name(header: Option<&str>) -> String {
    header
        .map(|value| value.trim_end_matches(SERVER_SUFFIX).to_string())
        .unwrap_or_else(|| DEFAULT_PRODUCT.to_string())
}

fn unix_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
