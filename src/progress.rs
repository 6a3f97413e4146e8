//! Rotating status captions shown while a portrait is being processed.

use std::convert::Infallible;
use std::time::Duration;

pub const LOADING_MESSAGES: [&str; 6] = [
    "Analyzing facial structure...",
    "Calculating optimal square crop...",
    "Generating high-resolution background...",
    "Outpainting seamless details...",
    "Finalizing AI magic...",
    "Enhancing portrait quality...",
];

pub const MESSAGE_INTERVAL: Duration = Duration::from_millis(2500);

/// Caption for the `tick`-th interval, wrapping around.
pub fn loading_message(tick: usize) -> &'static str {
    LOADING_MESSAGES[tick % LOADING_MESSAGES.len()]
}

/// Logs a caption every `period` until dropped.
///
/// Meant to be raced against the submission with `tokio::select!`.
pub async fn announce(period: Duration) -> Infallible {
    let mut interval = tokio::time::interval(period);
    let mut tick = 0usize;
    loop {
        interval.tick().await;
        tracing::info!("{}", loading_message(tick));
        tick = tick.wrapping_add(1);
    }
}
