//! Playback position source.
//!
//! Audio output is out of scope; the ticker drives a [`PlaybackClock`] in real
//! time and reports its position the way a media player reports `time-pos`.

pub mod clock;

pub use clock::{format_time, ClockTick, PlaybackClock};

use crate::app::events::PlayerEvent;
use std::time::Duration;
use tokio::sync::mpsc;

/// Advance `clock` every `period` and pump positions to `event_tx`.
///
/// Stops after `Ended` or once the receiver is gone.
pub async fn run_ticker(
    mut clock: PlaybackClock,
    period: Duration,
    event_tx: mpsc::Sender<PlayerEvent>,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    if let Some(duration) = clock.duration_secs()
        && event_tx.send(PlayerEvent::Duration { seconds: duration }).await.is_err()
    {
        return;
    }
    let first = if clock.is_playing() {
        PlayerEvent::Started
    } else {
        PlayerEvent::Paused
    };
    if event_tx.send(first).await.is_err() {
        return;
    }
    if event_tx
        .send(PlayerEvent::Position {
            seconds: clock.position_secs(),
        })
        .await
        .is_err()
    {
        return;
    }

    // The first interval tick completes immediately.
    interval.tick().await;
    let mut last = tokio::time::Instant::now();

    loop {
        interval.tick().await;
        let now = tokio::time::Instant::now();
        let elapsed = now.duration_since(last);
        last = now;

        let ended = match clock.tick(elapsed) {
            ClockTick::Idle => {
                if event_tx.is_closed() {
                    return;
                }
                continue;
            }
            ClockTick::Position(_) => false,
            ClockTick::Ended => true,
        };

        let position = PlayerEvent::Position {
            seconds: clock.position_secs(),
        };
        if event_tx.send(position).await.is_err() {
            tracing::debug!("player event receiver dropped");
            return;
        }
        if ended {
            let _ = event_tx.send(PlayerEvent::Ended).await;
            return;
        }
    }
}
