//! Time-synchronized lyrics for a local music player.
//!
//! The core is [`lyrics::LyricsTimeline`]: parse `[MM:SS] text` lines and
//! find the line that is current for a playback position. The playlist,
//! playback clock and lyrics panel around it are plain state that a front
//! end drives.

pub mod app;
pub mod config;
pub mod lyrics;
pub mod player;
pub mod playlist;
