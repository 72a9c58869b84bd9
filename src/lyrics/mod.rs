//! Lyrics module for loading and following synchronized lyrics
//!
//! This module provides:
//! - A parser for `[MM:SS]` timestamped lyrics
//! - Active line lookup for a playback position
//! - A parse cache keyed on the raw text

pub mod cache;
pub mod parser;

pub use cache::LyricsCache;
pub use parser::{resolve_active_index, LyricLine, LyricsTimeline};

use anyhow::Context;
use std::io::Read;
use std::path::Path;

/// Sample lyrics shown when a track is selected and nothing was entered yet
pub const DEMO_LYRICS: &str = "\
[00:15] Somewhere far away a melody is playing
[00:22] Calling me to follow where it goes
[00:30] In a world that hums in quiet harmony
[00:37] I will find the road that leads me home

[00:45] Let the wind keep singing about freedom
[00:52] Carrying the heavy days away
[01:00] In this song and in the open country
[01:07] I will find a calm place where to stay

[01:15] Chorus:
[01:18] Fly away, my music
[01:22] Over mountains, over seas
[01:26] Carry every word I'm singing
[01:30] To the one who waits for me

[01:45] Every note is like a drop of rain
[01:52] Washing over everything I keep
[02:00] And the melody is leading me
[02:07] Toward the things I love the most";

/// Read raw lyrics from a file, or from stdin when the path is `-`
pub fn read_lyrics(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("read lyrics from stdin")?;
        tracing::debug!(bytes = raw.len(), "loaded lyrics from stdin");
        return Ok(raw);
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read lyrics {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = raw.len(), "loaded lyrics");
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_lyrics_parse_into_stanzas() {
        let timeline = LyricsTimeline::parse(DEMO_LYRICS);
        assert_eq!(timeline.len(), 20);
        assert_eq!(timeline.lines[0].time_secs, 15.0);
        assert_eq!(timeline.lines[4].text, "");
        assert_eq!(timeline.active_line(61.0).map(|l| l.time_secs), Some(60.0));
    }

    #[test]
    fn read_lyrics_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.lrc");
        let err = read_lyrics(&missing).expect_err("missing file");
        assert!(format!("{err:#}").contains("nope.lrc"));
    }

    #[test]
    fn read_lyrics_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("song.lrc");
        std::fs::write(&path, "[00:01] hi\n").expect("write");
        assert_eq!(read_lyrics(&path).expect("read"), "[00:01] hi\n");
    }
}
