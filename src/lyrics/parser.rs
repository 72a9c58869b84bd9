//! Timestamped lyrics parser
//!
//! Parses lyrics where a line may start with a timestamp tag:
//! [MM:SS] Lyrics line here
//!
//! Example:
//! [00:15] Hello world
//! [00:22] Another line
//!
//! Every source line yields exactly one entry, in source order. Lines without
//! a tag are kept as-is at offset 0.

use serde::{Deserialize, Serialize};

/// A single line of lyrics with the offset it becomes active at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    /// Offset in seconds from the start of the track
    pub time_secs: f64,
    /// The lyrics text, empty for blank separator lines
    pub text: String,
}

impl LyricLine {
    pub fn new(time_secs: f64, text: impl Into<String>) -> Self {
        Self {
            time_secs,
            text: text.into(),
        }
    }
}

/// Lyrics split into lines, in the order they appeared in the source text
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LyricsTimeline {
    pub lines: Vec<LyricLine>,
}

impl LyricsTimeline {
    /// Parse raw lyrics text. Never fails; malformed tags degrade to plain lines.
    pub fn parse(content: &str) -> Self {
        if content.is_empty() {
            return Self::default();
        }

        let lines = content
            .split('\n')
            .map(|segment| {
                let segment = segment.strip_suffix('\r').unwrap_or(segment);
                Self::parse_line(segment)
            })
            .collect();

        Self { lines }
    }

    /// Index of the line that is current at `position_secs`, if any
    pub fn active_index(&self, position_secs: f64) -> Option<usize> {
        resolve_active_index(&self.lines, position_secs)
    }

    pub fn active_line(&self, position_secs: f64) -> Option<&LyricLine> {
        self.active_index(position_secs).and_then(|i| self.lines.get(i))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn parse_line(segment: &str) -> LyricLine {
        match Self::parse_tag(segment) {
            Some((time_secs, rest)) => LyricLine::new(time_secs, rest.trim_start()),
            None => LyricLine::new(0.0, segment),
        }
    }

    /// Parse a leading tag like [01:07] into seconds plus the remaining text
    fn parse_tag(segment: &str) -> Option<(f64, &str)> {
        let tag = segment.get(..7)?.as_bytes();
        if tag[0] != b'[' || tag[3] != b':' || tag[6] != b']' {
            return None;
        }

        let minutes = Self::two_digits(tag[1], tag[2])?;
        // Seconds are not range checked: [01:75] is 60 + 75
        let seconds = Self::two_digits(tag[4], tag[5])?;

        Some((f64::from(minutes * 60 + seconds), &segment[7..]))
    }

    fn two_digits(tens: u8, ones: u8) -> Option<u32> {
        if tens.is_ascii_digit() && ones.is_ascii_digit() {
            Some(u32::from(tens - b'0') * 10 + u32::from(ones - b'0'))
        } else {
            None
        }
    }
}

/// Find the line that is current at `position_secs`.
///
/// The scan looks for the first index `i` in source order where the position
/// has reached `lines[i]` and has not yet reached `lines[i + 1]`. It is linear
/// and never assumes sorted timestamps, so out-of-order lines keep their place.
///
/// A run of adjacent lines sharing one timestamp resolves to the first line of
/// the run; the later ones can never become active.
pub fn resolve_active_index(lines: &[LyricLine], position_secs: f64) -> Option<usize> {
    let found = lines.iter().enumerate().position(|(i, line)| {
        position_secs >= line.time_secs
            && lines
                .get(i + 1)
                .is_none_or(|next| position_secs < next.time_secs)
    })?;

    let time = lines[found].time_secs;
    let run_start = lines[..found]
        .iter()
        .rposition(|line| line.time_secs != time)
        .map_or(0, |before| before + 1);
    Some(run_start)
}
