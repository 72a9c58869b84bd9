use crate::lyrics::{LyricsCache, DEMO_LYRICS};
use crate::playlist::Track;

/// One row of the lyrics panel
#[derive(Debug, Clone, PartialEq)]
pub struct LyricRow {
    pub index: usize,
    pub time_secs: f64,
    pub text: String,
    pub active: bool,
}

/// What the lyrics panel should show right now
#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    Hidden,
    NoTrack,
    Editing { raw: String },
    /// A track is loaded but there is no text
    Empty,
    Lines { rows: Vec<LyricRow> },
}

impl PanelView {
    pub fn active_row(&self) -> Option<&LyricRow> {
        match self {
            PanelView::Lines { rows } => rows.iter().find(|r| r.active),
            _ => None,
        }
    }
}

/// Lyrics panel state: the raw text being shown or edited for the current
/// track, plus the panel toggles.
#[derive(Debug, Clone)]
pub struct LyricsPanel {
    raw: String,
    editing: bool,
    visible: bool,
    track: Option<Track>,
    demo_lyrics: bool,
}

impl LyricsPanel {
    pub fn new(visible: bool, demo_lyrics: bool) -> Self {
        Self {
            raw: String::new(),
            editing: false,
            visible,
            track: None,
            demo_lyrics,
        }
    }

    /// Switch to `track`. Lyrics already present are kept; an empty panel
    /// gets the demo text when that is enabled.
    pub fn set_track(&mut self, track: Option<Track>) {
        if track.is_some() && self.raw.is_empty() && self.demo_lyrics {
            self.raw = DEMO_LYRICS.to_string();
        }
        self.track = track;
    }

    pub fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    pub fn set_lyrics(&mut self, raw: impl Into<String>) {
        self.raw = raw.into();
    }

    pub fn lyrics(&self) -> &str {
        &self.raw
    }

    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn view(&self, cache: &mut LyricsCache, position_secs: f64) -> PanelView {
        if !self.visible {
            return PanelView::Hidden;
        }
        if self.track.is_none() {
            return PanelView::NoTrack;
        }
        if self.editing {
            return PanelView::Editing {
                raw: self.raw.clone(),
            };
        }

        let timeline = cache.get_or_parse(&self.raw);
        if timeline.is_empty() {
            return PanelView::Empty;
        }

        let active = timeline.active_index(position_secs);
        let rows = timeline
            .lines
            .iter()
            .enumerate()
            .map(|(index, line)| LyricRow {
                index,
                time_secs: line.time_secs,
                text: line.text.clone(),
                active: Some(index) == active,
            })
            .collect();
        PanelView::Lines { rows }
    }
}

impl Default for LyricsPanel {
    fn default() -> Self {
        Self::new(false, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> Track {
        Track {
            id: "track-0".to_string(),
            title: "song".to_string(),
            artist: "someone".to_string(),
            duration_secs: 200.0,
        }
    }

    #[test]
    fn demo_lyrics_fill_empty_panel_only() {
        let mut panel = LyricsPanel::new(true, true);
        panel.set_track(None);
        assert!(panel.lyrics().is_empty());

        panel.set_track(Some(track()));
        assert_eq!(panel.lyrics(), DEMO_LYRICS);

        panel.set_lyrics("[00:01] mine");
        panel.set_track(Some(track()));
        assert_eq!(panel.lyrics(), "[00:01] mine");
    }

    #[test]
    fn demo_lyrics_can_be_disabled() {
        let mut panel = LyricsPanel::new(true, false);
        panel.set_track(Some(track()));
        assert_eq!(panel.view(&mut LyricsCache::default(), 0.0), PanelView::Empty);
    }

    #[test]
    fn view_follows_panel_state() {
        let mut cache = LyricsCache::default();
        let mut panel = LyricsPanel::new(false, false);
        assert_eq!(panel.view(&mut cache, 0.0), PanelView::Hidden);

        panel.toggle_visible();
        assert_eq!(panel.view(&mut cache, 0.0), PanelView::NoTrack);

        panel.set_track(Some(track()));
        panel.set_lyrics("[00:00] a\n[00:15] b");
        panel.toggle_editing();
        assert_eq!(
            panel.view(&mut cache, 0.0),
            PanelView::Editing {
                raw: "[00:00] a\n[00:15] b".to_string()
            }
        );

        panel.toggle_editing();
        let view = panel.view(&mut cache, 16.0);
        let active = view.active_row().expect("active row");
        assert_eq!(active.index, 1);
        assert_eq!(active.text, "b");
    }

    #[test]
    fn view_has_no_active_row_before_first_line() {
        let mut cache = LyricsCache::default();
        let mut panel = LyricsPanel::new(true, false);
        panel.set_track(Some(track()));
        panel.set_lyrics("[00:10] late");
        let view = panel.view(&mut cache, 3.0);
        assert!(matches!(view, PanelView::Lines { ref rows } if rows.len() == 1));
        assert!(view.active_row().is_none());
    }
}
