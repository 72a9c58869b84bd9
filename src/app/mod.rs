pub mod actions;
pub mod events;
pub mod state;

use crate::config::Config;
use crate::lyrics::{LyricLine, LyricsCache};
use crate::player::{self, PlaybackClock};
use crate::playlist::{Playlist, Track};
use actions::Action;
use events::PlayerEvent;
use state::{LyricsPanel, PanelView};
use std::time::Duration;
use tokio::sync::mpsc;

/// Player state: playlist, transport and the lyrics panel.
///
/// Playback position is observed, not produced: it arrives as
/// [`PlayerEvent`]s from whatever is playing.
#[derive(Debug)]
pub struct App {
    playlist: Playlist,
    panel: LyricsPanel,
    cache: LyricsCache,
    playing: bool,
    position_secs: f64,
    duration_secs: f64,
    volume: f64,
}

impl App {
    pub fn new(cfg: &Config) -> Self {
        Self {
            playlist: Playlist::new(),
            panel: LyricsPanel::new(cfg.ui.show_lyrics, cfg.lyrics.demo_lyrics),
            cache: LyricsCache::new(cfg.lyrics.cache_capacity),
            playing: false,
            position_secs: 0.0,
            duration_secs: 0.0,
            volume: clamp_volume(cfg.player.volume).unwrap_or(0.7),
        }
    }

    pub fn apply(&mut self, action: Action) {
        tracing::debug!(?action, "apply");
        match action {
            Action::AddTracks(files) => {
                let had_current = self.playlist.current().is_some();
                let added = self.playlist.add_files(files);
                if !had_current && added > 0 {
                    self.sync_track();
                }
            }
            Action::Select(id) => {
                if self.playlist.select(&id) {
                    self.start_current();
                }
            }
            Action::Remove(id) => {
                let was_current = self.playlist.current().is_some_and(|t| t.id == id);
                if self.playlist.remove(&id).is_some() && was_current {
                    self.sync_track();
                }
            }
            Action::PlayPause => self.playing = !self.playing,
            Action::Next => {
                if self.playlist.next().is_some() {
                    self.start_current();
                }
            }
            Action::Previous => {
                if self.playlist.previous().is_some() {
                    self.start_current();
                }
            }
            Action::Seek(secs) => {
                let secs = if secs.is_nan() { 0.0 } else { secs.max(0.0) };
                self.position_secs = if self.duration_secs > 0.0 {
                    secs.min(self.duration_secs)
                } else {
                    secs
                };
            }
            Action::SetVolume(volume) => {
                if let Some(volume) = clamp_volume(volume) {
                    self.volume = volume;
                }
            }
            Action::ToggleLyrics => self.panel.toggle_visible(),
            Action::ToggleEditing => self.panel.toggle_editing(),
            Action::SetLyrics(raw) => self.panel.set_lyrics(raw),
        }
    }

    pub fn on_player_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::Started => self.playing = true,
            PlayerEvent::Paused => self.playing = false,
            PlayerEvent::Position { seconds } => self.position_secs = seconds,
            PlayerEvent::Duration { seconds } => self.duration_secs = seconds,
            PlayerEvent::Ended => {
                self.playing = false;
                tracing::info!(position = self.position_secs, "playback ended");
            }
        }
    }

    /// Index of the highlighted lyric line at the current position
    pub fn active_index(&mut self) -> Option<usize> {
        self.cache
            .get_or_parse(self.panel.lyrics())
            .active_index(self.position_secs)
    }

    pub fn active_line(&mut self) -> Option<LyricLine> {
        let timeline = self.cache.get_or_parse(self.panel.lyrics());
        timeline.active_line(self.position_secs).cloned()
    }

    pub fn view(&mut self) -> PanelView {
        self.panel.view(&mut self.cache, self.position_secs)
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn panel(&self) -> &LyricsPanel {
        &self.panel
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.current()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn cache(&self) -> &LyricsCache {
        &self.cache
    }

    /// A track was picked explicitly: rewind and play it
    fn start_current(&mut self) {
        self.sync_track();
        self.playing = true;
    }

    /// Current track changed underneath us: rewind and stop
    fn sync_track(&mut self) {
        let track = self.playlist.current().cloned();
        self.duration_secs = track.as_ref().map_or(0.0, |t| t.duration_secs);
        self.position_secs = 0.0;
        self.playing = false;
        self.panel.set_track(track);
    }
}

/// Volume limited to 0.0-1.0; NaN is rejected
fn clamp_volume(volume: f64) -> Option<f64> {
    (!volume.is_nan()).then(|| volume.clamp(0.0, 1.0))
}

#[derive(Debug, Clone, PartialEq)]
pub struct FollowSettings {
    pub from_secs: f64,
    pub speed: f64,
    pub tick: Duration,
}

impl FollowSettings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            from_secs: 0.0,
            speed: cfg.player.speed,
            tick: Duration::from_millis(cfg.player.tick_ms.max(1)),
        }
    }
}

/// The highlighted line moved
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveChange {
    pub position_secs: f64,
    pub index: Option<usize>,
    pub line: Option<LyricLine>,
}

/// Play the current track on a simulated clock and report every change of
/// the active lyric line to `sink`, until the track ends.
///
/// Returns how many changes were reported.
pub async fn follow<F>(app: &mut App, settings: &FollowSettings, mut sink: F) -> anyhow::Result<usize>
where
    F: FnMut(&ActiveChange) -> anyhow::Result<()>,
{
    let Some(track) = app.current_track() else {
        anyhow::bail!("no track to follow");
    };
    tracing::info!(
        track = %track.title,
        duration = track.duration_secs,
        from = settings.from_secs,
        speed = settings.speed,
        "following lyrics"
    );

    let mut clock = PlaybackClock::new();
    clock.reset(Some(track.duration_secs));
    clock.seek(settings.from_secs);
    clock.set_speed(settings.speed);
    clock.play();

    let (tx, mut rx) = mpsc::channel::<PlayerEvent>(64);
    let ticker = tokio::spawn(player::run_ticker(clock, settings.tick, tx));

    let mut reported: Option<Option<usize>> = None;
    let mut positioned = false;
    let mut changes = 0;
    while let Some(event) = rx.recv().await {
        let ended = event == PlayerEvent::Ended;
        positioned |= matches!(event, PlayerEvent::Position { .. });
        app.on_player_event(event);

        // Nothing is reported until the clock has said where playback is
        let index = app.active_index();
        if positioned && reported != Some(index) {
            reported = Some(index);
            changes += 1;
            let change = ActiveChange {
                position_secs: app.position_secs(),
                index,
                line: app.active_line(),
            };
            sink(&change)?;
        }

        if ended {
            break;
        }
    }

    drop(rx);
    if let Err(e) = ticker.await {
        tracing::warn!("ticker task failed: {e}");
    }
    Ok(changes)
}
