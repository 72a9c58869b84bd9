use crate::playlist::NewTrack;

#[derive(Debug, Clone)]
pub enum Action {
    // Playlist
    AddTracks(Vec<NewTrack>),
    Select(String),
    Remove(String),

    // Transport
    PlayPause,
    Next,
    Previous,
    Seek(f64),
    SetVolume(f64),

    // Lyrics panel
    ToggleLyrics,
    ToggleEditing,
    SetLyrics(String),
}
