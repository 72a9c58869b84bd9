use serde::{Deserialize, Serialize};

pub const UNKNOWN_ARTIST: &str = "Unknown artist";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub duration_secs: f64,
}

/// A file handed to the playlist, before it gets an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrack {
    pub file_name: String,
    pub artist: Option<String>,
    pub duration_secs: f64,
}

impl NewTrack {
    pub fn new(file_name: impl Into<String>, duration_secs: f64) -> Self {
        Self {
            file_name: file_name.into(),
            artist: None,
            duration_secs,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    current_index: Option<usize>,
    next_id: u64,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append tracks in order. The first one becomes current if nothing was.
    /// Returns how many were added.
    pub fn add_files(&mut self, files: Vec<NewTrack>) -> usize {
        let first_new = self.tracks.len();
        let added = files.len();

        for file in files {
            let id = format!("track-{}", self.next_id);
            self.next_id += 1;
            self.tracks.push(Track {
                id,
                title: title_from_file_name(&file.file_name).to_string(),
                artist: file.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
                duration_secs: if file.duration_secs.is_finite() {
                    file.duration_secs.max(0.0)
                } else {
                    0.0
                },
            });
        }

        if self.current_index.is_none() && added > 0 {
            self.current_index = Some(first_new);
        }
        added
    }

    /// Make the track with `id` current
    pub fn select(&mut self, id: &str) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.current_index = Some(index);
                true
            }
            None => false,
        }
    }

    /// Remove a track by id.
    ///
    /// If it was current, the track that slides into its slot becomes current,
    /// else the one before it, else nothing.
    pub fn remove(&mut self, id: &str) -> Option<Track> {
        let index = self.index_of(id)?;
        let track = self.tracks.remove(index);

        if let Some(current) = self.current_index {
            if index < current {
                self.current_index = Some(current - 1);
            } else if index == current {
                self.current_index = if index < self.tracks.len() {
                    Some(index)
                } else {
                    index.checked_sub(1)
                };
            }
        }

        Some(track)
    }

    /// Advance with wrap-around, returns the new current track
    pub fn next(&mut self) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }
        let next_index = match self.current_index {
            Some(current) => (current + 1) % self.tracks.len(),
            None => 0,
        };
        self.current_index = Some(next_index);
        self.tracks.get(next_index)
    }

    /// Step back with wrap-around, returns the new current track
    pub fn previous(&mut self) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }
        let prev_index = match self.current_index {
            Some(current) if current > 0 => current - 1,
            _ => self.tracks.len() - 1,
        };
        self.current_index = Some(prev_index);
        self.tracks.get(prev_index)
    }

    pub fn current(&self) -> Option<&Track> {
        self.current_index.and_then(|i| self.tracks.get(i))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }
}

/// Drop the final extension: `a.b.mp3` -> `a.b`. Names without one are kept
/// whole, and so are dotfiles like `.hidden`, which would otherwise come out
/// as an empty title.
pub fn title_from_file_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => {
            let ext = &file_name[dot + 1..];
            if ext.is_empty() || ext.contains('/') {
                file_name
            } else {
                &file_name[..dot]
            }
        }
        _ => file_name,
    }
}
