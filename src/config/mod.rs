use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub lyrics: LyricsConfig,
    pub player: PlayerConfig,
    pub ui: UiConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LyricsConfig {
    /// How many distinct lyrics texts keep their parsed form around
    pub cache_capacity: usize,
    /// Show sample lyrics when a track has none
    pub demo_lyrics: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Clock tick period in milliseconds
    pub tick_ms: u64,
    /// Playback rate used by `follow`
    pub speed: f64,
    /// Seconds `follow` keeps running past the last timestamp
    pub tail_secs: f64,
    /// Output volume (0.0-1.0)
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Whether the lyrics panel starts open
    pub show_lyrics: bool,
    /// Prefix printed in front of the active line
    pub active_marker: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter when RUST_LOG is unset (e.g. "warn", "synclyrics=debug")
    pub level: String,
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 16,
            demo_lyrics: true,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            tick_ms: 250,
            speed: 1.0,
            tail_secs: 5.0,
            volume: 0.7,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_lyrics: true,
            active_marker: "♪ ".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let proj = ProjectDirs::from("dev", "synclyrics", "synclyrics")
        .context("ProjectDirs unavailable")?;
    Ok(proj.config_dir().join("config.toml"))
}

fn resolve_path(override_path: Option<&Path>) -> anyhow::Result<PathBuf> {
    match override_path {
        Some(p) => Ok(p.to_path_buf()),
        None => default_config_path(),
    }
}

pub fn save(cfg: &Config, override_path: Option<&Path>) -> anyhow::Result<()> {
    let path = resolve_path(override_path)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    }
    let raw = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&path, raw).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Load the config, writing defaults first if the file does not exist yet
pub fn load(override_path: Option<&Path>) -> anyhow::Result<Config> {
    let path = resolve_path(override_path)?;

    if !path.exists() {
        let cfg = Config::default();
        save(&cfg, Some(path.as_path())).context("write default config")?;
        tracing::info!(path = %path.display(), "wrote default config");
        return Ok(cfg);
    }

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg = toml::from_str::<Config>(&raw).with_context(|| format!("parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_writes_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let cfg = load(Some(path.as_path())).expect("load");
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.lyrics.cache_capacity = 3;
        cfg.player.speed = 2.5;
        cfg.player.volume = 0.25;
        cfg.ui.active_marker = "> ".to_string();
        save(&cfg, Some(path.as_path())).expect("save");

        assert_eq!(load(Some(path.as_path())).expect("load"), cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[player]\ntick_ms = 50\n").expect("write");

        let cfg = load(Some(path.as_path())).expect("load");
        assert_eq!(cfg.player.tick_ms, 50);
        assert_eq!(cfg.player.tail_secs, PlayerConfig::default().tail_secs);
        assert_eq!(cfg.player.volume, 0.7);
        assert_eq!(cfg.lyrics, LyricsConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[player\n").expect("write");

        let err = load(Some(path.as_path())).expect_err("parse error");
        assert!(format!("{err:#}").contains("parse"));
    }
}
