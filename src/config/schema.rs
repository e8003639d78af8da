use std::path::PathBuf;

use serde::Deserialize;

use crate::metadata::{COVER_FILE_NAMES, COVER_SIZE, SUPPORTED_EXTENSIONS};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/lumina/config.toml` or `~/.config/lumina/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `LUMINA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub playlist: PlaylistSettings,
    pub cover: CoverSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Output volume in `0.0..=1.0`.
    pub volume: f32,
    /// How often the event loop polls the engine and input (milliseconds).
    pub poll_interval_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: 0.7,
            poll_interval_ms: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Text rendered in the header box.
    pub window_title: String,
    /// Title line shown before any track has been loaded.
    pub idle_title: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            window_title: "Lumina Music Player".to_string(),
            idle_title: "No playback".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// How far `Left` / `Right` move the seek bar (milliseconds).
    pub seek_step_ms: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { seek_step_ms: 5_000 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// File extensions accepted by "open" (case-insensitive, with or without dot).
    pub extensions: Vec<String>,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            extensions: SUPPORTED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoverSettings {
    /// Edge length of the square cover image, in pixels.
    pub size: u32,
    /// Sibling file names tried, in order, when a track has no embedded picture.
    pub file_names: Vec<String>,
}

impl Default for CoverSettings {
    fn default() -> Self {
        Self {
            size: COVER_SIZE,
            file_names: COVER_FILE_NAMES.iter().map(|n| n.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` wins when set.
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/lumina/lumina.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
