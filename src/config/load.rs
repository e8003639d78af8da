use std::env;
use std::path::{Path, PathBuf};

use ::config::{Config, ConfigError, Environment, File};

use super::schema::Settings;

/// Prefix of overriding environment variables, e.g. `LUMINA__AUDIO__VOLUME`.
const ENV_PREFIX: &str = "LUMINA";
/// Explicit config file location; wins over the XDG default.
const CONFIG_PATH_VAR: &str = "LUMINA_CONFIG_PATH";

impl Settings {
    /// Load settings from the resolved config file (if any) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(resolve_config_path().as_deref())
    }

    /// Layer `file` (optional, may be missing) under the `LUMINA__*` environment.
    ///
    /// Anything neither source sets keeps its struct default.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        let env = Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true);

        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }
        builder.add_source(env).build()?.try_deserialize()
    }

    /// Check value ranges. Every problem found is listed in the error.
    pub fn validate(&self) -> Result<(), String> {
        let mut problems = Vec::new();
        if self.cover.size == 0 {
            problems.push("cover.size must be >= 1");
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            problems.push("audio.volume must be between 0.0 and 1.0");
        }
        if self.audio.poll_interval_ms == 0 {
            problems.push("audio.poll_interval_ms must be >= 1");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join("; "))
        }
    }
}

/// `$LUMINA_CONFIG_PATH` when set, else the XDG default.
pub fn resolve_config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `$XDG_CONFIG_HOME/lumina/config.toml`, or `~/.config/lumina/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("lumina").join("config.toml"))
}

/// `$XDG_STATE_HOME/lumina/lumina.log`, or `~/.local/state/lumina/lumina.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("lumina").join("lumina.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    env::var_os(var)
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback)))
}
