//! Settings management
//!
//! Settings persist as pretty-printed JSON. Missing fields take their
//! defaults, so older files keep loading as new options appear.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use wj_core::AppConfig;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: AppConfig,
    pub graphics: GraphicsSettings,
    pub audio: AudioSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsSettings {
    pub resolution_width: u32,
    pub resolution_height: u32,
    pub fullscreen: bool,
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            resolution_width: 1280,
            resolution_height: 720,
            fullscreen: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Multiplier applied to every emitter volume, 0.0 to 1.0
    pub master_volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self { master_volume: 1.0 }
    }
}

/// Read settings from `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// Write `settings` to `path`, creating parent directories as needed.
pub fn save(path: impl AsRef<Path>, settings: &Settings) -> Result<(), SettingsError> {
    let path = path.as_ref();
    let io_error = |source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    let text = serde_json::to_string_pretty(settings).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, text).map_err(io_error)?;
    tracing::debug!(path = %path.display(), "saved settings");
    Ok(())
}

/// Like [`load`], but a missing file yields defaults.
///
/// A file that exists but cannot be read or parsed is still an error.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
    let path = path.as_ref();
    match load(path) {
        Err(SettingsError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "settings file not found; using defaults");
            Ok(Settings::default())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wj_core::{FailurePolicy, RunMode};

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.app = AppConfig::default()
            .with_title("test")
            .with_run_mode(RunMode::Interactive { max_passes: Some(3) })
            .with_failure_policy(FailurePolicy::FailFast);
        settings.audio.master_volume = 0.25;

        save(&path, &settings).unwrap();
        assert_eq!(load(&path).unwrap(), settings);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_or_default(dir.path().join("absent.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(matches!(load(dir.path().join("absent.json")), Err(SettingsError::Io { .. })));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_or_default(&path), Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "graphics": { "fullscreen": true } }"#).unwrap();

        let settings = load(&path).unwrap();
        assert!(settings.graphics.fullscreen);
        assert_eq!(settings.graphics.resolution_width, 1280);
        assert_eq!(settings.app, AppConfig::default());
    }
}
