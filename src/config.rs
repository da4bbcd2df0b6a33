//! Runtime configuration, read from a JSON file.
//!
//! Looks at `$FIREFIGHTER_CONFIG` first, then
//! `<config_dir>/firefighter/config.json`.  Every field is optional; a
//! missing or broken file means defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

pub const CONFIG_ENV: &str = "FIREFIGHTER_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Logical world size.  The renderer scales it to the terminal.
    pub screen_width: f64,
    pub screen_height: f64,
    /// Frame duration in milliseconds.
    pub frame_millis: u64,
    /// Fixed RNG seed for reproducible runs (None = seeded from entropy)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            frame_millis: 33,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> io::Result<Self> {
        let config: GameConfig = serde_json::from_str(json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> io::Result<()> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(self.screen_width) || !valid(self.screen_height) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "screen size must be positive, got {}x{}",
                    self.screen_width, self.screen_height
                ),
            ));
        }
        if self.frame_millis == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "frame_millis must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn load_from(path: &Path) -> io::Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Load the configuration, falling back to defaults on any problem.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            warn!("Could not determine config directory, using defaults");
            return Self::default();
        };
        if !path.exists() {
            info!("No config file at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Ignoring config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}

/// Where the configuration file is expected to live.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("firefighter").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = GameConfig::from_json("{}").expect("empty object should parse");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = GameConfig::from_json(r#"{ "screen_width": 1024, "seed": 7 }"#)
            .expect("partial config should parse");
        assert_eq!(config.screen_width, 1024.0);
        assert_eq!(config.screen_height, 600.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.frame_millis, 33);
    }

    #[test]
    fn test_rejects_non_positive_size() {
        let err = GameConfig::from_json(r#"{ "screen_height": 0 }"#).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_rejects_zero_frame_time() {
        let err = GameConfig::from_json(r#"{ "frame_millis": 0 }"#).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_malformed_json_is_invalid_data() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_load_from_missing_file_is_not_found() {
        let err = GameConfig::load_from(Path::new("/nonexistent/firefighter/config.json"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "firefighter_config_test_{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "frame_millis": 50, "screen_height": 480.5 }"#)
            .expect("write temp config");
        let config = GameConfig::load_from(&path).expect("load temp config");
        let _ = fs::remove_file(&path);
        assert_eq!(config.frame_millis, 50);
        assert_eq!(config.screen_height, 480.5);
    }
}
