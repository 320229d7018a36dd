//! Tracker settings. Every key is optional; anything left out of the TOML
//! document keeps its default.

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_STORAGE_KEY: &str = "workouts";
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub storage: StorageConfig,
    pub map: MapConfig,
    pub form: FormConfig,
}

impl TrackerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub zoom: f64,
    pub tile_url: String,
    pub attribution: String,
    pub popup_min_width: f64,
    pub popup_max_width: f64,
    pub pan_duration_secs: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: 13.0,
            tile_url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            popup_min_width: 50.0,
            popup_max_width: 250.0,
            pan_duration_secs: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// How long the form stays out of the layout after a submission.
    pub restore_delay_ms: u32,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self { restore_delay_ms: 1000 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(TrackerConfig::from_toml_str("").unwrap(), TrackerConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = TrackerConfig::from_toml_str(
            r#"
            [storage]
            key = "my-workouts"

            [map]
            zoom = 15.0
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.key, "my-workouts");
        assert_eq!(config.map.zoom, 15.0);
        assert_eq!(config.map.popup_max_width, 250.0);
        assert_eq!(config.form.restore_delay_ms, 1000);
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(TrackerConfig::from_toml_str("[map]\nzoom = \"close\"").is_err());
    }
}
