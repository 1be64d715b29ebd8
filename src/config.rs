use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::geo::{ConvertError, UtmZone};
use crate::tour::TourSettings;
use crate::track::{FileSource, HttpSource, OnInvalidRow, TrackLoader, TrackSource};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid projection: {0}")]
    Projection(#[from] ConvertError),
    #[error("source must set exactly one of `path` or `url`")]
    AmbiguousSource,
    #[error("`{0}` must be greater than zero")]
    ZeroDuration(&'static str),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub projection: ProjectionConfig,
    #[serde(default)]
    pub tour: TourSettings,
    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Where transient KML files are written; the system temp dir if unset.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            export_dir: None,
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(
        default = "default_refresh_interval",
        deserialize_with = "deserialize_duration"
    )]
    pub refresh_interval: Duration,
    #[serde(
        default = "default_request_timeout",
        deserialize_with = "deserialize_duration"
    )]
    pub request_timeout: Duration,
    #[serde(default)]
    pub on_invalid_row: OnInvalidRow,
}

fn default_refresh_interval() -> Duration {
    Duration::from_secs(60 * 60)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectionConfig {
    #[serde(default = "default_zone")]
    pub zone: u8,
    #[serde(default = "default_band")]
    pub band: char,
}

fn default_zone() -> u8 {
    17
}

fn default_band() -> char {
    'R'
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            zone: default_zone(),
            band: default_band(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

fn default_zoom() -> u8 {
    10
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        config.zone()?;
        config.track_source()?;
        if config.source.refresh_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("refresh_interval"));
        }
        if config.source.request_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration("request_timeout"));
        }
        Ok(config)
    }

    pub fn zone(&self) -> Result<UtmZone, ConfigError> {
        Ok(UtmZone::new(self.projection.zone, self.projection.band)?)
    }

    pub fn loader(&self) -> Result<TrackLoader, ConfigError> {
        Ok(TrackLoader::new(self.zone()?, self.source.on_invalid_row))
    }

    pub fn track_source(&self) -> Result<Arc<dyn TrackSource>, ConfigError> {
        match (&self.source.path, &self.source.url) {
            (Some(path), None) => Ok(Arc::new(FileSource::new(path.clone()))),
            (None, Some(url)) => Ok(Arc::new(HttpSource::new(
                url.clone(),
                self.source.request_timeout,
            ))),
            _ => Err(ConfigError::AmbiguousSource),
        }
    }

    pub fn export_dir(&self) -> PathBuf {
        self.web
            .export_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}
