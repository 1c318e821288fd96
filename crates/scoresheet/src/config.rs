//! Configuration management for vbr-scoresheet.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use chrono::{FixedOffset, Offset, Utc};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::game::Color;
use crate::scoresheet::{
    Labels, Palette, RenderSettings, DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT,
};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "vbr-scoresheet";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "scoresheet.db";

/// Environment variable prefix.
const ENV_PREFIX: &str = "VBR_SCORESHEET_";

/// Largest accepted UTC offset, exclusive.
const MAX_OFFSET_MINUTES: i32 = 24 * 60;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `VBR_SCORESHEET_`, sections
///    separated by `__`, e.g. `VBR_SCORESHEET_RENDER__OUTPUT_DIR`)
/// 2. TOML config file at `~/.config/vbr-scoresheet/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Printed strings.
    pub labels: Labels,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the licence and signature database.
    /// Defaults to `~/.local/share/vbr-scoresheet/scoresheet.db`
    pub database_path: Option<PathBuf>,
}

/// Rendering-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Directory rendered sheets are written to.
    /// Defaults to the current directory.
    pub output_dir: Option<PathBuf>,
    /// Offset from UTC applied to printed dates and times, in minutes.
    pub utc_offset_minutes: i32,
    /// chrono pattern for the match date.
    pub date_format: String,
    /// chrono pattern for start and end times.
    pub time_format: String,
    /// Card background.
    pub background_color: Color,
    /// Text and border color.
    pub on_background_color: Color,
    /// Guest color when both teams share a color.
    pub duplicate_color: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let palette = Palette::default();
        Self {
            output_dir: None,
            utc_offset_minutes: 0,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            background_color: palette.background,
            on_background_color: palette.on_background,
            duplicate_color: palette.duplicate,
        }
    }
}

/// Check that a chrono pattern has no unknown specifiers.
fn validate_format(name: &str, pattern: &str) -> Result<()> {
    if pattern.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: format!("{name} cannot be empty"),
        });
    }
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(Error::ConfigValidation {
            message: format!("invalid {name}: {pattern}"),
        });
    }
    Ok(())
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `VBR_SCORESHEET_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let offset = self.render.utc_offset_minutes;
        if offset.abs() >= MAX_OFFSET_MINUTES {
            return Err(Error::ConfigValidation {
                message: format!(
                    "utc_offset_minutes ({offset}) must be within ±{}",
                    MAX_OFFSET_MINUTES - 1
                ),
            });
        }

        validate_format("date_format", &self.render.date_format)?;
        validate_format("time_format", &self.render.time_format)?;

        if let Some(label) = self.labels.first_blank() {
            return Err(Error::ConfigValidation {
                message: format!("label '{label}' cannot be empty"),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the output directory, resolving defaults if not set.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.render
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// The configured UTC offset, falling back to UTC when out of range.
    #[must_use]
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.render.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }

    /// Presentation settings for the renderer.
    #[must_use]
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            labels: self.labels.clone(),
            palette: Palette {
                background: self.render.background_color,
                on_background: self.render.on_background_color,
                duplicate: self.render.duplicate_color,
            },
            utc_offset: self.utc_offset(),
            date_format: self.render.date_format.clone(),
            time_format: self.render.time_format.clone(),
        }
    }
}
