//! Application configuration module
//!
//! Centralizes configuration using `confy` for automatic serialization and
//! OS-specific config directory management. Visual settings only influence
//! how the viewer presents headings; they never feed into diffing or block
//! classification.

use crate::constant::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Confy(#[from] confy::ConfyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct Config {
    pub settings: Settings,
}

impl Config {
    /// Load configuration from disk, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Settings = confy::load(APP_NAME, None)?;
        info!("Load config from {:?}", Self::config_path()?);
        Ok(Self { settings })
    }

    /// Save current configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, None, &self.settings)?;
        info!("Save config to {:?}", Self::config_path()?);
        Ok(())
    }

    /// Get the application data directory
    /// Falls back to a local "data" directory if platform dirs are unavailable
    pub fn data_dir(&self) -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME) {
            proj_dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from("data")
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, None)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load().unwrap_or_else(|_| Self {
            settings: Settings::default(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Application theme
    #[serde(default)]
    pub theme: String,

    /// AI service configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Viewer presentation settings
    #[serde(default)]
    pub visual: VisualSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            ai: AiConfig::default(),
            visual: VisualSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// API key for AI service
    #[serde(default)]
    pub api_key: String,

    /// API URL for AI service
    #[serde(default)]
    pub api_url: String,

    /// Model name for AI service
    #[serde(default)]
    pub model_name: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: "https://generativelanguage.googleapis.com/v1beta/models/".to_string(),
            model_name: "gemini-2.5-flash".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    Inter,
    Roboto,
    Merriweather,
    Jetbrains,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutVariant {
    Classic,
    Modern,
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontScale {
    Sm,
    Base,
    Lg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineHeight {
    Tight,
    Normal,
    Relaxed,
}

/// Read-only presentation hints for the rendered resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualSettings {
    pub font_family: FontFamily,
    /// Accent color for H1/H2 headings, as a hex string like "#0f766e".
    pub primary_color: String,
    pub layout: LayoutVariant,
    pub font_scale: FontScale,
    pub line_height: LineHeight,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            font_family: FontFamily::Inter,
            primary_color: "#0f766e".to_string(),
            layout: LayoutVariant::Classic,
            font_scale: FontScale::Base,
            line_height: LineHeight::Normal,
        }
    }
}

impl VisualSettings {
    /// Base body size in points; headings scale off this.
    pub fn body_size(&self) -> f32 {
        match self.font_scale {
            FontScale::Sm => 12.0,
            FontScale::Base => 14.0,
            FontScale::Lg => 16.0,
        }
    }

    /// Extra vertical spacing between lines.
    pub fn line_spacing(&self) -> f32 {
        match self.line_height {
            LineHeight::Tight => 2.0,
            LineHeight::Normal => 4.0,
            LineHeight::Relaxed => 7.0,
        }
    }

    /// Accent color parsed from the hex string, falling back to a neutral
    /// dark gray on malformed input.
    pub fn accent_color(&self) -> egui::Color32 {
        parse_hex_color(&self.primary_color).unwrap_or(egui::Color32::from_gray(40))
    }
}

fn parse_hex_color(hex: &str) -> Option<egui::Color32> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(egui::Color32::from_rgb(r, g, b))
}
