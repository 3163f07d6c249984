//! Configuration
//!
//! Loads configuration from TOML file at `~/.config/objwin/config.toml`
//! Auto-generates default config file on first run if missing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::geometry::Color;
use crate::input::{KeyChord, QuitPolicy};
use crate::window::{
    Viewport, WindowSpec, DEFAULT_HEIGHT, DEFAULT_LONGEST_SIDE, DEFAULT_POSITION, DEFAULT_WIDTH,
};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowDefaults,
    pub input: InputConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found at {:?}, using defaults", config_path);
            if let Err(e) = Self::save_default(config_path) {
                warn!("Failed to create default config file: {}", e);
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).context("Failed to read config file")?;
        let config = Self::from_toml_str(&content).context("Failed to parse config file")?;

        info!("Configuration loaded from {:?}", config_path);
        debug!("Config: {:?}", config);

        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("objwin");

        Ok(config_dir.join("config.toml"))
    }

    /// Save default configuration to file
    fn save_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(&Self::default())
            .context("Failed to serialize default config")?;

        fs::write(path, toml_string).context("Failed to write default config file")?;

        info!("Created default config file at {:?}", path);
        Ok(())
    }

    /// Quit policy from `[input] quit_key`; an empty string disables it
    pub fn quit_policy(&self) -> Result<QuitPolicy> {
        match self.input.quit_key.as_deref().map(str::trim) {
            None | Some("") => Ok(QuitPolicy::disabled()),
            Some(text) => {
                let chord = text
                    .parse::<KeyChord>()
                    .with_context(|| format!("Invalid quit_key {:?}", text))?;
                Ok(QuitPolicy::new(chord))
            }
        }
    }
}

/// Defaults applied to new windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowDefaults {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Longest physical side of windows sized from their viewport
    pub longest_side: i32,
    pub background: Color,
}

impl Default for WindowDefaults {
    fn default() -> Self {
        Self {
            x: DEFAULT_POSITION.0,
            y: DEFAULT_POSITION.1,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            longest_side: DEFAULT_LONGEST_SIDE,
            background: Color::WHITE,
        }
    }
}

impl WindowDefaults {
    /// Window at the configured position and size, viewport on the pixel grid
    pub fn spec(&self, title: impl Into<String>) -> WindowSpec {
        WindowSpec::with_size(title, self.width, self.height)
            .position(self.x, self.y)
            .background(self.background)
    }

    /// Window sized from `viewport`, using the configured longest side
    pub fn spec_for_viewport(
        &self,
        title: impl Into<String>,
        viewport: Viewport,
    ) -> crate::Result<WindowSpec> {
        Ok(WindowSpec::fit_viewport(title, viewport, self.longest_side)?
            .position(self.x, self.y)
            .background(self.background))
    }
}

/// Input configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Key chord that leaves the event loop, e.g. "Alt+F4"; empty disables
    pub quit_key: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            quit_key: Some("Alt+F4".to_string()),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "objwin=debug,info".to_string(),
        }
    }
}
