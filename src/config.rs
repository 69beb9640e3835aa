//! Engine configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SK_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Application identity
    #[serde(default)]
    pub app: AppConfig,
    /// Window configuration (flatscreen mode only)
    #[serde(default)]
    pub window: WindowConfig,
    /// Runtime selection
    #[serde(default)]
    pub runtime: RuntimeConfig,
    /// Asset loading configuration
    #[serde(default)]
    pub assets: AssetsConfig,
}

impl EngineConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SK_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // SK_APP__NAME=Test -> app.name = "Test"
        figment = figment.merge(Env::prefixed("SK_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Application identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name, reported to the OS / XR runtime
    pub name: String,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "spatialkit app".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Window configuration, used when running flatscreen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window x position in pixels (-1 = let the OS decide)
    pub pos_x: i32,
    /// Window y position in pixels (-1 = let the OS decide)
    pub pos_y: i32,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            pos_x: -1,
            pos_y: -1,
            width: 1280,
            height: 720,
        }
    }
}

/// Which display runtime to start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeMode {
    /// A regular desktop window
    Flatscreen,
    /// A headset through the XR runtime
    MixedReality,
}

/// Runtime selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// The runtime to try first
    pub preferred: RuntimeMode,
    /// Fall back to flatscreen when the XR runtime is unavailable
    pub fallback: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            preferred: RuntimeMode::Flatscreen,
            fallback: true,
        }
    }
}

/// Asset loading configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory file-backed assets are resolved against
    pub root: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: "assets".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
