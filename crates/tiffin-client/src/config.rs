//! # Client Configuration
//!
//! Configuration for the remote service connection and this device.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TIFFIN_PROJECT_ID=campus-cafe-prod                                 │
//! │     TIFFIN_API_KEY=...                                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/tiffin/tiffin.toml (Linux)                               │
//! │     ~/Library/Application Support/app.tiffin/tiffin.toml (macOS)       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     dev project id, generated device id, standard collection names     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # tiffin.toml
//! [service]
//! project_id = "campus-cafe-prod"
//! api_key = "AIza..."
//!
//! [device]
//! id = "550e8400-e29b-41d4-a716-446655440000"
//! name = "Sam's Phone"
//!
//! [collections]
//! food_data = "FoodData"
//! user_orders = "UserOrders"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(String),

    #[error("Invalid config file: {0}")]
    Parse(String),
}

// =============================================================================
// Service Configuration
// =============================================================================

/// The managed backend project this client talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Backend project identifier.
    #[serde(default = "default_project_id")]
    pub project_id: String,

    /// API key issued for this app.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Endpoint override for emulators/self-hosted setups.
    #[serde(default)]
    pub endpoint: Option<String>,
}

fn default_project_id() -> String {
    "tiffin-dev".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            project_id: default_project_id(),
            api_key: None,
            endpoint: None,
        }
    }
}

// =============================================================================
// Device Configuration
// =============================================================================

/// Identity of this installation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Unique device identifier (UUID v4).
    /// Auto-generated on first run if not provided.
    pub id: String,

    /// Human-readable device name.
    #[serde(default = "default_device_name")]
    pub name: String,
}

fn default_device_name() -> String {
    "Mobile Device".to_string()
}

impl Default for DeviceConfig {
    fn default() -> Self {
        DeviceConfig {
            id: Uuid::new_v4().to_string(),
            name: default_device_name(),
        }
    }
}

// =============================================================================
// Collections Configuration
// =============================================================================

/// Names of the four backend collections.
///
/// Defaults match the production backend; override only for shared test
/// projects that namespace collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionsConfig {
    #[serde(default = "default_food_data")]
    pub food_data: String,

    #[serde(default = "default_user_data")]
    pub user_data: String,

    #[serde(default = "default_user_cart")]
    pub user_cart: String,

    #[serde(default = "default_user_orders")]
    pub user_orders: String,
}

fn default_food_data() -> String {
    tiffin_store::FOOD_DATA.to_string()
}

fn default_user_data() -> String {
    tiffin_store::USER_DATA.to_string()
}

fn default_user_cart() -> String {
    tiffin_store::USER_CART.to_string()
}

fn default_user_orders() -> String {
    tiffin_store::USER_ORDERS.to_string()
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        CollectionsConfig {
            food_data: default_food_data(),
            user_data: default_user_data(),
            user_cart: default_user_cart(),
            user_orders: default_user_orders(),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Full client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub device: DeviceConfig,

    #[serde(default)]
    pub collections: CollectionsConfig,
}

impl AppConfig {
    /// Loads configuration from the platform config path, falling back to
    /// defaults when the file is missing or unreadable. Environment
    /// variables override the file either way.
    pub fn load() -> AppConfig {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => match Self::load_from(&path) {
                Ok(config) => {
                    debug!(path = %path.display(), "loaded config file");
                    config
                }
                Err(err) => {
                    warn!(path = %path.display(), %err, "ignoring bad config file");
                    AppConfig::default()
                }
            },
            _ => AppConfig::default(),
        };

        config.apply_env();
        config
    }

    /// Loads configuration from an explicit file path.
    pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let mut config: AppConfig =
            toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.apply_env();
        Ok(config)
    }

    /// The platform config file location.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("app", "tiffin", "tiffin")
            .map(|dirs| dirs.config_dir().join("tiffin.toml"))
    }

    fn apply_env(&mut self) {
        if let Ok(project_id) = std::env::var("TIFFIN_PROJECT_ID") {
            if !project_id.is_empty() {
                self.service.project_id = project_id;
            }
        }
        if let Ok(api_key) = std::env::var("TIFFIN_API_KEY") {
            if !api_key.is_empty() {
                self.service.api_key = Some(api_key);
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
