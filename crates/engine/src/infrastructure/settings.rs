//! Settings loader.
//!
//! Reads an optional `doorwright.toml` and overlays environment variables
//! prefixed with `DOORWRIGHT__`, using `__` between nested keys:
//!
//! - `DOORWRIGHT__CREATOR__MAX_NAME_LENGTH=32`
//! - `DOORWRIGHT__HOST__PRICE_PER_BLOCK=0.5`
//!
//! Every field has a default, so an empty environment yields a usable setup.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use doorwright_domain::CreatorSettings;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "doorwright.toml";
const ENV_PREFIX: &str = "DOORWRIGHT";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub creator: CreatorSettings,
    #[serde(default)]
    pub host: HostSettings,
}

/// Knobs for the adapters the console host wires in.
#[derive(Debug, Clone, Deserialize)]
pub struct HostSettings {
    /// Largest structure (in blocks) a player may create. Unset means unlimited.
    #[serde(default = "default_region_size_limit")]
    pub region_size_limit: Option<i64>,

    /// Largest distance between a structure and its trigger. Unset means unlimited.
    #[serde(default = "default_trigger_distance_limit")]
    pub trigger_distance_limit: Option<i64>,

    /// Zero disables the economy.
    #[serde(default)]
    pub price_per_block: f64,

    #[serde(default = "default_starting_balance")]
    pub starting_balance: f64,

    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    #[serde(default = "default_player_name")]
    pub player_name: String,
}

fn default_region_size_limit() -> Option<i64> { Some(500) }
fn default_trigger_distance_limit() -> Option<i64> { Some(24) }
fn default_starting_balance() -> f64 { 100.0 }
fn default_store_path() -> PathBuf { PathBuf::from("structures.json") }
fn default_player_name() -> String { "builder".to_string() }

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            region_size_limit: default_region_size_limit(),
            trigger_distance_limit: default_trigger_distance_limit(),
            price_per_block: 0.0,
            starting_balance: default_starting_balance(),
            store_path: default_store_path(),
            player_name: default_player_name(),
        }
    }
}

/// Loads settings from `doorwright.toml` in the working directory and the environment.
pub fn load_settings() -> Result<AppConfig, SettingsError> {
    load_settings_from(Path::new(DEFAULT_CONFIG_FILE))
}

/// Loads settings from `path` (if it exists) and the environment.
pub fn load_settings_from(path: &Path) -> Result<AppConfig, SettingsError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings: AppConfig = config.try_deserialize()?;
    tracing::debug!(
        path = %path.display(),
        rotation_point_range = settings.creator.rotation_point_range,
        session_timeout_secs = settings.creator.session_timeout_secs,
        "Settings loaded"
    );
    Ok(settings)
}
