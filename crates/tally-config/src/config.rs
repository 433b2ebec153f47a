//! `.tally/config.yaml` contents and (de)serialization.
//!
//! Keys are kebab-case in the file. Every field carries a serde default,
//! so a sparse or even empty file loads as a usable configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// The `limits:` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Active habits allowed per account. Keeping this small is the
    /// product: a tracker with thirty habits tracks none of them.
    #[serde(default = "default_max_active_habits", rename = "max-active-habits")]
    pub max_active_habits: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_active_habits: default_max_active_habits(),
        }
    }
}

fn default_max_active_habits() -> u32 {
    6
}

/// The `habit-defaults:` section, applied to newly created habits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitDefaultsConfig {
    /// Daily target when `--target` is omitted.
    #[serde(default = "default_daily_target", rename = "daily-target")]
    pub daily_target: u32,
}

impl Default for HabitDefaultsConfig {
    fn default() -> Self {
        Self {
            daily_target: default_daily_target(),
        }
    }
}

fn default_daily_target() -> u32 {
    1
}

/// Everything `.tally/config.yaml` can say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TallyConfig {
    /// Habit id prefix override (the database's own `habit_prefix` entry
    /// is the usual source; this wins when set).
    #[serde(default, rename = "habit-prefix")]
    pub prefix: Option<String>,

    /// Account used when `--user` and `TALLY_USER` are both absent.
    #[serde(default, rename = "default-user")]
    pub default_user: Option<String>,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default, rename = "habit-defaults")]
    pub habit_defaults: HabitDefaultsConfig,
}

/// Loads `config.yaml` from a `.tally/` directory.
///
/// A missing or blank file is not an error; it loads as the defaults.
///
/// # Errors
///
/// [`ConfigError::ReadError`] when the file exists but cannot be read,
/// [`ConfigError::ParseError`] for invalid YAML.
pub fn load_config(tally_dir: &Path) -> Result<TallyConfig> {
    let path = tally_dir.join("config.yaml");
    if !path.exists() {
        return Ok(TallyConfig::default());
    }

    let content = std::fs::read_to_string(&path)?;
    if content.trim().is_empty() {
        return Ok(TallyConfig::default());
    }
    Ok(serde_yaml::from_str(&content)?)
}

/// Writes `config.yaml` into a `.tally/` directory, replacing it.
pub fn save_config(tally_dir: &Path, config: &TallyConfig) -> Result<()> {
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(tally_dir.join("config.yaml"), yaml)?;
    Ok(())
}
