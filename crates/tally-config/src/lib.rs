//! Configuration management for the tally system.
//!
//! The main entry points are [`config::TallyConfig`] (the contents of
//! `.tally/config.yaml`) and [`tally_dir`] (discovery of the `.tally/`
//! metadata directory).

pub mod config;
pub mod tally_dir;

pub use config::{ConfigError, TallyConfig, load_config, save_config};
pub use tally_dir::{ensure_tally_dir, find_tally_dir};
