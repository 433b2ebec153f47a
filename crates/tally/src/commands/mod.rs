//! Command handlers for the `tally` CLI.

pub mod add;
pub mod archive;
pub mod completion;
pub mod init;
pub mod list;
pub mod log_cmd;
pub mod rename;
pub mod stats_cmd;
pub mod target_cmd;
pub mod undo;
pub mod user_cmd;
pub mod version;

use anyhow::Result;
use tally_core::day::DayKey;

/// Parses an optional `--date` argument, defaulting to the local today.
pub(crate) fn parse_day_arg(date: Option<&str>) -> Result<DayKey> {
    match date {
        Some(s) => Ok(DayKey::parse(s)?),
        None => Ok(DayKey::today_local()),
    }
}
