//! Completion event -- one ledger entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::day::DayKey;

/// One recorded instance of performing a habit on a specific calendar day.
///
/// The ledger is append-only; several events may share the same
/// `(habit_id, day)` pair, each counting one unit of progress toward that
/// day's target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    /// Storage-assigned row id.
    pub id: i64,

    pub habit_id: String,

    /// The calendar day the completion counts toward.
    pub day: DayKey,

    /// When the event was appended (audit only; statistics ignore it).
    pub recorded_at: DateTime<Utc>,
}
