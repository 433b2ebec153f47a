//! Output helpers for the `tally` CLI: the `--json` view model, JSON
//! printing, and plain-text tables.

use serde::Serialize;
use std::io::{self, Write};

use tally_core::habit::Habit;
use tally_core::stats::HabitStats;

/// A habit decorated with its computed statistics, as emitted in `--json`
/// listings.
#[derive(Serialize)]
pub struct HabitView {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    pub daily_target: u32,
    pub lifecycle: String,
    pub created: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<String>,
    pub today_progress: u32,
    pub completed_today: bool,
    pub streak: u32,
    pub weekly_consistency: u8,
}

impl HabitView {
    pub fn from_parts(habit: &Habit, stats: &HabitStats) -> Self {
        Self {
            id: habit.id.clone(),
            name: habit.name.clone(),
            emoji: (!habit.emoji.is_empty()).then(|| habit.emoji.clone()),
            daily_target: habit.daily_target,
            lifecycle: habit.lifecycle.as_str().to_string(),
            created: habit.created_at.to_rfc3339(),
            archived: habit.archived_at.map(|t| t.to_rfc3339()),
            today_progress: stats.today_progress,
            completed_today: stats.completed_today,
            streak: stats.streak,
            weekly_consistency: stats.weekly_consistency,
        }
    }
}

/// Pretty-prints a value as JSON on stdout.
///
/// Write failures (a closed pipe under `head`, say) are ignored;
/// serialization failures are fatal.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let _ = writeln!(io::stdout().lock(), "{json}");
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {e}");
            std::process::exit(1);
        }
    }
}

/// Prints an aligned table: header row, dash rule, then the data rows.
/// Does nothing when there are no rows.
pub fn output_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(String::len)
                .chain([h.len()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = String::new();
    push_row(&mut out, &widths, headers.iter().copied());
    push_row(&mut out, &widths, rule.iter().map(String::as_str));
    for row in rows {
        push_row(&mut out, &widths, row.iter().map(String::as_str));
    }

    let _ = write!(io::stdout().lock(), "{out}");
}

fn push_row<'a>(out: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        match widths.get(i) {
            Some(w) => out.push_str(&format!("{cell:<w$}", w = *w)),
            None => out.push_str(cell),
        }
    }
    // Trailing pad spaces would show up in piped output.
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}
