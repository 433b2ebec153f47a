//! Render helpers for habit rows and statistics.
//!
//! Colors come from the Ayu Dark palette
//! (<https://github.com/ayu-theme/ayu-colors>). Only states worth acting on
//! get color: a met target is green, partial progress yellow, a live streak
//! blue. Everything else stays plain so the colored bits stand out.

use owo_colors::OwoColorize;

use tally_core::habit::Habit;
use tally_core::stats::HabitStats;

use crate::terminal::supports_color;

/// Semantic tones, each mapped to one Ayu Dark color.
#[derive(Clone, Copy)]
enum Tone {
    /// #c2d94c, target met.
    Ok,
    /// #ffb454, partial progress.
    Warn,
    /// #f07178, falling behind.
    Bad,
    /// #6c7680, zero values.
    Faint,
    /// #59c2ff, ids and live streaks.
    Link,
    /// #8090a0, archived rows.
    Dim,
}

impl Tone {
    fn rgb(self) -> (u8, u8, u8) {
        match self {
            Tone::Ok => (0xc2, 0xd9, 0x4c),
            Tone::Warn => (0xff, 0xb4, 0x54),
            Tone::Bad => (0xf0, 0x71, 0x78),
            Tone::Faint => (0x6c, 0x76, 0x80),
            Tone::Link => (0x59, 0xc2, 0xff),
            Tone::Dim => (0x80, 0x90, 0xa0),
        }
    }

    fn paint(self, s: &str) -> String {
        if !supports_color() {
            return s.to_string();
        }
        let (r, g, b) = self.rgb();
        s.truecolor(r, g, b).to_string()
    }

    fn paint_bold(self, s: &str) -> String {
        if !supports_color() {
            return s.to_string();
        }
        let (r, g, b) = self.rgb();
        s.truecolor(r, g, b).bold().to_string()
    }
}

/// Today's target is met.
pub const ICON_DONE: &str = "\u{2713}"; // ✓
/// No progress yet today.
pub const ICON_PENDING: &str = "\u{25CB}"; // ○
/// Some progress, target not met.
pub const ICON_PARTIAL: &str = "\u{25D0}"; // ◐
/// Archived habit.
pub const ICON_ARCHIVED: &str = "\u{2298}"; // ⊘

const METER_FULL: char = '\u{25AE}'; // ▮
const METER_EMPTY: char = '\u{25AF}'; // ▯

/// Status icon for today, colored by how far along the day is.
pub fn render_today_icon(stats: &HabitStats) -> String {
    if stats.completed_today {
        Tone::Ok.paint(ICON_DONE)
    } else if stats.today_progress > 0 {
        Tone::Warn.paint(ICON_PARTIAL)
    } else {
        ICON_PENDING.to_string()
    }
}

/// `done/target` for today, green once the target is met.
pub fn render_progress(stats: &HabitStats, daily_target: u32) -> String {
    let label = format!("{}/{}", stats.today_progress, daily_target);
    if stats.completed_today {
        Tone::Ok.paint(&label)
    } else {
        label
    }
}

/// Streak count as `12d`. A live streak gets the accent; zero is faint.
pub fn render_streak(streak: u32) -> String {
    let label = format!("{streak}d");
    if streak > 0 {
        Tone::Link.paint_bold(&label)
    } else {
        Tone::Faint.paint(&label)
    }
}

/// Seven-cell consistency meter plus percent, e.g. `▮▮▮▮▯▯▯ 57%`.
///
/// Green from 71% (5 of 7 days), yellow from 43%, red below.
pub fn render_consistency(pct: u8) -> String {
    let filled = (usize::from(pct) * 7 + 50) / 100;
    let meter: String = (0..7)
        .map(|i| if i < filled { METER_FULL } else { METER_EMPTY })
        .collect();
    let label = format!("{meter} {pct:>3}%");
    let tone = match pct {
        71..=100 => Tone::Ok,
        43..=70 => Tone::Warn,
        _ => Tone::Bad,
    };
    tone.paint(&label)
}

/// One-line habit summary: `icon id name  progress  streak  consistency`.
///
/// Archived habits collapse to a dimmed marker line; their statistics are
/// not shown.
pub fn render_habit_compact(habit: &Habit, stats: &HabitStats, emoji: bool) -> String {
    let name = if emoji && !habit.emoji.is_empty() {
        format!("{} {}", habit.emoji, habit.name)
    } else {
        habit.name.clone()
    };

    if !habit.is_active() {
        let line = format!("{} {} {} (archived)", ICON_ARCHIVED, habit.id, name);
        return Tone::Dim.paint(&line);
    }

    format!(
        "{} {} {}  {}  {}  {}",
        render_today_icon(stats),
        Tone::Link.paint(&habit.id),
        name,
        render_progress(stats, habit.daily_target),
        render_streak(stats.streak),
        render_consistency(stats.weekly_consistency),
    )
}
