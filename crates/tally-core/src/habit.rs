//! Habit struct -- the central domain model for the tally system.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a habit.
///
/// Archival is a soft delete: the habit drops out of listings and
/// statistics, its completion ledger stays untouched. Restoring an archived
/// habit recomputes statistics from the still-present ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    #[default]
    Active,
    Archived,
}

impl Lifecycle {
    /// Returns the string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }

    /// Returns `true` for [`Lifecycle::Active`].
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl From<&str> for Lifecycle {
    fn from(s: &str) -> Self {
        match s {
            "archived" => Self::Archived,
            _ => Self::Active,
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-defined recurring action with a daily repetition target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    #[serde(default)]
    pub id: String,

    /// Identifier of the owning account.
    #[serde(default)]
    pub owner_id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub emoji: String,

    /// Completion events required on a calendar day for that day to count
    /// as successful. Always at least 1.
    pub daily_target: u32,

    #[serde(default)]
    pub lifecycle: Lifecycle,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,

    /// Set when the habit is archived, cleared on restore.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

impl Default for Habit {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            owner_id: String::new(),
            name: String::new(),
            emoji: String::new(),
            daily_target: 1,
            lifecycle: Lifecycle::Active,
            created_at: now,
            updated_at: now,
            archived_at: None,
        }
    }
}

impl Habit {
    /// Returns `true` if the habit is active (not archived).
    pub fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }
}

/// Builder for constructing a [`Habit`] with a fluent API.
pub struct HabitBuilder {
    habit: Habit,
}

impl HabitBuilder {
    /// Creates a new builder with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        let mut habit = Habit::default();
        habit.name = name.into();
        Self { habit }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.habit.id = id.into();
        self
    }

    pub fn owner_id(mut self, owner_id: impl Into<String>) -> Self {
        self.habit.owner_id = owner_id.into();
        self
    }

    pub fn emoji(mut self, emoji: impl Into<String>) -> Self {
        self.habit.emoji = emoji.into();
        self
    }

    pub fn daily_target(mut self, target: u32) -> Self {
        self.habit.daily_target = target;
        self
    }

    pub fn lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.habit.lifecycle = lifecycle;
        self
    }

    pub fn created_at(mut self, t: DateTime<Utc>) -> Self {
        self.habit.created_at = t;
        self
    }

    pub fn updated_at(mut self, t: DateTime<Utc>) -> Self {
        self.habit.updated_at = t;
        self
    }

    pub fn archived_at(mut self, t: DateTime<Utc>) -> Self {
        self.habit.archived_at = Some(t);
        self
    }

    /// Consumes the builder and returns the constructed [`Habit`].
    pub fn build(self) -> Habit {
        self.habit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_habit() {
        let habit = Habit::default();
        assert_eq!(habit.daily_target, 1);
        assert_eq!(habit.lifecycle, Lifecycle::Active);
        assert!(habit.archived_at.is_none());
    }

    #[test]
    fn builder_basic() {
        let habit = HabitBuilder::new("Drink water")
            .id("hb-abc123")
            .owner_id("usr-xyz")
            .emoji("💧")
            .daily_target(8)
            .build();

        assert_eq!(habit.name, "Drink water");
        assert_eq!(habit.id, "hb-abc123");
        assert_eq!(habit.owner_id, "usr-xyz");
        assert_eq!(habit.emoji, "💧");
        assert_eq!(habit.daily_target, 8);
        assert!(habit.is_active());
    }

    #[test]
    fn habit_serde_roundtrip() {
        let habit = HabitBuilder::new("Read")
            .id("hb-r1")
            .daily_target(2)
            .build();

        let json = serde_json::to_string(&habit).unwrap();
        let back: Habit = serde_json::from_str(&json).unwrap();

        assert_eq!(back.name, "Read");
        assert_eq!(back.id, "hb-r1");
        assert_eq!(back.daily_target, 2);
    }

    #[test]
    fn lifecycle_string_forms() {
        assert_eq!(Lifecycle::Active.as_str(), "active");
        assert_eq!(Lifecycle::Archived.as_str(), "archived");
        assert_eq!(Lifecycle::from("archived"), Lifecycle::Archived);
        // Unknown strings fall back to active rather than failing a scan.
        assert_eq!(Lifecycle::from("bogus"), Lifecycle::Active);
    }

    #[test]
    fn archived_habit_is_not_active() {
        let habit = HabitBuilder::new("Old")
            .lifecycle(Lifecycle::Archived)
            .archived_at(Utc::now())
            .build();
        assert!(!habit.is_active());
    }
}
