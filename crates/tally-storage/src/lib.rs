//! Storage backend for the tally system.
//!
//! Provides the [`Storage`] trait and a SQLite implementation
//! ([`SqliteStore`]) covering the identity store, the habit repository, and
//! the completion ledger.

pub mod error;
pub mod sqlite;
pub mod traits;

pub use error::StorageError;
pub use sqlite::SqliteStore;
pub use traits::Storage;

use tally_core::completion::Completion;
use tally_core::day::DayKey;
use tally_core::habit::Habit;
use tally_core::user::User;

use crate::error::Result;

impl Storage for SqliteStore {
    fn create_user(&self, user: &User) -> Result<()> {
        self.create_user_impl(user)
    }

    fn get_user(&self, id: &str) -> Result<User> {
        self.get_user_impl(id)
    }

    fn find_user_by_email(&self, email: &str) -> Result<User> {
        self.find_user_by_email_impl(email)
    }

    fn list_users(&self) -> Result<Vec<User>> {
        self.list_users_impl()
    }

    fn create_habit(&self, habit: &Habit, max_active: u32) -> Result<()> {
        self.create_habit_impl(habit, max_active)
    }

    fn get_habit(&self, id: &str) -> Result<Habit> {
        self.get_habit_impl(id)
    }

    fn list_active_habits(&self, owner_id: &str) -> Result<Vec<Habit>> {
        self.list_active_habits_impl(owner_id)
    }

    fn list_habits(&self, owner_id: &str) -> Result<Vec<Habit>> {
        self.list_habits_impl(owner_id)
    }

    fn rename_habit(&self, id: &str, name: &str) -> Result<()> {
        self.rename_habit_impl(id, name)
    }

    fn set_daily_target(&self, id: &str, daily_target: u32) -> Result<()> {
        self.set_daily_target_impl(id, daily_target)
    }

    fn archive_habit(&self, id: &str) -> Result<()> {
        self.archive_habit_impl(id)
    }

    fn restore_habit(&self, id: &str, max_active: u32) -> Result<()> {
        self.restore_habit_impl(id, max_active)
    }

    fn count_active_habits(&self, owner_id: &str) -> Result<u32> {
        self.count_active_habits_impl(owner_id)
    }

    fn record_completion(&self, habit_id: &str, day: DayKey) -> Result<bool> {
        self.record_completion_impl(habit_id, day)
    }

    fn remove_completion(&self, habit_id: &str, day: DayKey) -> Result<bool> {
        self.remove_completion_impl(habit_id, day)
    }

    fn completions_for(&self, habit_id: &str) -> Result<Vec<Completion>> {
        self.completions_for_impl(habit_id)
    }

    fn completion_days(&self, habit_id: &str) -> Result<Vec<DayKey>> {
        self.completion_days_impl(habit_id)
    }

    fn count_completions(&self, habit_id: &str, day: DayKey) -> Result<u32> {
        self.count_completions_impl(habit_id, day)
    }

    fn set_config(&self, key: &str, value: &str) -> Result<()> {
        self.set_config_impl(key, value)
    }

    fn get_config(&self, key: &str) -> Result<String> {
        self.get_config_impl(key)
    }
}
