//! Habit and account validation rules.

use crate::habit::{Habit, Lifecycle};

/// Maximum habit name length in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Error type for validation failures.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("habit name is required")]
    NameRequired,

    #[error("habit name must be {MAX_NAME_LEN} characters or less (got {0})")]
    NameTooLong(usize),

    #[error("daily target must be at least 1")]
    ZeroTarget,

    #[error("archived habits must have an archived_at timestamp")]
    ArchivedWithoutTimestamp,

    #[error("active habits cannot have an archived_at timestamp")]
    ActiveWithTimestamp,

    #[error("email address is required")]
    EmailRequired,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

/// Strips angle brackets and surrounding whitespace from a habit name.
pub fn sanitize_name(name: &str) -> String {
    name.trim().chars().filter(|c| *c != '<' && *c != '>').collect()
}

/// Validates a habit before it is written.
pub fn validate_habit(habit: &Habit) -> Result<(), ValidationError> {
    if habit.name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if habit.name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong(habit.name.chars().count()));
    }
    // A zero target could never be met and would corrupt every streak walk.
    if habit.daily_target == 0 {
        return Err(ValidationError::ZeroTarget);
    }
    // Archived-at invariant.
    if habit.lifecycle == Lifecycle::Archived && habit.archived_at.is_none() {
        return Err(ValidationError::ArchivedWithoutTimestamp);
    }
    if habit.lifecycle == Lifecycle::Active && habit.archived_at.is_some() {
        return Err(ValidationError::ActiveWithTimestamp);
    }

    Ok(())
}

/// Validates an email address shape: non-empty local and domain parts
/// around a single `@`, no whitespace. Deliverability is not our problem.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => Ok(()),
        _ => Err(ValidationError::InvalidEmail(email.to_string())),
    }
}
