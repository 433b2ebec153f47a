//! Storage error taxonomy.

/// Everything that can go wrong inside the store.
///
/// Domain rules that surface as rejected writes (the duplicate email, the
/// active-habit cap) get their own variants so the CLI can phrase them as
/// user mistakes rather than database trouble.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Lookup by id or email came up empty.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// An account with this email already exists.
    #[error("an account with email {email} already exists")]
    EmailTaken { email: String },

    /// The owner is already at the active-habit cap.
    #[error("active habit limit reached (max {max})")]
    ActiveHabitLimit { max: u32 },

    /// Opening the database, or acquiring its lock, failed.
    #[error("connection error: {0}")]
    Connection(String),

    /// A transaction could not be started or committed.
    #[error("transaction error: {0}")]
    Transaction(String),

    /// Schema setup or a named migration failed.
    #[error("migration {name} failed: {reason}")]
    Migration { name: String, reason: String },

    /// Any other SQLite error, passed through.
    #[error("query error: {0}")]
    Query(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Missing-entity errors are routinely caught and rephrased by callers;
    /// this keeps those matches short.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
