//! User (account) operations for [`SqliteStore`].

use rusqlite::{Row, params};
use tracing::debug;

use tally_core::user::User;

use crate::error::{Result, StorageError};
use crate::sqlite::store::{SqliteStore, format_datetime, parse_datetime};

/// Deserialises a row into a [`User`]. Column order: id, email, created_at.
fn scan_user(row: &Row<'_>) -> rusqlite::Result<User> {
    let created_at_str: String = row.get(2)?;
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl SqliteStore {
    /// Creates an account. The email's UNIQUE constraint surfaces as
    /// [`StorageError::EmailTaken`].
    pub fn create_user_impl(&self, user: &User) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT INTO users (id, email, created_at) VALUES (?1, ?2, ?3)",
            params![user.id, user.email, format_datetime(&user.created_at)],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StorageError::EmailTaken {
                    email: user.email.clone(),
                }
            }
            other => StorageError::Query(other),
        })?;
        debug!(id = %user.id, email = %user.email, "user created");
        Ok(())
    }

    /// Retrieves an account by ID.
    pub fn get_user_impl(&self, id: &str) -> Result<User> {
        let conn = self.lock_conn()?;
        conn.query_row(
            "SELECT id, email, created_at FROM users WHERE id = ?1",
            params![id],
            scan_user,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StorageError::not_found("user", id),
            other => StorageError::Query(other),
        })
    }

    /// Looks up an account by email address.
    pub fn find_user_by_email_impl(&self, email: &str) -> Result<User> {
        let conn = self.lock_conn()?;
        conn.query_row(
            "SELECT id, email, created_at FROM users WHERE email = ?1",
            params![email],
            scan_user,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StorageError::not_found("user", email),
            other => StorageError::Query(other),
        })
    }

    /// Returns all accounts, oldest first.
    pub fn list_users_impl(&self) -> Result<Vec<User>> {
        let conn = self.lock_conn()?;
        let mut stmt =
            conn.prepare("SELECT id, email, created_at FROM users ORDER BY created_at ASC, id ASC")?;
        let rows = stmt.query_map([], scan_user)?;
        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    #[test]
    fn create_and_get_user() {
        let store = test_store();
        let user = User::new("usr-a1", "alice@example.com");
        store.create_user_impl(&user).unwrap();

        let loaded = store.get_user_impl("usr-a1").unwrap();
        assert_eq!(loaded.email, "alice@example.com");
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let store = test_store();
        store
            .create_user_impl(&User::new("usr-a1", "alice@example.com"))
            .unwrap();

        let err = store
            .create_user_impl(&User::new("usr-a2", "alice@example.com"))
            .unwrap_err();
        assert!(matches!(err, StorageError::EmailTaken { .. }));
    }

    #[test]
    fn find_by_email() {
        let store = test_store();
        store
            .create_user_impl(&User::new("usr-b1", "bob@example.com"))
            .unwrap();

        let found = store.find_user_by_email_impl("bob@example.com").unwrap();
        assert_eq!(found.id, "usr-b1");

        let missing = store.find_user_by_email_impl("carol@example.com");
        assert!(missing.unwrap_err().is_not_found());
    }

    #[test]
    fn list_users() {
        let store = test_store();
        assert!(store.list_users_impl().unwrap().is_empty());

        store
            .create_user_impl(&User::new("usr-a1", "alice@example.com"))
            .unwrap();
        store
            .create_user_impl(&User::new("usr-b1", "bob@example.com"))
            .unwrap();

        let users = store.list_users_impl().unwrap();
        assert_eq!(users.len(), 2);
    }

    #[test]
    fn get_missing_user() {
        let store = test_store();
        assert!(store.get_user_impl("usr-none").unwrap_err().is_not_found());
    }
}
