//! # User model
//!
//! Defines the two representations of an account:
//!
//! - [`User`] — the full record from the `user` table, including the
//!   password hash. Stays inside the auth layer.
//! - [`SessionUser`] — the client-safe projection (`id`, `name`, `email`)
//!   handed to UI code and mirrored into the session slot.
//!
//! User records live in the object store with
//! `objectData = { name, email, password, createdAt }`, where `password`
//! holds the Argon2 PHC string. [`User::from_record`] reads a stored
//! record back and returns `None` when the payload is missing required
//! fields, so a corrupted record degrades to "skipped" rather than an
//! error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use store::Record;

/// Full user record from the `user` table.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The payload stored as a user record's object data.
    pub(crate) fn object_data(
        name: &str,
        email: &str,
        password_hash: &str,
        created_at: DateTime<Utc>,
    ) -> Value {
        json!({
            "name": name,
            "email": email,
            "password": password_hash,
            "createdAt": created_at,
        })
    }

    /// Read a user back from a stored record. `None` when the payload is
    /// not a user.
    pub fn from_record(record: &Record) -> Option<User> {
        let data = record.object_data.as_object()?;
        Some(User {
            id: record.object_id.clone(),
            name: data.get("name")?.as_str()?.to_string(),
            email: data.get("email")?.as_str()?.to_string(),
            password_hash: data.get("password")?.as_str()?.to_string(),
            created_at: record.created_at,
        })
    }

    /// Convert to the client-safe session view.
    pub fn to_session(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// The session view of a user, safe to hand to UI code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_record_roundtrip() {
        let created_at: DateTime<Utc> = "2024-01-15T10:00:00Z".parse().unwrap();
        let record = Record {
            object_id: "1705312800000".to_string(),
            object_data: User::object_data("Ava", "ava@x.com", "$argon2id$stub", created_at),
            created_at,
        };

        let user = User::from_record(&record).unwrap();
        assert_eq!(user.id, "1705312800000");
        assert_eq!(user.name, "Ava");
        assert_eq!(user.email, "ava@x.com");
        assert_eq!(user.password_hash, "$argon2id$stub");

        let session = user.to_session();
        assert_eq!(session.id, user.id);
        assert_eq!(session.email, "ava@x.com");
    }

    #[test]
    fn test_non_user_record_is_rejected() {
        let record = Record {
            object_id: "1".to_string(),
            object_data: json!({"entry": "not a user"}),
            created_at: Utc::now(),
        };
        assert!(User::from_record(&record).is_none());

        let record = Record {
            object_id: "2".to_string(),
            object_data: Value::Null,
            created_at: Utc::now(),
        };
        assert!(User::from_record(&record).is_none());
    }
}
