use std::fmt;

use chrono::NaiveDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: Uuid,
    /// Login name; also the `identity` claim of issued tokens. Never changes.
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// A profile together with its stored bcrypt hash.
#[derive(Clone)]
pub struct UserCredentials {
    pub profile: UserProfile,
    pub password_hash: String,
}

impl fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredentials")
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

/// Validated input for inserting a user record.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub password_hash: String,
    /// Identity of the authenticated caller.
    pub created_by: String,
}

/// Validated replacement values for an existing user record.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub email: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    /// `None` keeps the stored hash.
    pub password_hash: Option<String>,
    pub updated_by: String,
}
