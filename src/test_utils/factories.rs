//! Test data factories.
//!
//! Use the closure parameter to override specific fields as needed.

use chrono::NaiveDateTime;
use flexio_tokens::TokenPolicy;
use secrecy::SecretString;
use uuid::Uuid;

use crate::{
    application::jwt::TokenService,
    domain::entities::user::{UserCredentials, UserProfile},
};

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-do-not-use-in-production";

/// Lowest cost bcrypt accepts; keeps hashing fast in tests.
pub const TEST_BCRYPT_COST: u32 = 4;

/// Create a user whose stored hash matches `password`.
pub fn create_test_user(
    username: &str,
    password: &str,
    overrides: impl FnOnce(&mut UserCredentials),
) -> UserCredentials {
    let mut user = UserCredentials {
        profile: UserProfile {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: "Test".to_string(),
            middle_name: None,
            last_name: "User".to_string(),
            created_at: Some(test_datetime()),
            updated_at: Some(test_datetime()),
        },
        password_hash: bcrypt::hash(password, TEST_BCRYPT_COST).unwrap(),
    };
    overrides(&mut user);
    user
}

/// Token service over [`TEST_JWT_SECRET`] with the default windows.
pub fn test_token_service() -> TokenService {
    TokenService::new(
        &SecretString::new(TEST_JWT_SECRET.into()),
        TokenPolicy::default(),
    )
    .unwrap()
}

pub fn test_datetime() -> NaiveDateTime {
    chrono::DateTime::from_timestamp(1_735_689_600, 0)
        .unwrap()
        .naive_utc()
}
