//! Test app state builder for HTTP-level testing.

use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};

use axum::http::HeaderValue;
use secrecy::SecretString;
use time::Duration;

use crate::{
    adapters::http::app_state::AppState,
    domain::entities::user::UserCredentials,
    infra::config::AppConfig,
    test_utils::{InMemoryUserRepo, TEST_BCRYPT_COST, TEST_JWT_SECRET, test_token_service},
    use_cases::{auth::AuthUseCases, user::UserUseCases},
};

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let app_state = TestAppStateBuilder::new()
///     .with_user(create_test_user("alice", "s3cret", |_| {}))
///     .build();
/// ```
#[derive(Default)]
pub struct TestAppStateBuilder {
    users: Vec<UserCredentials>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user to the in-memory repository.
    pub fn with_user(mut self, user: UserCredentials) -> Self {
        self.users.push(user);
        self
    }

    pub fn build(self) -> AppState {
        let tokens = Arc::new(test_token_service());
        let repo = Arc::new(InMemoryUserRepo::with_users(self.users));
        let auth_use_cases = Arc::new(AuthUseCases::new(repo.clone(), tokens.clone()));
        let user_use_cases = Arc::new(UserUseCases::new(repo, TEST_BCRYPT_COST));

        AppState {
            config: Arc::new(test_config()),
            tokens,
            auth_use_cases,
            user_use_cases,
        }
    }
}

/// Configuration matching [`test_token_service`]; never used to reach a database.
pub fn test_config() -> AppConfig {
    AppConfig {
        jwt_secret: SecretString::new(TEST_JWT_SECRET.into()),
        access_token_ttl: Duration::days(365),
        refresh_token_ttl: Duration::days(730),
        jwt_issuer: "flexio-backend".to_string(),
        jwt_audience: "flexio-admin".to_string(),
        database_url: "postgres://localhost/flexio_test".to_string(),
        database_max_connections: 1,
        bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 0)),
        cors_origin: HeaderValue::from_static("http://localhost:1234"),
        bcrypt_cost: TEST_BCRYPT_COST,
        log_file: None,
    }
}
