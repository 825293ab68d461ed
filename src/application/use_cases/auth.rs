use std::sync::Arc;

use flexio_tokens::TokenPair;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    application::{jwt::TokenService, password::verify_password, use_cases::user::UserRepo},
    domain::entities::user::UserProfile,
};

#[derive(Clone)]
pub struct AuthUseCases {
    repo: Arc<dyn UserRepo>,
    tokens: Arc<TokenService>,
}

impl AuthUseCases {
    pub fn new(repo: Arc<dyn UserRepo>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    /// Checks the password against the stored hash and issues a fresh pair.
    /// Unknown users and wrong passwords are indistinguishable to the caller.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> AppResult<TokenPair> {
        let Some(user) = self.repo.find_by_username(username).await? else {
            tracing::debug!("Login attempt for unknown user");
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash).await? {
            tracing::debug!(user_id = %user.profile.id, "Login attempt with wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let pair = self.tokens.issue(&user.profile.username)?;
        tracing::info!(user_id = %user.profile.id, "User logged in");
        Ok(pair)
    }

    #[instrument(skip_all)]
    pub fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        self.tokens.refresh(refresh_token)
    }

    #[instrument(skip(self))]
    pub async fn user_info(&self, identity: &str) -> AppResult<UserProfile> {
        self.repo
            .find_by_username(identity)
            .await?
            .map(|user| user.profile)
            .ok_or(AppError::NotFound)
    }
}
