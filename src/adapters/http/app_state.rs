use std::sync::Arc;

use crate::{
    application::jwt::TokenService,
    infra::config::AppConfig,
    use_cases::{auth::AuthUseCases, user::UserUseCases},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenService>,
    pub auth_use_cases: Arc<AuthUseCases>,
    pub user_use_cases: Arc<UserUseCases>,
}
