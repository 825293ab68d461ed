use axum::{
    Extension, Json, Router,
    extract::{State, rejection::JsonRejection},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use flexio_tokens::TokenPair;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::{
        app_state::AppState,
        middleware::{AuthenticatedUser, require_bearer_auth},
        routes::{ApiResponse, json_body},
    },
    app_error::{AppError, AppResult},
};

#[derive(Deserialize)]
struct LoginPayload {
    username: String,
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshPayload {
    refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    token: String,
    refresh_token: String,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            token: pair.access_token.into_string(),
            refresh_token: pair.refresh_token.into_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserInfoResponse {
    user_id: Uuid,
    user_name: String,
}

pub fn router(app_state: AppState) -> Router<AppState> {
    let gated = Router::new()
        .route("/getUserInfo", get(user_info))
        .route("/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(app_state, require_bearer_auth));

    Router::new()
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token))
        .merge(gated)
}

async fn login(
    State(app_state): State<AppState>,
    payload: Result<Json<LoginPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = json_body(payload)?;
    let username = payload.username.trim();
    if username.is_empty() || payload.password.is_empty() {
        return Err(AppError::InvalidInput(
            "Username and password are required".into(),
        ));
    }

    let pair = app_state
        .auth_use_cases
        .login(username, &payload.password)
        .await?;
    Ok(Json(ApiResponse::success(TokenResponse::from(pair))))
}

async fn refresh_token(
    State(app_state): State<AppState>,
    payload: Result<Json<RefreshPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = json_body(payload)?;
    if payload.refresh_token.is_empty() {
        return Err(AppError::InvalidInput("Refresh token is required".into()));
    }

    let pair = app_state.auth_use_cases.refresh(&payload.refresh_token)?;
    Ok(Json(ApiResponse::success(TokenResponse::from(pair))))
}

async fn user_info(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<impl IntoResponse> {
    let profile = app_state.auth_use_cases.user_info(&user.identity).await?;
    Ok(Json(ApiResponse::success(UserInfoResponse {
        user_id: profile.id,
        user_name: profile.username,
    })))
}

// Tokens are stateless; the client discards them.
async fn logout(Extension(user): Extension<AuthenticatedUser>) -> impl IntoResponse {
    tracing::info!(identity = %user.identity, "User logged out");
    Json(ApiResponse::message("logout successful"))
}
