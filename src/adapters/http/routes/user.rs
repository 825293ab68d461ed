use axum::{
    Extension, Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::{
        app_state::AppState,
        middleware::{AuthenticatedUser, require_bearer_auth},
        routes::{ApiResponse, json_body},
    },
    app_error::{AppError, AppResult},
    domain::entities::user::UserProfile,
    use_cases::user::{CreateUserInput, UpdateUserInput},
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserPayload {
    username: String,
    email: String,
    first_name: String,
    #[serde(default)]
    middle_name: Option<String>,
    last_name: String,
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateUserPayload {
    email: String,
    first_name: String,
    #[serde(default)]
    middle_name: Option<String>,
    last_name: String,
    #[serde(default)]
    password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserResponse {
    id: Uuid,
    username: String,
    email: String,
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    created_at: Option<NaiveDateTime>,
    updated_at: Option<NaiveDateTime>,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            email: profile.email,
            first_name: profile.first_name,
            middle_name: profile.middle_name,
            last_name: profile.last_name,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// User administration; every route requires a valid access token.
pub fn router(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route_layer(middleware::from_fn_with_state(app_state, require_bearer_auth))
}

fn user_id(path: Result<Path<Uuid>, PathRejection>) -> AppResult<Uuid> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::InvalidInput("Invalid user ID".into()))
}

async fn create_user(
    State(app_state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    payload: Result<Json<CreateUserPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = json_body(payload)?;
    let profile = app_state
        .user_use_cases
        .create_user(
            &actor.identity,
            CreateUserInput {
                username: payload.username,
                email: payload.email,
                first_name: payload.first_name,
                middle_name: payload.middle_name,
                last_name: payload.last_name,
                password: payload.password,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserResponse::from(profile))),
    ))
}

async fn list_users(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users = app_state.user_use_cases.list_users().await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(ApiResponse::success(users)))
}

async fn get_user(
    State(app_state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let profile = app_state.user_use_cases.get_user(user_id(path)?).await?;
    Ok(Json(ApiResponse::success(UserResponse::from(profile))))
}

async fn update_user(
    State(app_state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateUserPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let id = user_id(path)?;
    let payload = json_body(payload)?;
    let profile = app_state
        .user_use_cases
        .update_user(
            &actor.identity,
            id,
            UpdateUserInput {
                email: payload.email,
                first_name: payload.first_name,
                middle_name: payload.middle_name,
                last_name: payload.last_name,
                password: payload.password,
            },
        )
        .await?;
    Ok(Json(ApiResponse::success(UserResponse::from(profile))))
}

async fn delete_user(
    State(app_state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    app_state.user_use_cases.delete_user(user_id(path)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
