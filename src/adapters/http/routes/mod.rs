pub mod auth;
pub mod user;

use axum::{Json, Router, extract::rejection::JsonRejection};
use serde::Serialize;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
};

pub fn router(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router(app_state.clone()))
        .nest("/users", user::router(app_state))
}

/// Unwraps a JSON body, turning extractor rejections into `InvalidInput`.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))
}

pub const SUCCESS_CODE: &str = "0000";

/// Success envelope shared by every route: `{code, msg, data}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: &'static str,
    pub msg: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            msg: "success",
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(msg: &'static str) -> Self {
        Self {
            code: SUCCESS_CODE,
            msg,
            data: None,
        }
    }
}
