use crate::app_error::{AppError, ErrorCode};
use axum::Json;
use flexio_tokens::{AuthError, TokenError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(_) | AppError::Internal(_) => {
                tracing::error!(error = ?self, "Request failed");
            }
            _ => tracing::warn!(error = %self, "Request rejected"),
        }

        match self {
            AppError::Database(_) => {
                error_resp(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseError, None)
            }
            AppError::InvalidCredentials => {
                error_resp(StatusCode::UNAUTHORIZED, ErrorCode::InvalidCredentials, None)
            }
            AppError::InvalidInput(msg) => {
                error_resp(StatusCode::BAD_REQUEST, ErrorCode::InvalidInput, Some(msg))
            }
            AppError::NotFound => error_resp(StatusCode::NOT_FOUND, ErrorCode::NotFound, None),
            AppError::Unauthorized(err) => error_resp(
                StatusCode::UNAUTHORIZED,
                ErrorCode::from(&err),
                Some(auth_message(&err)),
            ),
            AppError::Internal(_) => {
                error_resp(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError, None)
            }
        }
    }
}

// The `alg` header value is caller-controlled and stays out of the body.
fn auth_message(err: &AuthError) -> String {
    match err {
        AuthError::Token(TokenError::UnsupportedAlgorithm(_)) => {
            "Unsupported signing algorithm".to_string()
        }
        _ => err.to_string(),
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: Option<String>) -> Response {
    let body = match message {
        Some(msg) => serde_json::json!({ "code": code.as_str(), "message": msg }),
        None => serde_json::json!({ "code": code.as_str() }),
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_algorithm_message_omits_header_value() {
        let err = AuthError::from(TokenError::UnsupportedAlgorithm("<script>".into()));
        assert_eq!(auth_message(&err), "Unsupported signing algorithm");
    }

    #[test]
    fn test_other_auth_messages_pass_through() {
        assert_eq!(
            auth_message(&AuthError::from(TokenError::Expired)),
            "Token has expired"
        );
        assert_eq!(
            auth_message(&AuthError::MissingHeader),
            "Authorization header is missing"
        );
    }
}
