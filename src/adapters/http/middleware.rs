use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use flexio_tokens::{AuthError, Claims, extract_bearer};

use crate::{adapters::http::app_state::AppState, app_error::AppError};

/// Identity admitted by [`require_bearer_auth`], available to handlers as
/// `Extension<AuthenticatedUser>`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub identity: String,
    pub claims: Claims,
}

/// Admits the request only with a valid `Authorization: Bearer` access token.
/// Rejections short-circuit before the handler runs.
pub async fn require_bearer_auth(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthError::MalformedHeader))
        .transpose()?;
    let token = extract_bearer(header)?;
    let claims = app_state.tokens.verify(token)?;

    tracing::debug!(identity = %claims.identity, "Request authorized");

    request.extensions_mut().insert(AuthenticatedUser {
        identity: claims.identity.clone(),
        claims,
    });

    Ok(next.run(request).await)
}
