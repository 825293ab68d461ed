//! `Authorization` header parsing.

use crate::errors::AuthError;

pub const BEARER_SCHEME: &str = "Bearer";

/// Extracts the token from an `Authorization: Bearer <token>` header value.
///
/// An absent or empty header is [`AuthError::MissingHeader`]. Anything other
/// than the exact `Bearer` scheme, a single space, and a non-empty token
/// containing no further spaces is [`AuthError::MalformedHeader`].
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let value = match header {
        None | Some("") => return Err(AuthError::MissingHeader),
        Some(value) => value,
    };

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(BEARER_SCHEME), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}
