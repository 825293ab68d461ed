use thiserror::Error;

/// Startup configuration problems. Any of these should abort the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Signing secret must not be empty")]
    EmptySecret,

    #[error("Token validity window must be positive: {0}")]
    NonPositiveTtl(&'static str),

    #[error("Token validity window exceeds the maximum: {0}")]
    ExcessiveTtl(&'static str),
}

/// Token verification failures, listed in the order they are checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Missing required claim: {0}")]
    ClaimsMissing(String),
}

/// Rejections produced while authorizing a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authorization header is missing")]
    MissingHeader,

    #[error("Invalid token format")]
    MalformedHeader,

    #[error(transparent)]
    Token(#[from] TokenError),
}

#[derive(Debug, Error)]
pub enum IssueError {
    #[error("Cannot issue a token for an empty identity")]
    EmptyIdentity,

    #[error("Token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Issue(#[from] IssueError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_wraps_token_error_message() {
        let err = AuthError::from(TokenError::Expired);
        assert_eq!(err.to_string(), "Token has expired");
        assert_eq!(err, AuthError::Token(TokenError::Expired));
    }

    #[test]
    fn test_header_errors_are_distinct_from_token_errors() {
        assert_ne!(
            AuthError::MalformedHeader.to_string(),
            AuthError::Token(TokenError::Malformed).to_string()
        );
    }
}
