use flexio_tokens::{AuthError, IssueError, RefreshError, TokenError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::Unauthorized(AuthError::Token(err))
    }
}

impl From<IssueError> for AppError {
    fn from(err: IssueError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<RefreshError> for AppError {
    fn from(err: RefreshError) -> Self {
        match err {
            RefreshError::Token(err) => err.into(),
            RefreshError::Issue(err) => err.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    DatabaseError,
    InvalidCredentials,
    InvalidInput,
    NotFound,
    MissingAuthorization,
    MalformedAuthorization,
    TokenMalformed,
    TokenUnsupportedAlgorithm,
    TokenBadSignature,
    TokenExpired,
    TokenClaimsMissing,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::MissingAuthorization => "MISSING_AUTHORIZATION",
            ErrorCode::MalformedAuthorization => "MALFORMED_AUTHORIZATION",
            ErrorCode::TokenMalformed => "TOKEN_MALFORMED",
            ErrorCode::TokenUnsupportedAlgorithm => "TOKEN_UNSUPPORTED_ALGORITHM",
            ErrorCode::TokenBadSignature => "TOKEN_BAD_SIGNATURE",
            ErrorCode::TokenExpired => "TOKEN_EXPIRED",
            ErrorCode::TokenClaimsMissing => "TOKEN_CLAIMS_MISSING",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl From<&AuthError> for ErrorCode {
    fn from(err: &AuthError) -> Self {
        match err {
            AuthError::MissingHeader => ErrorCode::MissingAuthorization,
            AuthError::MalformedHeader => ErrorCode::MalformedAuthorization,
            AuthError::Token(TokenError::Malformed) => ErrorCode::TokenMalformed,
            AuthError::Token(TokenError::UnsupportedAlgorithm(_)) => {
                ErrorCode::TokenUnsupportedAlgorithm
            }
            AuthError::Token(TokenError::BadSignature) => ErrorCode::TokenBadSignature,
            AuthError::Token(TokenError::Expired) => ErrorCode::TokenExpired,
            AuthError::Token(TokenError::ClaimsMissing(_)) => ErrorCode::TokenClaimsMissing,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
