//! Signed access/refresh tokens for the flexio API.
//!
//! This crate provides:
//! - The claims payload and its JWT claim-set encoding (`claims`)
//! - HS256 signing and verification bound to an explicit secret
//! - Access/refresh pair issuance under a configurable `TokenPolicy`
//! - The refresh exchange and `Authorization: Bearer` parsing
//!
//! Everything here is synchronous and side-effect free; callers decide how
//! failures are logged and presented.

pub mod bearer;
pub mod claims;
mod errors;
mod issuer;
mod refresh;
mod signer;
mod verifier;

pub use bearer::extract_bearer;
pub use claims::Claims;
pub use errors::{AuthError, ConfigError, IssueError, RefreshError, TokenError};
pub use issuer::{TokenIssuer, TokenPair, TokenPolicy};
pub use refresh::RefreshFlow;
pub use signer::{SIGNING_ALGORITHM, SignedToken, TokenSigner};
pub use verifier::TokenVerifier;
