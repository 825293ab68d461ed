use std::fmt;

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::Serialize;

use crate::{
    claims::{self, Claims},
    errors::{ConfigError, IssueError},
};

/// The only algorithm tokens are signed and verified with.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Compact `header.claims.signature` token string.
///
/// Holding the value is holding the credential, so `Debug` never prints it.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SignedToken(String);

impl SignedToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for SignedToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SignedToken(<redacted>)")
    }
}

/// HMAC-SHA256 signer bound to one secret.
#[derive(Clone)]
pub struct TokenSigner {
    key: EncodingKey,
}

impl TokenSigner {
    /// Fails for an empty or whitespace-only secret.
    pub fn new(secret: &[u8]) -> Result<Self, ConfigError> {
        if is_blank(secret) {
            return Err(ConfigError::EmptySecret);
        }
        Ok(Self {
            key: EncodingKey::from_secret(secret),
        })
    }

    pub fn sign(&self, claims: &Claims) -> Result<SignedToken, IssueError> {
        let header = Header::new(SIGNING_ALGORITHM);
        let token = encode(&header, &claims::encode(claims), &self.key)?;
        Ok(SignedToken(token))
    }
}

pub(crate) fn is_blank(secret: &[u8]) -> bool {
    secret.iter().all(u8::is_ascii_whitespace)
}
