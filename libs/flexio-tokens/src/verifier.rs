use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{DecodingKey, crypto};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::{
    claims::{self, Claims},
    errors::{ConfigError, TokenError},
    signer::{SIGNING_ALGORITHM, is_blank},
};

const EXPECTED_ALG: &str = "HS256";

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

struct Segments<'a> {
    header: &'a str,
    claims: &'a str,
    signature: &'a str,
}

/// Checks tokens produced by [`crate::TokenSigner`] with the same secret.
///
/// Failures are reported in a fixed priority: a token that cannot be parsed
/// is `Malformed` even if it is also expired, and a foreign `alg` is
/// `UnsupportedAlgorithm` before any signature work is done.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
}

impl TokenVerifier {
    pub fn new(secret: &[u8]) -> Result<Self, ConfigError> {
        if is_blank(secret) {
            return Err(ConfigError::EmptySecret);
        }
        Ok(Self {
            key: DecodingKey::from_secret(secret),
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, OffsetDateTime::now_utc())
    }

    /// Verifies `token` as of `now`. A token whose `exp` equals `now` is expired.
    pub fn verify_at(&self, token: &str, now: OffsetDateTime) -> Result<Claims, TokenError> {
        let segments = split(token)?;
        let header: RawHeader = decode_segment(segments.header)?;
        let claim_set: Map<String, Value> = decode_segment(segments.claims)?;

        if header.alg != EXPECTED_ALG {
            return Err(TokenError::UnsupportedAlgorithm(header.alg));
        }

        let signing_input = &token[..segments.header.len() + 1 + segments.claims.len()];
        let valid = crypto::verify(
            segments.signature,
            signing_input.as_bytes(),
            &self.key,
            SIGNING_ALGORITHM,
        )
        .unwrap_or(false);
        if !valid {
            return Err(TokenError::BadSignature);
        }

        let expires_at = claims::peek_i64(&claim_set, "exp")?;
        if now.unix_timestamp() >= expires_at {
            return Err(TokenError::Expired);
        }

        claims::decode(claim_set)
    }
}

fn split(token: &str) -> Result<Segments<'_>, TokenError> {
    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(claims), Some(signature), None)
            if !header.is_empty() && !claims.is_empty() && is_base64url(signature) =>
        {
            Ok(Segments {
                header,
                claims,
                signature,
            })
        }
        _ => Err(TokenError::Malformed),
    }
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}

// An empty signature is allowed through parsing so `alg: none` tokens are
// reported as an unsupported algorithm rather than as malformed.
fn is_base64url(segment: &str) -> bool {
    segment
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
