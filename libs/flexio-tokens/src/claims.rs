use serde_json::{Map, Value};

use crate::errors::TokenError;

/// Claim name carrying the authenticated principal.
pub const IDENTITY_CLAIM: &str = "identity";

/// Claims embedded in every access and refresh token.
///
/// Timestamps are whole seconds since the Unix epoch, matching the JWT
/// `iat`/`exp` registered claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Authenticated principal (a username).
    pub identity: String,
    pub issuer: String,
    /// Always equal to `identity`.
    pub subject: String,
    pub audience: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl Claims {
    pub fn new(
        identity: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        issued_at: i64,
        expires_at: i64,
    ) -> Self {
        debug_assert!(
            expires_at > issued_at,
            "expiry must come after issuance ({expires_at} <= {issued_at})"
        );
        let identity = identity.into();
        Self {
            subject: identity.clone(),
            identity,
            issuer: issuer.into(),
            audience: audience.into(),
            issued_at,
            expires_at,
        }
    }

    /// Length of the validity window in seconds.
    pub fn lifetime_secs(&self) -> i64 {
        self.expires_at - self.issued_at
    }
}

/// Serializes claims into the JWT claim set.
pub fn encode(claims: &Claims) -> Map<String, Value> {
    let mut map = Map::with_capacity(6);
    map.insert("iss".into(), Value::from(claims.issuer.as_str()));
    map.insert("sub".into(), Value::from(claims.subject.as_str()));
    map.insert("aud".into(), Value::from(claims.audience.as_str()));
    map.insert("iat".into(), Value::from(claims.issued_at));
    map.insert("exp".into(), Value::from(claims.expires_at));
    map.insert(IDENTITY_CLAIM.into(), Value::from(claims.identity.as_str()));
    map
}

/// Rebuilds claims from a verified claim set.
///
/// Expiry is not checked here.
pub fn decode(mut map: Map<String, Value>) -> Result<Claims, TokenError> {
    let identity = take_string(&mut map, IDENTITY_CLAIM)?;
    if identity.is_empty() {
        return Err(missing(IDENTITY_CLAIM));
    }

    Ok(Claims {
        issuer: take_string(&mut map, "iss")?,
        subject: take_string(&mut map, "sub")?,
        audience: take_audience(&mut map)?,
        issued_at: take_i64(&mut map, "iat")?,
        expires_at: take_i64(&mut map, "exp")?,
        identity,
    })
}

fn take_string(map: &mut Map<String, Value>, name: &'static str) -> Result<String, TokenError> {
    match map.remove(name) {
        Some(Value::String(s)) => Ok(s),
        _ => Err(missing(name)),
    }
}

pub(crate) fn peek_i64(map: &Map<String, Value>, name: &'static str) -> Result<i64, TokenError> {
    map.get(name).and_then(Value::as_i64).ok_or_else(|| missing(name))
}

fn take_i64(map: &mut Map<String, Value>, name: &'static str) -> Result<i64, TokenError> {
    let value = peek_i64(map, name)?;
    map.remove(name);
    Ok(value)
}

// `aud` may legally be a string or an array of strings; only a single audience is accepted.
fn take_audience(map: &mut Map<String, Value>) -> Result<String, TokenError> {
    match map.remove("aud") {
        Some(Value::String(s)) => Ok(s),
        Some(Value::Array(mut values)) if values.len() == 1 => match values.pop() {
            Some(Value::String(s)) => Ok(s),
            _ => Err(missing("aud")),
        },
        _ => Err(missing("aud")),
    }
}

fn missing(name: &str) -> TokenError {
    TokenError::ClaimsMissing(name.to_string())
}
