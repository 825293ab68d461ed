use time::{Duration, OffsetDateTime};

use crate::{
    claims::Claims,
    errors::{ConfigError, IssueError},
    signer::{SignedToken, TokenSigner},
};

/// Issuer/audience names and validity windows applied to every issued pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPolicy {
    issuer: String,
    audience: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenPolicy {
    pub const DEFAULT_ISSUER: &'static str = "flexio-backend";
    pub const DEFAULT_AUDIENCE: &'static str = "flexio-admin";
    /// Upper bound for either window (100 years). Keeps `iat + ttl` within `i64`.
    pub const MAX_TTL: Duration = Duration::seconds(100 * 365 * 24 * 60 * 60);

    /// Both windows must be at least one second so that `exp > iat` holds,
    /// and at most [`Self::MAX_TTL`].
    pub fn new(
        issuer: impl Into<String>,
        audience: impl Into<String>,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<Self, ConfigError> {
        if access_ttl.whole_seconds() <= 0 {
            return Err(ConfigError::NonPositiveTtl("access"));
        }
        if refresh_ttl.whole_seconds() <= 0 {
            return Err(ConfigError::NonPositiveTtl("refresh"));
        }
        if access_ttl > Self::MAX_TTL {
            return Err(ConfigError::ExcessiveTtl("access"));
        }
        if refresh_ttl > Self::MAX_TTL {
            return Err(ConfigError::ExcessiveTtl("refresh"));
        }
        Ok(Self {
            issuer: issuer.into(),
            audience: audience.into(),
            access_ttl,
            refresh_ttl,
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }
}

impl Default for TokenPolicy {
    /// One year of access, two years of refresh. Deployments should shorten these.
    fn default() -> Self {
        Self {
            issuer: Self::DEFAULT_ISSUER.to_string(),
            audience: Self::DEFAULT_AUDIENCE.to_string(),
            access_ttl: Duration::days(365),
            refresh_ttl: Duration::days(730),
        }
    }
}

/// Access and refresh tokens minted together for one identity.
///
/// The two are not linked: either stays valid until its own expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: SignedToken,
    pub refresh_token: SignedToken,
}

#[derive(Clone)]
pub struct TokenIssuer {
    signer: TokenSigner,
    policy: TokenPolicy,
}

impl TokenIssuer {
    pub fn new(signer: TokenSigner, policy: TokenPolicy) -> Self {
        Self { signer, policy }
    }

    pub fn policy(&self) -> &TokenPolicy {
        &self.policy
    }

    pub fn issue(&self, identity: &str) -> Result<TokenPair, IssueError> {
        self.issue_at(identity, OffsetDateTime::now_utc())
    }

    pub fn issue_at(&self, identity: &str, now: OffsetDateTime) -> Result<TokenPair, IssueError> {
        if identity.is_empty() {
            return Err(IssueError::EmptyIdentity);
        }

        let issued_at = now.unix_timestamp();
        let access = self.claims_for(identity, issued_at, self.policy.access_ttl);
        let refresh = self.claims_for(identity, issued_at, self.policy.refresh_ttl);

        Ok(TokenPair {
            access_token: self.signer.sign(&access)?,
            refresh_token: self.signer.sign(&refresh)?,
        })
    }

    fn claims_for(&self, identity: &str, issued_at: i64, ttl: Duration) -> Claims {
        Claims::new(
            identity,
            self.policy.issuer.as_str(),
            self.policy.audience.as_str(),
            issued_at,
            issued_at + ttl.whole_seconds(),
        )
    }
}
