use time::OffsetDateTime;

use crate::{
    errors::RefreshError,
    issuer::{TokenIssuer, TokenPair},
    verifier::TokenVerifier,
};

/// Exchanges a refresh token for a newly minted pair.
///
/// The presented token is fully verified and is not revoked afterwards.
#[derive(Clone, Copy)]
pub struct RefreshFlow<'a> {
    verifier: &'a TokenVerifier,
    issuer: &'a TokenIssuer,
}

impl<'a> RefreshFlow<'a> {
    pub fn new(verifier: &'a TokenVerifier, issuer: &'a TokenIssuer) -> Self {
        Self { verifier, issuer }
    }

    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair, RefreshError> {
        self.refresh_at(refresh_token, OffsetDateTime::now_utc())
    }

    pub fn refresh_at(
        &self,
        refresh_token: &str,
        now: OffsetDateTime,
    ) -> Result<TokenPair, RefreshError> {
        let claims = self.verifier.verify_at(refresh_token, now)?;
        Ok(self.issuer.issue_at(&claims.identity, now)?)
    }
}
