use flexio_tokens::{
    Claims, ConfigError, RefreshFlow, TokenIssuer, TokenPair, TokenPolicy, TokenSigner,
    TokenVerifier,
};
use secrecy::{ExposeSecret, SecretString};

use crate::{app_error::AppResult, infra::config::AppConfig};

/// Process-wide signer/verifier pair built once from configuration.
#[derive(Clone)]
pub struct TokenService {
    verifier: TokenVerifier,
    issuer: TokenIssuer,
}

impl TokenService {
    pub fn new(secret: &SecretString, policy: TokenPolicy) -> Result<Self, ConfigError> {
        let secret = secret.expose_secret().as_bytes();
        Ok(Self {
            verifier: TokenVerifier::new(secret)?,
            issuer: TokenIssuer::new(TokenSigner::new(secret)?, policy),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Self::new(&config.jwt_secret, config.token_policy()?)
    }

    pub fn policy(&self) -> &TokenPolicy {
        self.issuer.policy()
    }

    pub fn issue(&self, identity: &str) -> AppResult<TokenPair> {
        Ok(self.issuer.issue(identity)?)
    }

    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        Ok(self.verifier.verify(token)?)
    }

    pub fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        Ok(RefreshFlow::new(&self.verifier, &self.issuer).refresh(refresh_token)?)
    }
}
