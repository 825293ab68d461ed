use std::{
    net::{Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use flexio_tokens::TokenPolicy;
use secrecy::SecretString;
use time::Duration;

pub struct AppConfig {
    /// HS256 signing secret. Checked for emptiness when the token service is built.
    pub jwt_secret: SecretString,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    /// bcrypt work factor for newly stored password hashes.
    pub bcrypt_cost: u32,
    /// Optional JSON log file in addition to console output.
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        // A missing secret is reported together with an empty one, as a startup error.
        let jwt_secret = SecretString::new(std::env::var("JWT_SECRET").unwrap_or_default().into());

        let access_token_ttl_secs: i64 = get_env_default("ACCESS_TOKEN_TTL_SECS", 31_536_000);
        let refresh_token_ttl_days: i64 = get_env_default("REFRESH_TOKEN_TTL_DAYS", 730);
        let jwt_issuer: String =
            get_env_default("JWT_ISSUER", TokenPolicy::DEFAULT_ISSUER.to_string());
        let jwt_audience: String =
            get_env_default("JWT_AUDIENCE", TokenPolicy::DEFAULT_AUDIENCE.to_string());

        let database_url: String = get_env("DATABASE_URL");
        let database_max_connections: u32 = get_env_default("DATABASE_MAX_CONNECTIONS", 5);
        let bind_addr: SocketAddr = get_env_default(
            "BIND_ADDR",
            SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
        );
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:1234"))
                .parse()
                .map_err(|e| anyhow::anyhow!("CORS_ORIGIN must be a valid header value: {e}"))?;
        let bcrypt_cost: u32 = get_env_default("BCRYPT_COST", bcrypt::DEFAULT_COST);
        let log_file = std::env::var("LOG_FILE_PATH")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            jwt_secret,
            access_token_ttl: Duration::seconds(access_token_ttl_secs),
            refresh_token_ttl: days("REFRESH_TOKEN_TTL_DAYS", refresh_token_ttl_days)?,
            jwt_issuer,
            jwt_audience,
            database_url,
            database_max_connections,
            bind_addr,
            cors_origin,
            bcrypt_cost,
            log_file,
        })
    }

    pub fn token_policy(&self) -> Result<TokenPolicy, flexio_tokens::ConfigError> {
        TokenPolicy::new(
            self.jwt_issuer.clone(),
            self.jwt_audience.clone(),
            self.access_token_ttl,
            self.refresh_token_ttl,
        )
    }
}

// `Duration::days` panics on overflow.
fn days(name: &str, value: i64) -> anyhow::Result<Duration> {
    value
        .checked_mul(24 * 60 * 60)
        .map(Duration::seconds)
        .ok_or_else(|| anyhow::anyhow!("{name} is out of range: {value}"))
}
