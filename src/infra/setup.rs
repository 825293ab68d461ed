use std::{fs::File, path::Path, sync::Arc};

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::http::app_state::AppState,
    application::jwt::TokenService,
    infra::{config::AppConfig, postgres_persistence},
    use_cases::{
        auth::AuthUseCases,
        user::{UserRepo, UserUseCases},
    },
};

pub async fn init_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    // Reject a bad secret or window before touching the database.
    let tokens = Arc::new(
        TokenService::from_config(&config)
            .map_err(|e| anyhow::anyhow!("Invalid token configuration: {e}"))?,
    );

    let postgres_arc = Arc::new(
        postgres_persistence(&config.database_url, config.database_max_connections).await?,
    );

    let user_repo = postgres_arc as Arc<dyn UserRepo>;
    let auth_use_cases = AuthUseCases::new(user_repo.clone(), tokens.clone());
    let user_use_cases = UserUseCases::new(user_repo, config.bcrypt_cost);

    Ok(AppState {
        config: Arc::new(config),
        tokens,
        auth_use_cases: Arc::new(auth_use_cases),
        user_use_cases: Arc::new(user_use_cases),
    })
}

pub fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "flexio_api=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs)
    let json_layer = match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                anyhow::anyhow!("Cannot create log file {}: {e}", path.display())
            })?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_current_span(true)
                    .with_span_list(true)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    Ok(())
}
