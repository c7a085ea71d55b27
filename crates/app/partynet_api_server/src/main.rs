//! PartyNetwork auth gateway server binary.
//!
//! Connects to PostgreSQL, runs migrations, and serves the REST API until
//! interrupted.

use std::sync::Arc;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use partynet_api::config::{ApiConfig, DEFAULT_COOKIE_MAX_AGE_SECS};
use partynet_core::auth::jwt::DEFAULT_TOKEN_TTL_HOURS;
use partynet_core::store::PgUserStore;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "partynet_api_server", about = "PartyNetwork auth gateway")]
struct Args {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// PostgreSQL connection URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Secret used to sign session tokens.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// Session token lifetime in hours.
    #[arg(long, env = "TOKEN_TTL_HOURS", default_value_t = DEFAULT_TOKEN_TTL_HOURS)]
    token_ttl_hours: i64,

    /// Max-age of the session cookie in seconds.
    #[arg(long, env = "COOKIE_MAX_AGE_SECS", default_value_t = DEFAULT_COOKIE_MAX_AGE_SECS)]
    cookie_max_age_secs: i64,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,partynet_api=debug,partynet_core=debug")
            }),
        )
        .init();

    let args = Args::parse();

    let config = ApiConfig {
        bind_addr: format!("{}:{}", args.host, args.port),
        database_url: args.database_url,
        jwt_secret: args.jwt_secret,
        token_ttl_hours: args.token_ttl_hours,
        cookie_max_age_secs: args.cookie_max_age_secs,
    };
    config.validate()?;

    info!(
        bind_addr = %config.bind_addr,
        max_connections = args.max_connections,
        token_ttl_hours = config.token_ttl_hours,
        "starting partynet_api_server"
    );

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&config.database_url)
        .await?;

    info!("running database migrations");
    partynet_core::migrate::migrate(&pool).await?;

    let store = Arc::new(PgUserStore::new(pool));
    let state = partynet_api::AppState::new(store, config.clone());
    let app = partynet_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
