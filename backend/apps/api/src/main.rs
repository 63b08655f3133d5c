//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use anyhow::Context;
use auth::{AuthConfig, PgAuthRepository, PrincipalResolver, TokenCodec, auth_router};
use axum::{
    Router,
    extract::Request,
    http::{self, Method, header},
};
use catalog::{PgCatalogRepository, catalog_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url =
        env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;
    let max_connections: u32 = env_or("DATABASE_MAX_CONNECTIONS", 5)?;

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await?;

    tracing::info!(max_connections, "Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let auth_config = Arc::new(load_auth_config()?);
    tracing::info!(config = ?auth_config, "Auth configuration loaded");

    let codec = Arc::new(TokenCodec::from_config(&auth_config));
    let resolver = Arc::new(PrincipalResolver::new(codec.clone()));

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let app = Router::new()
        .merge(auth_router(
            PgAuthRepository::new(pool.clone()),
            auth_config,
            codec,
        ))
        .merge(catalog_router(PgCatalogRepository::new(pool), resolver))
        .fallback(|| async { AppError::not_found("Route not found") })
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request| {
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    uri = %req.uri(),
                    account_id = tracing::field::Empty,
                )
            }),
        )
        .layer(cors);

    // Start server
    let addr: SocketAddr = env_or("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8080)))?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Token and password settings from the environment
fn load_auth_config() -> anyhow::Result<AuthConfig> {
    let config = match env::var("TOKEN_SECRET") {
        Ok(secret) if !secret.is_empty() => AuthConfig::with_secret(secret.into_bytes()),
        _ if cfg!(debug_assertions) => {
            tracing::warn!("TOKEN_SECRET not set, using a random secret for this process");
            AuthConfig::development()
        }
        _ => anyhow::bail!("TOKEN_SECRET must be set in production"),
    };

    let ttl_secs: u64 = env_or("TOKEN_TTL_SECS", config.token_ttl.as_secs())?;
    let mut config = config
        .token_ttl(Duration::from_secs(ttl_secs))
        .context("TOKEN_TTL_SECS is out of range")?;
    config.password_pepper = env::var("PASSWORD_PEPPER")
        .ok()
        .filter(|pepper| !pepper.is_empty())
        .map(String::into_bytes);

    Ok(config)
}

/// Parse an optional environment variable, falling back to `default`
fn env_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value")),
        Err(_) => Ok(default),
    }
}
