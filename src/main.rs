//! Travel desk server
//!
//! Serves the inquiry and admin APIs. The gateway handle resolves in the
//! background; until it does, reads report unavailable and writes fail.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

use travel_desk::auth::IdentityVerifier;
use travel_desk::config::Config;
use travel_desk::gateway::{GatewaySlot, InMemoryGateway, RpcGateway};
use travel_desk::middleware;
use travel_desk::state::AppState;

/// Upper bound on the pause between gateway connection attempts
const MAX_CONNECT_BACKOFF: Duration = Duration::from_secs(30);

/// Rate limiter buckets idle this long are dropped
const CLIENT_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!(environment = config.environment.as_str(), "Starting travel desk");

    let gateway = GatewaySlot::unresolved();
    tokio::spawn(connect_gateway(config.clone(), gateway.clone()));

    let submission_limiter = middleware::RateLimiter::per_minute(config.submissions_per_minute);
    tokio::spawn(forget_idle_clients(submission_limiter.clone()));

    let state = AppState::new(gateway, IdentityVerifier::new(config.identity_secret.clone()))
        .with_submission_limiter(submission_limiter);

    let mut app = travel_desk::app(state);
    if config.environment.is_production() {
        app = app.layer(axum::middleware::from_fn(middleware::hsts_header));
    }
    let app = app.layer(configure_cors(config.cors_allowed_origins.as_deref()));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!(%addr, "Travel desk listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Travel desk stopped");
    Ok(())
}

/// Resolve the gateway slot: the remote actor when `GATEWAY_URL` is set,
/// otherwise the in-memory gateway.
async fn connect_gateway(config: Config, slot: GatewaySlot) {
    let Some(url) = config.gateway_url.clone() else {
        let gateway = match &config.bootstrap_admin {
            Some(admin) => {
                tracing::info!(admin = %admin, "Using in-memory gateway with bootstrap admin");
                InMemoryGateway::with_admin(admin.clone())
            }
            None => {
                tracing::warn!("Using in-memory gateway without an admin; admin routes will refuse every caller");
                InMemoryGateway::new()
            }
        };
        slot.resolve(Arc::new(gateway)).await;
        return;
    };

    let mut backoff = Duration::from_secs(1);
    for attempt in 1..=config.gateway_connect_attempts {
        match RpcGateway::connect(url.clone(), config.gateway_timeout()).await {
            Ok(gateway) => {
                slot.resolve(Arc::new(gateway)).await;
                return;
            }
            Err(e) => {
                tracing::warn!(
                    attempt,
                    max_attempts = config.gateway_connect_attempts,
                    endpoint = %url,
                    error = %e,
                    "Gateway connection failed"
                );
                if attempt < config.gateway_connect_attempts {
                    tokio::time::sleep(backoff).await;
                    backoff = (backoff * 2).min(MAX_CONNECT_BACKOFF);
                }
            }
        }
    }

    tracing::error!(
        endpoint = %url,
        "Gateway unreachable; reads stay disabled and writes fail until restart"
    );
}

async fn forget_idle_clients(limiter: middleware::RateLimiter) {
    let mut interval = tokio::time::interval(CLIENT_IDLE_TIMEOUT / 2);
    loop {
        interval.tick().await;
        limiter.cleanup(CLIENT_IDLE_TIMEOUT).await;
    }
}

fn configure_cors(allowed_origins: Option<&str>) -> CorsLayer {
    let allowed_origins = allowed_origins.unwrap_or_default();

    if allowed_origins.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS is empty; accepting every origin");
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Resolves on Ctrl+C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!(signal = "ctrl-c", "Draining connections"),
        _ = terminate => tracing::info!(signal = "sigterm", "Draining connections"),
    }
}
