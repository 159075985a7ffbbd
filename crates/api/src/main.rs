use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use promo_api::{build_router, AppState, PROMOTIONS_ROUTE};
use promo_core::upstream::bigcommerce::BigCommerceClient;

const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = promo_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let client = match BigCommerceClient::from_settings(&settings) {
        Ok(client) => client,
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "BigCommerce client configuration invalid");
            return Err(e);
        }
    };
    tracing::info!(upstream = client.promotions_url(), "promotions source configured");

    let state = AppState {
        source: Arc::new(client),
    };
    let app = build_router(state);

    // Azure Functions custom handlers are told where to listen via this variable.
    let port: u16 = ["FUNCTIONS_CUSTOMHANDLER_PORT", "PORT"]
        .iter()
        .find_map(|key| std::env::var(key).ok().and_then(|v| v.parse().ok()))
        .unwrap_or(DEFAULT_PORT);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, route = PROMOTIONS_ROUTE, "api listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &promo_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
