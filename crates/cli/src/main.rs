use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use promo_core::upstream::bigcommerce::BigCommerceClient;
use promo_core::upstream::{fetch_active_promotions, fetch_active_promotions_at};

#[derive(Debug, Parser)]
#[command(name = "promo_cli")]
struct Args {
    /// Evaluate promotion windows at this instant (RFC 3339) instead of now.
    #[arg(long)]
    at: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = promo_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    let at = args.at.as_deref().map(parse_instant).transpose()?;

    let client = BigCommerceClient::from_settings(&settings)?;
    tracing::info!(upstream = client.promotions_url(), ?at, "fetching promotions");

    let result = match at {
        Some(now) => fetch_active_promotions_at(&client, now).await,
        None => fetch_active_promotions(&client).await,
    };

    let promos = match result {
        Ok(promos) => promos,
        Err(err) => {
            let err = anyhow::Error::new(err);
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %err, "promotions fetch failed");
            return Err(err);
        }
    };

    let out = if args.pretty {
        serde_json::to_string_pretty(&promos)?
    } else {
        serde_json::to_string(&promos)?
    };
    println!("{out}");

    tracing::info!(active = promos.len(), "done");
    Ok(())
}

fn parse_instant(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let dt = DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("--at must be an RFC 3339 timestamp (got {s})"))?;
    Ok(dt.with_timezone(&Utc))
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
