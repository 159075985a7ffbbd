pub mod bigcommerce;
pub mod error;
pub mod types;

pub use error::FetchError;

use crate::domain::promotion::{Promotion, RawPromotion};
use crate::selection::select_active;
use chrono::{DateTime, Utc};

#[async_trait::async_trait]
pub trait PromotionSource: Send + Sync {
    fn source_name(&self) -> &'static str;

    /// Every promotion upstream knows about, in upstream order.
    async fn fetch_promotions(&self) -> Result<Vec<RawPromotion>, FetchError>;
}

/// Fetches promotions and keeps the ones active right now.
///
/// `now` is taken once, after the upstream call returns, and shared by every comparison.
pub async fn fetch_active_promotions(
    source: &dyn PromotionSource,
) -> Result<Vec<Promotion>, FetchError> {
    let raw = source.fetch_promotions().await?;
    Ok(select_and_log(source, raw, Utc::now()))
}

pub async fn fetch_active_promotions_at(
    source: &dyn PromotionSource,
    now: DateTime<Utc>,
) -> Result<Vec<Promotion>, FetchError> {
    let raw = source.fetch_promotions().await?;
    Ok(select_and_log(source, raw, now))
}

fn select_and_log(
    source: &dyn PromotionSource,
    raw: Vec<RawPromotion>,
    now: DateTime<Utc>,
) -> Vec<Promotion> {
    let upstream = raw.len();
    let active = select_active(raw, now);
    tracing::debug!(
        source = source.source_name(),
        upstream,
        active = active.len(),
        %now,
        "selected active promotions"
    );
    active
}
