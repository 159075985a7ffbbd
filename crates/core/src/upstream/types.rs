use crate::domain::promotion::RawPromotion;
use serde::Deserialize;

/// Envelope of `GET /promotions`. Pagination `meta` is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PromotionsResponse {
    pub data: Vec<RawPromotion>,
}
