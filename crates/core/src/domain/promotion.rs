use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionStatus {
    Enabled,
    Disabled,
    Invalid,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RedemptionType {
    Automatic,
    Coupon,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A promotion as returned by `GET /promotions`. Only the fields we read are modeled.
///
/// Everything but `id` is optional so one odd record cannot fail the whole list; such records
/// simply never pass `is_active`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPromotion {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub status: Option<PromotionStatus>,
    #[serde(default)]
    pub redemption_type: Option<RedemptionType>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub rules: Option<Vec<PromotionRule>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromotionRule {
    #[serde(default)]
    pub action: Option<RuleAction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleAction {
    #[serde(default)]
    pub cart_items: Option<CartItemsAction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartItemsAction {
    #[serde(default)]
    pub discount: Option<Value>,
}

/// The shape handed to the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: i64,
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: RedemptionType,
    pub discount: Option<Value>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl RawPromotion {
    /// `rules[0].action.cart_items.discount`, or `None` if any step is missing.
    pub fn first_cart_discount(&self) -> Option<&Value> {
        self.rules
            .as_deref()?
            .first()?
            .action
            .as_ref()?
            .cart_items
            .as_ref()?
            .discount
            .as_ref()
    }

    pub fn into_projected(self) -> Promotion {
        let discount = self.first_cart_discount().cloned();
        let name = self.name.unwrap_or_default();
        let label = self
            .display_name
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| name.clone());

        Promotion {
            id: self.id,
            name,
            label,
            kind: self.redemption_type.unwrap_or_default(),
            discount,
            start_date: self.start_date.filter(|s| !s.is_empty()),
            end_date: self.end_date.filter(|s| !s.is_empty()),
        }
    }
}
