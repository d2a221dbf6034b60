use crate::domain::model::ContentItem;
use crate::utils::currency;
use chrono::Utc;
use serde::Serialize;

pub const DEFAULT_CURRENCY_CODE: &str = "NGN";

/// Figures shown on the checkout page and handed to the payment popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub price: f64,
    pub original_price: Option<f64>,
    pub savings: f64,
    /// Price in minor units (kobo for NGN). `None` when the price is not representable.
    pub amount_minor: Option<i64>,
    pub currency_code: String,
    pub reference: String,
    pub is_free: bool,
}

impl CheckoutSummary {
    pub fn new(price: f64, original_price: Option<f64>) -> Self {
        // originalPrice 為 0 或缺少時不算折扣
        let savings = match original_price {
            Some(original) if original != 0.0 => currency::subtract(original, price),
            _ => 0.0,
        };

        Self {
            price,
            original_price,
            savings,
            amount_minor: currency::to_minor_units(price),
            currency_code: DEFAULT_CURRENCY_CODE.to_string(),
            reference: payment_reference(),
            is_free: price == 0.0,
        }
    }

    pub fn for_item(item: &ContentItem) -> Self {
        Self::new(item.price, item.original_price)
    }

    pub fn with_currency_code(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }
}

/// Millisecond timestamp, unique enough for a single checkout attempt.
fn payment_reference() -> String {
    Utc::now().timestamp_millis().to_string()
}
