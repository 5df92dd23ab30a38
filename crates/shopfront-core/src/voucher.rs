//! Vouchers offered by the storefront and client-side eligibility.
//!
//! The server remains the judge when a voucher is applied; eligibility here
//! only decides which vouchers are worth offering for the current cart.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::money::{deserialize_decimal, Amount};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: i64,
    /// Category names the voucher is limited to; ignored for global vouchers.
    #[serde(default, deserialize_with = "string_or_number_list")]
    pub categories: Vec<String>,
    /// Discount percentage, e.g. `10` for 10 %. Accepts `"10.00"` too.
    #[serde(deserialize_with = "deserialize_decimal")]
    pub discount: Decimal,
    #[serde(default, alias = "minAmount")]
    pub min_amount: Amount,
    #[serde(default, alias = "isGlobal")]
    pub is_global: bool,
    #[serde(default, alias = "startedAt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "endedAt")]
    pub ended_at: Option<DateTime<Utc>>,
}

impl Voucher {
    /// Inside its validity window. Missing bounds are open.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.started_at.is_none_or(|start| start <= now)
            && self.ended_at.is_none_or(|end| now < end)
    }

    #[must_use]
    pub fn applies_to(&self, cart_categories: &[String]) -> bool {
        self.is_global || self.categories.iter().any(|c| cart_categories.contains(c))
    }

    #[must_use]
    pub fn is_eligible(
        &self,
        subtotal: Amount,
        cart_categories: &[String],
        now: DateTime<Utc>,
    ) -> bool {
        subtotal >= self.min_amount && self.applies_to(cart_categories) && self.is_active_at(now)
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!("Voucher {} - {}%", self.id, self.discount.normalize())
    }
}

/// Vouchers the cart currently qualifies for, in the order given.
#[must_use]
pub fn eligible_vouchers<'a>(
    vouchers: &'a [Voucher],
    subtotal: Amount,
    cart_categories: &[String],
    now: DateTime<Utc>,
) -> Vec<&'a Voucher> {
    vouchers
        .iter()
        .filter(|v| v.is_eligible(subtotal, cart_categories, now))
        .collect()
}

/// Category lists arrive as names or as numeric ids depending on the view.
fn string_or_number_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Item {
        Text(String),
        Number(i64),
    }

    let items = Option::<Vec<Item>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items
        .into_iter()
        .map(|item| match item {
            Item::Text(s) => s,
            Item::Number(n) => n.to_string(),
        })
        .collect())
}
