//! Storefront response and request types.
//!
//! Field names follow the server's snake_case JSON; camelCase aliases are
//! accepted where older views emitted them.

use serde::{Deserialize, Deserializer, Serialize};
use shopfront_core::{Amount, Voucher};

/// Sent in place of an unselected size, color or product id.
pub const ABSENT_SENTINEL: &str = "None";

// ---------------------------------------------------------------------------
// Product page
// ---------------------------------------------------------------------------

/// Answer of the price lookup.
///
/// At most one of the two amounts is meaningful; neither means the variant
/// is unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PriceQuote {
    #[serde(default)]
    pub price: Option<Amount>,
    #[serde(default, alias = "productPrice")]
    pub product_price: Option<Amount>,
}

/// Sizes and colors that can currently be bought.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AvailableOptions {
    #[serde(default, deserialize_with = "strings_skipping_null")]
    pub sizes: Vec<String>,
    #[serde(default, deserialize_with = "strings_skipping_null")]
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ProductDetailIdResponse {
    #[serde(default, alias = "productDetailId")]
    pub product_detail_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddToCartResponse {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// Number of distinct lines now in the cart.
    #[serde(default, alias = "cartLength")]
    pub cart_length: Option<u32>,
}

// ---------------------------------------------------------------------------
// Cart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityAction {
    Increase,
    Decrease,
    Update,
}

impl QuantityAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuantityAction::Increase => "increase",
            QuantityAction::Decrease => "decrease",
            QuantityAction::Update => "update",
        }
    }
}

/// Answer of the quantity-update and remove endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CartUpdate {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub removed: bool,
    /// New line total for the affected row.
    #[serde(default)]
    pub total: Option<Amount>,
    #[serde(default)]
    pub subtotal: Option<Amount>,
    #[serde(default, alias = "totalPrice")]
    pub total_price: Option<Amount>,
    #[serde(default, alias = "discountFee")]
    pub discount_fee: Option<Amount>,
    /// Follow-up notice, e.g. asking the user to pick a voucher again.
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RemoveItemRequest {
    pub item_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UpdateCartItemRequest<'a> {
    pub item_id: i64,
    pub quantity: u32,
    pub size: &'a str,
    pub color: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchHit {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

// ---------------------------------------------------------------------------
// Vouchers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct VouchersResponse {
    #[serde(default)]
    pub vouchers: Vec<Voucher>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApplyVoucherResponse {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default, alias = "discountAmount")]
    pub discount_amount: Option<Amount>,
    #[serde(default, alias = "finalPrice")]
    pub final_price: Option<Amount>,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Option lists may contain `null` for variants without a size or color.
fn strings_skipping_null<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Option<String>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_quote_accepts_both_spellings() {
        let q: PriceQuote = serde_json::from_str(r#"{"productPrice": "120000.00"}"#).unwrap();
        assert_eq!(q.product_price, Some(Amount::new(120_000)));
        assert_eq!(q.price, None);

        let q: PriceQuote = serde_json::from_str(r#"{"price": 150000, "product_price": null}"#).unwrap();
        assert_eq!(q.price, Some(Amount::new(150_000)));
        assert_eq!(q.product_price, None);
    }

    #[test]
    fn empty_price_quote_has_no_amounts() {
        let q: PriceQuote = serde_json::from_str("{}").unwrap();
        assert_eq!(q, PriceQuote::default());
    }

    #[test]
    fn available_options_skip_nulls() {
        let o: AvailableOptions =
            serde_json::from_str(r#"{"sizes": ["M", null, "L"], "colors": null}"#).unwrap();
        assert_eq!(o.sizes, vec!["M".to_owned(), "L".to_owned()]);
        assert!(o.colors.is_empty());
    }

    #[test]
    fn cart_update_matches_remove_payload() {
        let u: CartUpdate = serde_json::from_value(serde_json::json!({
            "success": true,
            "quantity": 0,
            "removed": true,
            "subtotal": 0,
            "total_price": 25000,
            "discount_fee": 0,
            "message": "Please select a voucher again."
        }))
        .unwrap();
        assert!(u.removed);
        assert_eq!(u.total_price, Some(Amount::new(25_000)));
        assert_eq!(u.message.as_deref(), Some("Please select a voucher again."));
    }

    #[test]
    fn quantity_action_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&QuantityAction::Increase).unwrap(),
            "\"increase\""
        );
        assert_eq!(QuantityAction::Decrease.as_str(), "decrease");
    }
}
