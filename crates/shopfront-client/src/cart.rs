//! Cart page mutations.
//!
//! Each mutation is one round trip. The server decides the resulting
//! quantity and whether the line survives; the controller writes that into
//! the [`CartView`] and re-derives the summary from the rendered lines.
//! Any failure leaves the row flagged and asks the host to reload the page.

use shopfront_core::totals::{recalculate, rerender_line};
use shopfront_core::view::UNAVAILABLE_MARKER;
use shopfront_core::{AppConfig, CartView, Notice, VariantSelection};

use crate::client::StorefrontClient;
use crate::error::StorefrontError;
use crate::price::PriceResolver;
use crate::types::{CartUpdate, QuantityAction};

/// What a mutation did to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOutcome {
    Updated,
    Removed,
    /// The view is out of date; the host should re-fetch the cart.
    Reload,
}

#[derive(Debug, Clone)]
pub struct CartController {
    currency_label: String,
    price: PriceResolver,
}

impl CartController {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self::with_options(&config.currency_label, PriceResolver::from_config(config))
    }

    #[must_use]
    pub fn with_options(currency_label: &str, price: PriceResolver) -> Self {
        Self {
            currency_label: currency_label.to_owned(),
            price,
        }
    }

    pub async fn increment(
        &self,
        client: &StorefrontClient,
        view: &mut CartView,
        item_id: i64,
    ) -> CartOutcome {
        let result = client
            .update_quantity(item_id, QuantityAction::Increase, None)
            .await;
        self.finish(view, item_id, "increase", result)
    }

    pub async fn decrement(
        &self,
        client: &StorefrontClient,
        view: &mut CartView,
        item_id: i64,
    ) -> CartOutcome {
        let result = client
            .update_quantity(item_id, QuantityAction::Decrease, None)
            .await;
        self.finish(view, item_id, "decrease", result)
    }

    pub async fn set_quantity(
        &self,
        client: &StorefrontClient,
        view: &mut CartView,
        item_id: i64,
        quantity: u32,
    ) -> CartOutcome {
        let result = client
            .update_quantity(item_id, QuantityAction::Update, Some(quantity))
            .await;
        self.finish(view, item_id, "update", result)
    }

    pub async fn remove(
        &self,
        client: &StorefrontClient,
        view: &mut CartView,
        item_id: i64,
    ) -> CartOutcome {
        let result = client.remove_item(item_id).await;
        match result {
            Ok(mut update) => {
                update.removed = true;
                self.apply_update(view, item_id, update)
            }
            Err(e) => Self::fail(view, item_id, "remove", &e),
        }
    }

    /// Moves a line to another size/color and quantity, then re-prices it
    /// from the price endpoint.
    pub async fn change_variant(
        &self,
        client: &StorefrontClient,
        view: &mut CartView,
        item_id: i64,
        quantity: u32,
        size: Option<&str>,
        color: Option<&str>,
    ) -> CartOutcome {
        let Some(product_id) = view.row(item_id).map(|r| r.product_id) else {
            return Self::out_of_sync(view, item_id);
        };

        match client.update_cart_item(item_id, quantity, size, color).await {
            Ok(message) => {
                tracing::debug!(item_id, message = ?message, "cart item variant changed");
            }
            Err(e) => return Self::fail(view, item_id, "variant", &e),
        }

        let selection = VariantSelection {
            product_id,
            size: size.map(str::to_owned),
            color: color.map(str::to_owned),
        };
        let unit_price = match client.get_price(&selection).await {
            Ok(quote) => self.price.quote_amount(&quote),
            Err(e) => return Self::fail(view, item_id, "variant", &e),
        };

        let Ok(row) = view.row_mut(item_id) else {
            return Self::out_of_sync(view, item_id);
        };
        row.size = selection.size;
        row.color = selection.color;
        row.quantity = quantity;
        row.error = None;
        match unit_price {
            Some(unit) => row.unit_price_text = unit.display(&self.currency_label),
            None => {
                tracing::warn!(item_id, "no price quoted for new variant");
                row.error = Some(UNAVAILABLE_MARKER.to_owned());
                view.request_reload();
                return CartOutcome::Reload;
            }
        }
        rerender_line(row, &self.currency_label);
        recalculate(view);
        CartOutcome::Updated
    }

    fn finish(
        &self,
        view: &mut CartView,
        item_id: i64,
        action: &str,
        result: Result<CartUpdate, StorefrontError>,
    ) -> CartOutcome {
        match result {
            Ok(update) => self.apply_update(view, item_id, update),
            Err(e) => Self::fail(view, item_id, action, &e),
        }
    }

    /// Writes a successful response into the view and recalculates.
    pub fn apply_update(&self, view: &mut CartView, item_id: i64, update: CartUpdate) -> CartOutcome {
        let label = self.currency_label.as_str();

        let outcome = if update.removed || update.quantity == Some(0) {
            view.remove_row(item_id);
            CartOutcome::Removed
        } else {
            let Ok(row) = view.row_mut(item_id) else {
                return Self::out_of_sync(view, item_id);
            };
            row.error = None;
            if let Some(quantity) = update.quantity {
                row.quantity = quantity;
            }
            match update.total {
                Some(total) => row.line_total_text = total.display(label),
                None => {
                    rerender_line(row, label);
                }
            }
            CartOutcome::Updated
        };

        if let Some(discount) = update.discount_fee {
            view.discount_text = discount.display(label);
        }
        if let Some(message) = update.message {
            view.voucher_message = Some(Notice::success(message));
            view.applied_voucher = None;
        }

        let summary = recalculate(view);
        if let Some(server_subtotal) = update.subtotal {
            if server_subtotal != summary.subtotal {
                tracing::warn!(
                    item_id,
                    client = summary.subtotal.units(),
                    server = server_subtotal.units(),
                    "rendered subtotal differs from server"
                );
            }
        }
        outcome
    }

    fn fail(
        view: &mut CartView,
        item_id: i64,
        action: &str,
        error: &StorefrontError,
    ) -> CartOutcome {
        tracing::error!(item_id, action, error = %error, "cart update failed");
        if let Ok(row) = view.row_mut(item_id) {
            row.error = Some(error.user_message());
        }
        view.request_reload();
        CartOutcome::Reload
    }

    fn out_of_sync(view: &mut CartView, item_id: i64) -> CartOutcome {
        tracing::warn!(item_id, "cart row not found in view");
        view.request_reload();
        CartOutcome::Reload
    }
}
