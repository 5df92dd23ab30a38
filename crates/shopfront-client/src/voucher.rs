//! Voucher selection on the cart page.

use chrono::{DateTime, Utc};
use shopfront_core::{
    eligible_vouchers, parse_rendered_amount, recalculate, Amount, CartView, Notice, Voucher,
};

use crate::client::StorefrontClient;
use crate::error::StorefrontError;

const APPLIED_DEFAULT: &str = "Voucher applied.";

#[derive(Debug, Clone, Copy, Default)]
pub struct VoucherPanel;

impl VoucherPanel {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Vouchers the cart qualifies for right now.
    ///
    /// # Errors
    ///
    /// Propagates the voucher list request's [`StorefrontError`].
    pub async fn list_eligible(
        &self,
        client: &StorefrontClient,
        view: &CartView,
    ) -> Result<Vec<Voucher>, StorefrontError> {
        self.list_eligible_at(client, view, Utc::now()).await
    }

    /// As [`VoucherPanel::list_eligible`], at a fixed instant.
    ///
    /// # Errors
    ///
    /// Propagates the voucher list request's [`StorefrontError`].
    pub async fn list_eligible_at(
        &self,
        client: &StorefrontClient,
        view: &CartView,
        now: DateTime<Utc>,
    ) -> Result<Vec<Voucher>, StorefrontError> {
        let vouchers = client.get_vouchers().await?;
        let subtotal = parse_rendered_amount(&view.subtotal_text).unwrap_or(Amount::ZERO);
        let categories = view.categories();
        let eligible: Vec<Voucher> = eligible_vouchers(&vouchers, subtotal, &categories, now)
            .into_iter()
            .cloned()
            .collect();
        tracing::debug!(
            offered = vouchers.len(),
            eligible = eligible.len(),
            subtotal = subtotal.units(),
            "vouchers filtered"
        );
        Ok(eligible)
    }

    /// Applies `voucher` to the cart. On success the discount slot is
    /// rewritten and the subtotal and total are recomputed from the lines; on failure the server's message is shown in
    /// the voucher slot and nothing else changes.
    pub async fn apply(
        &self,
        client: &StorefrontClient,
        view: &mut CartView,
        voucher: &Voucher,
    ) -> bool {
        let subtotal = parse_rendered_amount(&view.subtotal_text).unwrap_or(Amount::ZERO);
        match client
            .apply_voucher(voucher.id, subtotal, voucher.min_amount)
            .await
        {
            Ok(response) => {
                let discount = response.discount_amount.unwrap_or(Amount::ZERO);
                view.discount_text = discount.display(&view.currency_label);
                view.applied_voucher = Some(voucher.id);
                view.voucher_message = Some(Notice::success(
                    response
                        .message
                        .unwrap_or_else(|| APPLIED_DEFAULT.to_owned()),
                ));
                let summary = recalculate(view);
                if let Some(server_total) = response.final_price {
                    if server_total != summary.total.amount() {
                        tracing::warn!(
                            voucher_id = voucher.id,
                            client = summary.total.amount().units(),
                            server = server_total.units(),
                            "rendered total differs from server"
                        );
                    }
                }
                tracing::info!(voucher_id = voucher.id, discount = discount.units(), "voucher applied");
                true
            }
            Err(e) => {
                tracing::warn!(voucher_id = voucher.id, error = %e, "voucher rejected");
                view.voucher_message = Some(Notice::error(e.user_message()));
                false
            }
        }
    }
}
