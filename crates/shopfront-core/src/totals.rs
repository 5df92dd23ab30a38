//! Cart total recalculation over rendered text.
//!
//! The summary block is always derived from what is currently rendered,
//! never trusted incrementally. Unparseable line totals and fees count as
//! zero; an unparseable subtotal forces the grand total into its explicit
//! zero state.

use crate::money::{parse_rendered_amount, Amount};
use crate::view::{CartRow, CartView};

/// `quantity × unit_price`.
#[must_use]
pub fn line_total(quantity: u32, unit_price: Amount) -> Amount {
    unit_price.times(quantity)
}

/// Sums rendered line totals; any line that does not parse contributes zero.
pub fn subtotal<'a, I>(line_totals: I) -> Amount
where
    I: IntoIterator<Item = &'a str>,
{
    line_totals
        .into_iter()
        .map(|text| parse_rendered_amount(text).unwrap_or(Amount::ZERO))
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrandTotal {
    Amount(Amount),
    /// The subtotal could not be read; shown as zero instead of an
    /// invalid number.
    ZeroState,
}

impl GrandTotal {
    #[must_use]
    pub fn amount(self) -> Amount {
        match self {
            GrandTotal::Amount(a) => a,
            GrandTotal::ZeroState => Amount::ZERO,
        }
    }

    #[must_use]
    pub fn text(self, currency_label: &str) -> String {
        self.amount().display(currency_label)
    }
}

/// `subtotal + shipping − discount`, read from rendered text.
#[must_use]
pub fn grand_total(subtotal_text: &str, shipping_text: &str, discount_text: &str) -> GrandTotal {
    let Some(subtotal) = parse_rendered_amount(subtotal_text) else {
        return GrandTotal::ZeroState;
    };
    let shipping = parse_rendered_amount(shipping_text).unwrap_or(Amount::ZERO);
    let discount = parse_rendered_amount(discount_text).unwrap_or(Amount::ZERO);
    GrandTotal::Amount(subtotal.saturating_add(shipping).saturating_sub(discount))
}

/// Summary values as last written by [`recalculate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub subtotal: Amount,
    pub shipping_fee: Amount,
    pub discount_fee: Amount,
    pub total: GrandTotal,
}

/// Re-renders a row's line total from its quantity and rendered unit price.
///
/// Returns `false` (and renders a zero total) when the unit price text is
/// not a number.
pub fn rerender_line(row: &mut CartRow, currency_label: &str) -> bool {
    match parse_rendered_amount(&row.unit_price_text) {
        Some(unit) => {
            row.line_total_text = line_total(row.quantity, unit).display(currency_label);
            true
        }
        None => {
            row.line_total_text = Amount::ZERO.display(currency_label);
            false
        }
    }
}

/// Rewrites the subtotal slot from the rendered line totals.
pub fn recalculate_subtotal(view: &mut CartView) -> Amount {
    let sub = subtotal(view.rows().iter().map(|r| r.line_total_text.as_str()));
    view.subtotal_text = sub.display(&view.currency_label);
    sub
}

/// Rewrites the total slot from the rendered subtotal, shipping and discount.
pub fn recalculate_total(view: &mut CartView) -> GrandTotal {
    let total = grand_total(&view.subtotal_text, &view.shipping_text, &view.discount_text);
    view.total_text = total.text(&view.currency_label);
    total
}

/// Full pass: subtotal from lines, then grand total.
pub fn recalculate(view: &mut CartView) -> Summary {
    let subtotal = recalculate_subtotal(view);
    let total = recalculate_total(view);
    Summary {
        subtotal,
        shipping_fee: parse_rendered_amount(&view.shipping_text).unwrap_or(Amount::ZERO),
        discount_fee: parse_rendered_amount(&view.discount_text).unwrap_or(Amount::ZERO),
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(units: u64) -> Amount {
        Amount::new(units)
    }

    #[test]
    fn line_total_is_exact_product() {
        for (q, p) in [(1, 0), (1, 1), (3, 150_000), (12, 99_999)] {
            assert_eq!(line_total(q, amount(p)).units(), u64::from(q) * p);
        }
        assert_eq!(line_total(3, amount(150_000)).display("VND"), "450,000 VND");
    }

    #[test]
    fn subtotal_treats_garbage_lines_as_zero() {
        let lines = ["450,000 VND", "N/A", "", "50,000 VND", "NaN"];
        assert_eq!(subtotal(lines), amount(500_000));
    }

    #[test]
    fn grand_total_zero_state_when_subtotal_unreadable() {
        let total = grand_total("abc", "30,000 VND", "0 VND");
        assert_eq!(total, GrandTotal::ZeroState);
        assert_eq!(total.text("VND"), "0 VND");
    }

    #[test]
    fn grand_total_treats_bad_fees_as_zero() {
        assert_eq!(
            grand_total("100,000 VND", "??", "oops"),
            GrandTotal::Amount(amount(100_000))
        );
    }

    #[test]
    fn grand_total_clamps_large_discount() {
        assert_eq!(
            grand_total("10,000 VND", "0 VND", "50,000 VND"),
            GrandTotal::Amount(Amount::ZERO)
        );
    }

    #[test]
    fn two_line_cart_with_shipping_and_discount() {
        let mut cart = CartView::new("VND", amount(30_000));
        cart.push_row(CartRow::new(1, "Shirt", 3, amount(150_000), "VND"));
        cart.push_row(CartRow::new(2, "Shirt", 3, amount(150_000), "VND"));
        cart.discount_text = amount(50_000).display("VND");

        assert_eq!(cart.rows()[0].line_total_text, "450,000 VND");

        let summary = recalculate(&mut cart);
        assert_eq!(cart.subtotal_text, "900,000 VND");
        assert_eq!(cart.total_text, "880,000 VND");
        assert_eq!(summary.subtotal, amount(900_000));
        assert_eq!(summary.shipping_fee, amount(30_000));
        assert_eq!(summary.discount_fee, amount(50_000));
        assert_eq!(summary.total, GrandTotal::Amount(amount(880_000)));
    }

    #[test]
    fn recalculate_total_shows_zero_state_for_corrupt_subtotal() {
        let mut cart = CartView::new("VND", amount(30_000));
        cart.subtotal_text = "corrupted".to_owned();
        let total = recalculate_total(&mut cart);
        assert_eq!(total, GrandTotal::ZeroState);
        assert_eq!(cart.total_text, "0 VND");
    }

    #[test]
    fn rerender_line_uses_quantity_and_unit_price() {
        let mut row = CartRow::new(1, "Hat", 1, amount(80_000), "VND");
        row.quantity = 4;
        assert!(rerender_line(&mut row, "VND"));
        assert_eq!(row.line_total_text, "320,000 VND");

        row.unit_price_text = "N/A".to_owned();
        assert!(!rerender_line(&mut row, "VND"));
        assert_eq!(row.line_total_text, "0 VND");
    }

    #[test]
    fn empty_cart_subtotal_is_zero() {
        let mut cart = CartView::new("VND", amount(15_000));
        let summary = recalculate(&mut cart);
        assert_eq!(cart.subtotal_text, "0 VND");
        assert_eq!(cart.total_text, "15,000 VND");
        assert_eq!(summary.subtotal, Amount::ZERO);
    }
}
