//! Rendered page state.
//!
//! Controllers hold no page state of their own. A host owns these
//! snapshots, passes them in by reference, and controllers write the
//! server's answer back into them.

use crate::money::Amount;
use crate::quantity::QuantityStepper;
use crate::CoreError;

/// Text shown when a variant has no price.
pub const UNAVAILABLE_MARKER: &str = "N/A";
/// Text shown when the price lookup itself failed.
pub const PRICE_ERROR_TEXT: &str = "Error fetching price";

/// Product and variant the user has currently chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantSelection {
    pub product_id: Option<i64>,
    pub size: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub disabled: bool,
}

/// A `<select>`-like control. Options are disabled, never removed, so the
/// full catalog stays visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectControl {
    name: String,
    options: Vec<SelectOption>,
    selected: Option<String>,
}

impl SelectControl {
    pub fn new<I, S>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_owned(),
            options: values
                .into_iter()
                .map(|v| SelectOption {
                    value: v.into(),
                    disabled: false,
                })
                .collect(),
            selected: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn is_disabled(&self, value: &str) -> bool {
        self.options
            .iter()
            .any(|o| o.value == value && o.disabled)
    }

    /// Selects `value`, as a user picking it from the list would.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownOption`] if the control has no such option
    /// and [`CoreError::OptionDisabled`] if the option is currently disabled.
    pub fn select(&mut self, value: &str) -> Result<(), CoreError> {
        let option = self
            .options
            .iter()
            .find(|o| o.value == value)
            .ok_or_else(|| CoreError::UnknownOption {
                control: self.name.clone(),
                value: value.to_owned(),
            })?;
        if option.disabled {
            return Err(CoreError::OptionDisabled {
                control: self.name.clone(),
                value: value.to_owned(),
            });
        }
        self.selected = Some(value.to_owned());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Disables every option whose value is not in `available`.
    pub fn restrict_to(&mut self, available: &[String]) {
        for option in &mut self.options {
            option.disabled = !available.iter().any(|a| *a == option.value);
        }
    }
}

/// What the price slot of a product page currently shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriceDisplay {
    /// Nothing resolved yet.
    #[default]
    Pending,
    Amount(Amount),
    Unavailable,
    Error,
}

impl PriceDisplay {
    #[must_use]
    pub fn text(self, currency_label: &str) -> String {
        match self {
            PriceDisplay::Pending => String::new(),
            PriceDisplay::Amount(amount) => amount.display(currency_label),
            PriceDisplay::Unavailable => UNAVAILABLE_MARKER.to_owned(),
            PriceDisplay::Error => PRICE_ERROR_TEXT.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A short inline message next to a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub title: String,
    pub body: String,
}

/// Product detail page.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub product_id: Option<i64>,
    pub size: SelectControl,
    pub color: SelectControl,
    pub price: PriceDisplay,
    pub quantity: QuantityStepper,
    pub message: Option<Notice>,
    pub modal: Option<Modal>,
    /// Item count shown on the cart icon.
    pub cart_badge: Option<u32>,
}

impl ProductView {
    pub fn new<I, J, S, T>(product_id: Option<i64>, sizes: I, colors: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            product_id,
            size: SelectControl::new("size", sizes),
            color: SelectControl::new("color", colors),
            price: PriceDisplay::Pending,
            quantity: QuantityStepper::default(),
            message: None,
            modal: None,
            cart_badge: None,
        }
    }

    #[must_use]
    pub fn selection(&self) -> VariantSelection {
        VariantSelection {
            product_id: self.product_id,
            size: self.size.selected().map(str::to_owned),
            color: self.color.selected().map(str::to_owned),
        }
    }
}

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    pub item_id: i64,
    pub product_id: Option<i64>,
    pub name: String,
    /// Category name, used for voucher eligibility.
    pub category: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: u32,
    pub unit_price_text: String,
    pub line_total_text: String,
    pub error: Option<String>,
}

impl CartRow {
    /// Builds a row with its totals rendered from `unit_price`.
    pub fn new(
        item_id: i64,
        name: impl Into<String>,
        quantity: u32,
        unit_price: Amount,
        currency_label: &str,
    ) -> Self {
        Self {
            item_id,
            product_id: None,
            name: name.into(),
            category: None,
            size: None,
            color: None,
            quantity,
            unit_price_text: unit_price.display(currency_label),
            line_total_text: unit_price.times(quantity).display(currency_label),
            error: None,
        }
    }
}

/// Cart page: rows plus the summary block.
#[derive(Debug, Clone)]
pub struct CartView {
    rows: Vec<CartRow>,
    pub currency_label: String,
    pub subtotal_text: String,
    pub shipping_text: String,
    pub discount_text: String,
    pub total_text: String,
    pub voucher_message: Option<Notice>,
    pub applied_voucher: Option<i64>,
    reload_requested: bool,
}

impl CartView {
    #[must_use]
    pub fn new(currency_label: &str, shipping_fee: Amount) -> Self {
        Self {
            rows: Vec::new(),
            currency_label: currency_label.to_owned(),
            subtotal_text: Amount::ZERO.display(currency_label),
            shipping_text: shipping_fee.display(currency_label),
            discount_text: Amount::ZERO.display(currency_label),
            total_text: shipping_fee.display(currency_label),
            voucher_message: None,
            applied_voucher: None,
            reload_requested: false,
        }
    }

    pub fn push_row(&mut self, row: CartRow) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn rows(&self) -> &[CartRow] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, item_id: i64) -> Option<&CartRow> {
        self.rows.iter().find(|r| r.item_id == item_id)
    }

    /// # Errors
    ///
    /// Returns [`CoreError::UnknownCartItem`] if no row has `item_id`.
    pub fn row_mut(&mut self, item_id: i64) -> Result<&mut CartRow, CoreError> {
        self.rows
            .iter_mut()
            .find(|r| r.item_id == item_id)
            .ok_or(CoreError::UnknownCartItem(item_id))
    }

    /// Removes exactly the row for `item_id`; other rows are untouched.
    pub fn remove_row(&mut self, item_id: i64) -> Option<CartRow> {
        let idx = self.rows.iter().position(|r| r.item_id == item_id)?;
        Some(self.rows.remove(idx))
    }

    /// Distinct category names across all rows.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for category in self.rows.iter().filter_map(|r| r.category.as_ref()) {
            if !out.contains(category) {
                out.push(category.clone());
            }
        }
        out
    }

    /// Marks the view stale; the host must re-fetch the cart page.
    pub fn request_reload(&mut self) {
        self.reload_requested = true;
    }

    #[must_use]
    pub fn reload_requested(&self) -> bool {
        self.reload_requested
    }

    /// Clears and returns the reload flag.
    pub fn take_reload(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }

    #[must_use]
    pub fn render(&self) -> String {
        use std::fmt::Write as _;

        let mut out = String::new();
        for row in &self.rows {
            let variant = [row.size.as_deref(), row.color.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" / ");
            let _ = writeln!(
                out,
                "#{:<6} {:<30} {:<12} x{:<4} {:>16} {:>16}",
                row.item_id, row.name, variant, row.quantity, row.unit_price_text, row.line_total_text
            );
            if let Some(err) = &row.error {
                let _ = writeln!(out, "        ! {err}");
            }
        }
        let _ = writeln!(out, "Subtotal: {}", self.subtotal_text);
        let _ = writeln!(out, "Shipping: {}", self.shipping_text);
        let _ = writeln!(out, "Discount: {}", self.discount_text);
        let _ = write!(out, "Total:    {}", self.total_text);
        if let Some(notice) = &self.voucher_message {
            let _ = write!(out, "\n{}", notice.text);
        }
        out
    }
}
