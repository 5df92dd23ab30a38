//! Product detail page: option filtering, price display and add to cart.

use shopfront_core::{AddToCartMode, AppConfig, CoreError, Modal, Notice, ProductView};

use crate::client::StorefrontClient;
use crate::options::filter_options;
use crate::price::PriceResolver;

const VARIANT_UNAVAILABLE: &str = "This size and color combination is not available.";
const ADDED_TITLE: &str = "Added to cart";
const ADDED_DEFAULT: &str = "Product added to cart successfully!";

/// Drives one product page. Selector changes flow through option
/// filtering into a price refresh.
#[derive(Debug, Clone)]
pub struct ProductPage {
    price: PriceResolver,
    mode: AddToCartMode,
    currency_label: String,
}

impl ProductPage {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self::with_options(
            PriceResolver::from_config(config),
            config.add_to_cart_mode,
            &config.currency_label,
        )
    }

    #[must_use]
    pub fn with_options(price: PriceResolver, mode: AddToCartMode, currency_label: &str) -> Self {
        Self {
            price,
            mode,
            currency_label: currency_label.to_owned(),
        }
    }

    #[must_use]
    pub fn resolver(&self) -> &PriceResolver {
        &self.price
    }

    /// Filters options, then refreshes the price. The refresh runs even if
    /// the options request failed.
    pub async fn initialize(&self, client: &StorefrontClient, view: &mut ProductView) {
        filter_options(client, view).await;
        self.price.refresh(client, view).await;
    }

    /// Selects a size and re-prices.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] if the size is unknown or disabled; no request
    /// is made in that case.
    pub async fn select_size(
        &self,
        client: &StorefrontClient,
        view: &mut ProductView,
        size: &str,
    ) -> Result<(), CoreError> {
        view.size.select(size)?;
        self.initialize(client, view).await;
        Ok(())
    }

    /// Selects a color and re-prices.
    ///
    /// # Errors
    ///
    /// See [`ProductPage::select_size`].
    pub async fn select_color(
        &self,
        client: &StorefrontClient,
        view: &mut ProductView,
        color: &str,
    ) -> Result<(), CoreError> {
        view.color.select(color)?;
        self.initialize(client, view).await;
        Ok(())
    }

    #[must_use]
    pub fn price_text(&self, view: &ProductView) -> String {
        view.price.text(&self.currency_label)
    }

    /// Adds the current selection, at the stepper's quantity, to the cart.
    ///
    /// The confirmation lands in the inline message slot or in a modal,
    /// depending on the configured mode; any failure is shown inline.
    /// Returns whether the item was added.
    pub async fn add_to_cart(&self, client: &StorefrontClient, view: &mut ProductView) -> bool {
        view.message = None;
        view.modal = None;

        let selection = view.selection();
        let detail_id = match client.get_product_detail_id(&selection).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                view.message = Some(Notice::error(VARIANT_UNAVAILABLE));
                return false;
            }
            Err(e) => {
                tracing::error!(product_id = ?selection.product_id, error = %e, "product detail lookup failed");
                view.message = Some(Notice::error(e.user_message()));
                return false;
            }
        };

        let quantity = view.quantity.value();
        match client.add_to_cart(detail_id, quantity).await {
            Ok(response) => {
                if let Some(count) = response.cart_length {
                    view.cart_badge = Some(count);
                }
                let text = response
                    .message
                    .unwrap_or_else(|| ADDED_DEFAULT.to_owned());
                tracing::info!(product_detail_id = detail_id, quantity, "added to cart");
                match self.mode {
                    AddToCartMode::Inline => view.message = Some(Notice::success(text)),
                    AddToCartMode::Modal => {
                        view.modal = Some(Modal {
                            title: ADDED_TITLE.to_owned(),
                            body: text,
                        });
                    }
                }
                true
            }
            Err(e) => {
                tracing::error!(product_detail_id = detail_id, quantity, error = %e, "add to cart failed");
                view.message = Some(Notice::error(e.user_message()));
                false
            }
        }
    }
}
