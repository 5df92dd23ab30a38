//! Variant price lookup for the product page.

use shopfront_core::{Amount, AppConfig, PriceDisplay, ProductView, VariantSelection};

use crate::client::StorefrontClient;
use crate::sequence::{RequestSequence, Ticket};
use crate::types::PriceQuote;

/// A resolved lookup, tagged with the ticket it was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceUpdate {
    pub ticket: Ticket,
    pub display: PriceDisplay,
}

/// Fetches variant prices and writes them into a [`ProductView`].
///
/// Every lookup takes a ticket; only the newest lookup may write, so a slow
/// response for an earlier selection cannot overwrite a newer price.
#[derive(Debug, Clone)]
pub struct PriceResolver {
    sequence: RequestSequence,
    fallback: bool,
}

impl PriceResolver {
    /// `fallback` enables the `product_price` branch when no explicit
    /// variant price is quoted.
    #[must_use]
    pub fn new(fallback: bool) -> Self {
        Self {
            sequence: RequestSequence::new(),
            fallback,
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.price_fallback)
    }

    #[must_use]
    pub fn fallback_enabled(&self) -> bool {
        self.fallback
    }

    /// Amount to show for a quote, if any: explicit price first, then the
    /// product price when the fallback is on. Zero counts as missing.
    #[must_use]
    pub fn quote_amount(&self, quote: &PriceQuote) -> Option<Amount> {
        let nonzero = |a: &Amount| *a != Amount::ZERO;
        quote.price.filter(nonzero).or_else(|| {
            if self.fallback {
                quote.product_price.filter(nonzero)
            } else {
                None
            }
        })
    }

    #[must_use]
    pub fn resolve_quote(&self, quote: &PriceQuote) -> PriceDisplay {
        self.quote_amount(quote)
            .map_or(PriceDisplay::Unavailable, PriceDisplay::Amount)
    }

    /// Issues a ticket and looks up the price. Failures are logged and
    /// resolve to [`PriceDisplay::Error`].
    pub async fn fetch(
        &self,
        client: &StorefrontClient,
        selection: &VariantSelection,
    ) -> PriceUpdate {
        let ticket = self.sequence.issue();
        let display = match client.get_price(selection).await {
            Ok(quote) => self.resolve_quote(&quote),
            Err(e) => {
                tracing::error!(
                    product_id = ?selection.product_id,
                    size = ?selection.size,
                    color = ?selection.color,
                    error = %e,
                    "price lookup failed"
                );
                PriceDisplay::Error
            }
        };
        PriceUpdate { ticket, display }
    }

    /// Writes `update` into the view unless a newer lookup has been issued.
    /// Returns whether it was written.
    pub fn apply(&self, view: &mut ProductView, update: PriceUpdate) -> bool {
        if !self.sequence.is_latest(update.ticket) {
            tracing::debug!(ticket = update.ticket.value(), "discarding stale price response");
            return false;
        }
        view.price = update.display;
        true
    }

    /// Looks up the price of the view's current selection and writes it.
    pub async fn refresh(&self, client: &StorefrontClient, view: &mut ProductView) -> bool {
        let update = self.fetch(client, &view.selection()).await;
        self.apply(view, update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(price: Option<u64>, product_price: Option<u64>) -> PriceQuote {
        PriceQuote {
            price: price.map(Amount::new),
            product_price: product_price.map(Amount::new),
        }
    }

    #[test]
    fn explicit_price_wins() {
        let resolver = PriceResolver::new(true);
        assert_eq!(
            resolver.resolve_quote(&quote(Some(150_000), Some(120_000))),
            PriceDisplay::Amount(Amount::new(150_000))
        );
    }

    #[test]
    fn falls_back_to_product_price() {
        let resolver = PriceResolver::new(true);
        assert_eq!(
            resolver.resolve_quote(&quote(None, Some(120_000))),
            PriceDisplay::Amount(Amount::new(120_000))
        );
    }

    #[test]
    fn zero_price_falls_through() {
        let resolver = PriceResolver::new(true);
        assert_eq!(
            resolver.resolve_quote(&quote(Some(0), Some(99_000))),
            PriceDisplay::Amount(Amount::new(99_000))
        );
    }

    #[test]
    fn empty_quote_is_unavailable() {
        let resolver = PriceResolver::new(true);
        let display = resolver.resolve_quote(&PriceQuote::default());
        assert_eq!(display, PriceDisplay::Unavailable);
        assert_eq!(display.text("VND"), "N/A");
    }

    #[test]
    fn fallback_disabled_ignores_product_price() {
        let resolver = PriceResolver::new(false);
        assert_eq!(
            resolver.resolve_quote(&quote(None, Some(120_000))),
            PriceDisplay::Unavailable
        );
    }

    #[test]
    fn stale_update_is_discarded() {
        let resolver = PriceResolver::new(true);
        let mut view = ProductView::new(Some(1), ["M"], ["Red"]);

        let old = PriceUpdate {
            ticket: resolver.sequence.issue(),
            display: PriceDisplay::Amount(Amount::new(100)),
        };
        let new = PriceUpdate {
            ticket: resolver.sequence.issue(),
            display: PriceDisplay::Amount(Amount::new(200)),
        };

        assert!(resolver.apply(&mut view, new));
        assert!(!resolver.apply(&mut view, old));
        assert_eq!(view.price, PriceDisplay::Amount(Amount::new(200)));
    }
}
