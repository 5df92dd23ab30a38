//! Size/color availability for the product page.

use shopfront_core::ProductView;

use crate::client::StorefrontClient;
use crate::types::AvailableOptions;

/// Disables every size and color option that is not in `available`.
/// Options are never removed, and a now-disabled selection is kept so the
/// price lookup can report it as unavailable.
pub fn apply_available_options(view: &mut ProductView, available: &AvailableOptions) {
    view.size.restrict_to(&available.sizes);
    view.color.restrict_to(&available.colors);
}

/// Fetches availability for the view's product and applies it.
///
/// On failure the previous disabled state is left untouched and the error
/// is logged. Returns whether the view was updated.
pub async fn filter_options(client: &StorefrontClient, view: &mut ProductView) -> bool {
    match client.get_available_options(view.product_id).await {
        Ok(available) => {
            tracing::debug!(
                product_id = ?view.product_id,
                sizes = available.sizes.len(),
                colors = available.colors.len(),
                "applying available options"
            );
            apply_available_options(view, &available);
            true
        }
        Err(e) => {
            tracing::error!(product_id = ?view.product_id, error = %e, "available options lookup failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available(sizes: &[&str], colors: &[&str]) -> AvailableOptions {
        AvailableOptions {
            sizes: sizes.iter().map(|s| (*s).to_owned()).collect(),
            colors: colors.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    #[test]
    fn unavailable_options_are_disabled_not_removed() {
        let mut view = ProductView::new(Some(7), ["S", "M", "L"], ["Red", "Blue"]);
        apply_available_options(&mut view, &available(&["M"], &["Blue"]));

        assert_eq!(view.size.options().len(), 3);
        assert!(view.size.is_disabled("S"));
        assert!(!view.size.is_disabled("M"));
        assert!(view.size.is_disabled("L"));
        assert!(view.color.is_disabled("Red"));
        assert!(!view.color.is_disabled("Blue"));
    }

    #[test]
    fn empty_sets_disable_everything() {
        let mut view = ProductView::new(None, ["S"], ["Red"]);
        apply_available_options(&mut view, &AvailableOptions::default());
        assert!(view.size.is_disabled("S"));
        assert!(view.color.is_disabled("Red"));
    }

    #[test]
    fn options_reenable_when_back_in_stock() {
        let mut view = ProductView::new(None, ["S", "M"], ["Red"]);
        apply_available_options(&mut view, &available(&["M"], &["Red"]));
        assert!(view.size.is_disabled("S"));
        apply_available_options(&mut view, &available(&["S", "M"], &["Red"]));
        assert!(!view.size.is_disabled("S"));
    }
}
