//! Product page command handlers.

use shopfront_client::{ProductPage, StorefrontClient};
use shopfront_core::{AppConfig, ProductView};

/// Builds a product view holding just the requested variant, selected.
fn variant_view(product_id: Option<i64>, size: Option<&str>, color: Option<&str>) -> ProductView {
    let mut view = ProductView::new(product_id, size, color);
    if let Some(size) = size {
        let _ = view.size.select(size);
    }
    if let Some(color) = color {
        let _ = view.color.select(color);
    }
    view
}

/// Filters options and prints the resolved price of a variant.
///
/// # Errors
///
/// Never fails on storefront errors; those render as the price text.
pub(crate) async fn run_price(
    client: &StorefrontClient,
    config: &AppConfig,
    product_id: Option<i64>,
    size: Option<&str>,
    color: Option<&str>,
) -> anyhow::Result<()> {
    let page = ProductPage::new(config);
    let mut view = variant_view(product_id, size, color);
    page.initialize(client, &mut view).await;

    if size.is_some_and(|s| view.size.is_disabled(s))
        || color.is_some_and(|c| view.color.is_disabled(c))
    {
        println!("(variant currently unavailable)");
    }
    println!("{}", page.price_text(&view));
    Ok(())
}

/// Adds a variant to the cart and prints the storefront's answer.
///
/// # Errors
///
/// Returns an error when the storefront refused the item.
pub(crate) async fn run_add_to_cart(
    client: &StorefrontClient,
    config: &AppConfig,
    product_id: i64,
    size: Option<&str>,
    color: Option<&str>,
    quantity: u32,
) -> anyhow::Result<()> {
    let page = ProductPage::new(config);
    let mut view = variant_view(Some(product_id), size, color);
    view.quantity.set(quantity);

    let added = page.add_to_cart(client, &mut view).await;

    if let Some(modal) = &view.modal {
        println!("[{}] {}", modal.title, modal.body);
    }
    if let Some(message) = &view.message {
        if !added {
            anyhow::bail!(message.text.clone());
        }
        println!("{}", message.text);
    }
    if let Some(count) = view.cart_badge {
        println!("cart: {count} item(s)");
    }
    Ok(())
}
