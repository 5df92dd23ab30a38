/// Paths of the storefront's AJAX endpoints, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub price: String,
    pub available_options: String,
    pub product_detail_id: String,
    pub add_to_cart: String,
    pub update_quantity: String,
    pub remove_item: String,
    pub update_cart_item: String,
    pub search: String,
    pub vouchers: String,
    pub apply_voucher: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            price: "/get-price/".to_owned(),
            available_options: "/get-available-options/".to_owned(),
            product_detail_id: "/get-product-detail-id/".to_owned(),
            add_to_cart: "/add-to-cart/".to_owned(),
            update_quantity: "/update-quantity/".to_owned(),
            remove_item: "/remove-cart-item/".to_owned(),
            update_cart_item: "/update-cart-item/".to_owned(),
            search: "/search/".to_owned(),
            vouchers: "/get-vouchers/".to_owned(),
            apply_voucher: "/apply-voucher/".to_owned(),
        }
    }
}
