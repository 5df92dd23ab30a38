pub mod cart;
pub mod client;
pub mod debounce;
pub mod endpoints;
pub mod error;
pub mod options;
pub mod price;
pub mod product;
pub mod search;
pub mod sequence;
pub mod session;
pub mod types;
pub mod voucher;

pub use cart::{CartController, CartOutcome};
pub use client::StorefrontClient;
pub use debounce::Debouncer;
pub use endpoints::Endpoints;
pub use error::StorefrontError;
pub use options::{apply_available_options, filter_options};
pub use price::{PriceResolver, PriceUpdate};
pub use product::ProductPage;
pub use search::{SearchBox, SearchView};
pub use sequence::{RequestSequence, Ticket};
pub use types::{
    AddToCartResponse, ApplyVoucherResponse, AvailableOptions, CartUpdate, PriceQuote,
    QuantityAction, SearchHit,
};
pub use voucher::VoucherPanel;
