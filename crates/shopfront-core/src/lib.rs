pub mod app_config;
pub mod config;
pub mod money;
pub mod otp;
pub mod quantity;
pub mod totals;
pub mod view;
pub mod voucher;

pub use app_config::{AddToCartMode, AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use money::{group_thousands, parse_rendered_amount, Amount, DEFAULT_CURRENCY_LABEL};
pub use otp::OtpInput;
pub use quantity::QuantityStepper;
pub use totals::{grand_total, line_total, recalculate, subtotal, GrandTotal, Summary};
pub use view::{
    CartRow, CartView, Modal, Notice, NoticeKind, PriceDisplay, ProductView, SelectControl,
    SelectOption, VariantSelection,
};
pub use voucher::{eligible_vouchers, Voucher};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("{control} has no option \"{value}\"")]
    UnknownOption { control: String, value: String },

    #[error("{control} option \"{value}\" is not available")]
    OptionDisabled { control: String, value: String },

    #[error("OTP input needs at least one cell")]
    InvalidOtpLength,

    #[error("no cart row for item {0}")]
    UnknownCartItem(i64),
}
