#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Where the add-to-cart flow shows the server's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddToCartMode {
    /// Message slot next to the add-to-cart button.
    #[default]
    Inline,
    /// Confirmation modal.
    Modal,
}

impl std::fmt::Display for AddToCartMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddToCartMode::Inline => write!(f, "inline"),
            AddToCartMode::Modal => write!(f, "modal"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Storefront origin, e.g. `https://shop.example.com`.
    pub base_url: String,
    pub env: Environment,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Pre-seeded CSRF token; otherwise captured from the `csrftoken` cookie.
    pub csrf_token: Option<String>,
    /// Pre-seeded `sessionid` cookie for an already logged-in user.
    pub session_id: Option<String>,
    pub search_debounce_ms: u64,
    pub currency_label: String,
    /// Fall back to the product-level price when a variant has none.
    pub price_fallback: bool,
    pub add_to_cart_mode: AddToCartMode,
    pub otp_length: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("base_url", &self.base_url)
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("csrf_token", &self.csrf_token.as_ref().map(|_| "[redacted]"))
            .field("session_id", &self.session_id.as_ref().map(|_| "[redacted]"))
            .field("search_debounce_ms", &self.search_debounce_ms)
            .field("currency_label", &self.currency_label)
            .field("price_fallback", &self.price_fallback)
            .field("add_to_cart_mode", &self.add_to_cart_mode)
            .field("otp_length", &self.otp_length)
            .finish()
    }
}
