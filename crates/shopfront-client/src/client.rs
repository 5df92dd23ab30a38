//! HTTP client for the storefront's AJAX endpoints.
//!
//! Wraps `reqwest` with the storefront's conventions: absent variant fields
//! are sent as the `"None"` sentinel, cookies set by any response are
//! replayed on later requests, and mutating requests echo the CSRF cookie
//! back as a form field and header. Every JSON body is checked for
//! `"success": false` or an `"error"` field, which surface as
//! [`StorefrontError::Api`].

use std::time::Duration;

use reqwest::header::REFERER;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shopfront_core::{Amount, AppConfig, VariantSelection, Voucher};

use crate::endpoints::Endpoints;
use crate::error::StorefrontError;
use crate::session::{Session, CSRF_COOKIE, SESSION_COOKIE};
use crate::types::{
    AddToCartResponse, ApplyVoucherResponse, AvailableOptions, CartUpdate, MessageResponse,
    PriceQuote, ProductDetailIdResponse, QuantityAction, RemoveItemRequest, SearchHit,
    SearchResponse, UpdateCartItemRequest, VouchersResponse, ABSENT_SENTINEL,
};

/// Header Django reads the double-submitted CSRF token from.
pub const CSRF_HEADER: &str = "X-CSRFToken";
/// Form field Django reads the double-submitted CSRF token from.
pub const CSRF_FORM_FIELD: &str = "csrfmiddlewaretoken";

/// Client for one storefront origin.
///
/// Holds the HTTP client, base URL, endpoint paths and cookie session. Use
/// [`StorefrontClient::new`] with loaded config or
/// [`StorefrontClient::with_base_url`] to point at a mock server in tests.
pub struct StorefrontClient {
    client: Client,
    base_url: Url,
    endpoints: Endpoints,
    session: Session,
}

impl StorefrontClient {
    /// Creates a client from application config, seeding any configured
    /// CSRF token and session id.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`StorefrontError::InvalidBaseUrl`] for a bad base URL.
    pub fn new(config: &AppConfig) -> Result<Self, StorefrontError> {
        let client = Self::with_base_url(
            &config.base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        if let Some(token) = &config.csrf_token {
            client.session.set(CSRF_COOKIE, token);
        }
        if let Some(session_id) = &config.session_id {
            client.session.set(SESSION_COOKIE, session_id);
        }
        Ok(client)
    }

    /// Creates a client with default endpoint paths under `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`StorefrontError::InvalidBaseUrl`] if `base_url` does not
    /// parse as an absolute URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StorefrontError> {
        // Exactly one trailing slash so relative joins keep any path prefix.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| StorefrontError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(StorefrontError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "not a hierarchical URL".to_owned(),
            });
        }

        let session = Session::new(parsed.clone());
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .cookie_provider(session.jar())
            .build()?;

        Ok(Self {
            client,
            base_url: parsed,
            endpoints: Endpoints::default(),
            session,
        })
    }

    /// Replaces the endpoint paths.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn set_csrf_token(&self, token: &str) {
        self.session.set(CSRF_COOKIE, token);
    }

    #[must_use]
    pub fn csrf_token(&self) -> Option<String> {
        self.session.csrf_token()
    }

    /// Fetches the storefront root so the server can set its session and
    /// CSRF cookies.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Http`] on network failure and
    /// [`StorefrontError::UnexpectedStatus`] on a non-2xx answer.
    pub async fn prime_session(&self) -> Result<(), StorefrontError> {
        let response = self.client.get(self.base_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StorefrontError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.base_url.to_string(),
            });
        }
        tracing::debug!(
            has_csrf = self.session.csrf_token().is_some(),
            "storefront session primed"
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Product page
    // -----------------------------------------------------------------------

    /// Looks up the price of a variant. Absent fields go out as `"None"`.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::Api`] if the body carries an `error` field.
    /// - [`StorefrontError::Http`] on network failure.
    /// - [`StorefrontError::Deserialize`] if the body is not the expected shape.
    pub async fn get_price(
        &self,
        selection: &VariantSelection,
    ) -> Result<PriceQuote, StorefrontError> {
        let product_id = id_or_sentinel(selection.product_id);
        let query = [
            ("product_id", product_id.as_str()),
            ("size", str_or_sentinel(selection.size.as_deref())),
            ("color", str_or_sentinel(selection.color.as_deref())),
        ];
        self.get_json(&self.endpoints.price, &query, "get-price")
            .await
    }

    /// Fetches the sizes and colors that can currently be bought.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::get_price`].
    pub async fn get_available_options(
        &self,
        product_id: Option<i64>,
    ) -> Result<AvailableOptions, StorefrontError> {
        let id = product_id.map(|id| id.to_string());
        let query: Vec<(&str, &str)> = id
            .as_deref()
            .map(|id| vec![("product_id", id)])
            .unwrap_or_default();
        self.get_json(&self.endpoints.available_options, &query, "get-available-options")
            .await
    }

    /// Resolves the product-detail id of a variant; `None` when the
    /// combination does not exist.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::get_price`].
    pub async fn get_product_detail_id(
        &self,
        selection: &VariantSelection,
    ) -> Result<Option<i64>, StorefrontError> {
        let product_id = id_or_sentinel(selection.product_id);
        let query = [
            ("product_id", product_id.as_str()),
            ("size", str_or_sentinel(selection.size.as_deref())),
            ("color", str_or_sentinel(selection.color.as_deref())),
        ];
        let body: ProductDetailIdResponse = self
            .get_json(&self.endpoints.product_detail_id, &query, "get-product-detail-id")
            .await?;
        Ok(body.product_detail_id)
    }

    /// Adds `quantity` units of a product detail to the cart.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::MissingCsrfToken`] before any I/O if no token is known.
    /// - [`StorefrontError::Api`] when the server refuses (e.g. out of stock).
    /// - [`StorefrontError::Http`] on network failure.
    pub async fn add_to_cart(
        &self,
        product_detail_id: i64,
        quantity: u32,
    ) -> Result<AddToCartResponse, StorefrontError> {
        let fields = [
            ("product_detail_id", product_detail_id.to_string()),
            ("quantity", quantity.to_string()),
        ];
        self.post_form(&self.endpoints.add_to_cart, &fields, "add-to-cart")
            .await
    }

    // -----------------------------------------------------------------------
    // Cart
    // -----------------------------------------------------------------------

    /// Increments, decrements or sets the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::add_to_cart`].
    pub async fn update_quantity(
        &self,
        item_id: i64,
        action: QuantityAction,
        quantity: Option<u32>,
    ) -> Result<CartUpdate, StorefrontError> {
        let mut fields = vec![
            ("item_id", item_id.to_string()),
            ("action", action.as_str().to_owned()),
        ];
        if let Some(q) = quantity {
            fields.push(("quantity", q.to_string()));
        }
        self.post_form(&self.endpoints.update_quantity, &fields, "update-quantity")
            .await
    }

    /// Removes a cart line.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::add_to_cart`].
    pub async fn remove_item(&self, item_id: i64) -> Result<CartUpdate, StorefrontError> {
        self.post_json(
            &self.endpoints.remove_item,
            &RemoveItemRequest { item_id },
            "remove-cart-item",
        )
        .await
    }

    /// Moves a cart line to another variant and quantity. Returns the
    /// server's confirmation message.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::add_to_cart`]; a missing variant or stock
    /// shortage arrives as [`StorefrontError::Api`].
    pub async fn update_cart_item(
        &self,
        item_id: i64,
        quantity: u32,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Result<Option<String>, StorefrontError> {
        let body = UpdateCartItemRequest {
            item_id,
            quantity,
            size: str_or_sentinel(size),
            color: str_or_sentinel(color),
        };
        let response: MessageResponse = self
            .post_json(&self.endpoints.update_cart_item, &body, "update-cart-item")
            .await?;
        Ok(response.message)
    }

    // -----------------------------------------------------------------------
    // Search and vouchers
    // -----------------------------------------------------------------------

    /// Searches products by name. An empty query is sent as `q=`.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::get_price`].
    pub async fn search_products(&self, query: &str) -> Result<Vec<SearchHit>, StorefrontError> {
        let body: SearchResponse = self
            .get_json(&self.endpoints.search, &[("q", query)], "search")
            .await?;
        Ok(body.results)
    }

    /// Lists vouchers offered to the current user.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::get_price`].
    pub async fn get_vouchers(&self) -> Result<Vec<Voucher>, StorefrontError> {
        let body: VouchersResponse = self
            .get_json(&self.endpoints.vouchers, &[], "get-vouchers")
            .await?;
        Ok(body.vouchers)
    }

    /// Applies a voucher to the current cart.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::add_to_cart`].
    pub async fn apply_voucher(
        &self,
        voucher_id: i64,
        subtotal: Amount,
        min_amount: Amount,
    ) -> Result<ApplyVoucherResponse, StorefrontError> {
        let fields = [
            ("voucher_id", voucher_id.to_string()),
            ("subtotal", subtotal.units().to_string()),
            ("min_amount", min_amount.units().to_string()),
        ];
        self.post_form(&self.endpoints.apply_voucher, &fields, "apply-voucher")
            .await
    }

    // -----------------------------------------------------------------------
    // Transport
    // -----------------------------------------------------------------------

    /// Joins an endpoint path onto the base URL and appends query pairs.
    fn endpoint_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, StorefrontError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| StorefrontError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn csrf_for(&self, endpoint: &str) -> Result<String, StorefrontError> {
        self.session
            .csrf_token()
            .ok_or_else(|| StorefrontError::MissingCsrfToken {
                endpoint: endpoint.to_owned(),
            })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        context: &str,
    ) -> Result<T, StorefrontError> {
        let url = self.endpoint_url(path, query)?;
        let request = self.client.get(url.clone());
        self.execute(request, &url, context).await
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &[(&str, String)],
        context: &str,
    ) -> Result<T, StorefrontError> {
        let token = self.csrf_for(path)?;
        let url = self.endpoint_url(path, &[])?;
        let mut form: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        form.push((CSRF_FORM_FIELD, token.as_str()));

        let request = self
            .client
            .post(url.clone())
            .header(CSRF_HEADER, token.as_str())
            .header(REFERER, self.base_url.as_str())
            .form(&form);
        self.execute(request, &url, context).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        context: &str,
    ) -> Result<T, StorefrontError> {
        let token = self.csrf_for(path)?;
        let url = self.endpoint_url(path, &[])?;
        let request = self
            .client
            .post(url.clone())
            .header(CSRF_HEADER, token.as_str())
            .header(REFERER, self.base_url.as_str())
            .json(body);
        self.execute(request, &url, context).await
    }

    /// Sends the request and decodes the JSON body. Cookies travel through
    /// the session jar.
    ///
    /// Non-2xx answers whose JSON body explains the failure become
    /// [`StorefrontError::Api`]; other non-2xx answers become
    /// [`StorefrontError::UnexpectedStatus`].
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
        context: &str,
    ) -> Result<T, StorefrontError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        let parsed = serde_json::from_str::<serde_json::Value>(&body);

        if !status.is_success() {
            if let Some(msg) = parsed.as_ref().ok().and_then(api_error_message) {
                return Err(StorefrontError::Api(msg));
            }
            return Err(StorefrontError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let value = parsed.map_err(|e| StorefrontError::Deserialize {
            context: context.to_owned(),
            source: e,
        })?;
        check_api_error(&value)?;

        serde_json::from_value(value).map_err(|e| StorefrontError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Extracts the failure message from a storefront JSON body, if it reports one.
///
/// A non-empty `"error"` string always counts; `"success": false` counts
/// with its `"message"` or a generic text.
fn api_error_message(body: &serde_json::Value) -> Option<String> {
    if let Some(err) = body
        .get("error")
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.trim().is_empty())
    {
        return Some(err.to_owned());
    }
    if body.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
        let msg = body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("request failed")
            .to_owned();
        return Some(msg);
    }
    None
}

fn check_api_error(body: &serde_json::Value) -> Result<(), StorefrontError> {
    match api_error_message(body) {
        Some(msg) => Err(StorefrontError::Api(msg)),
        None => Ok(()),
    }
}

fn str_or_sentinel(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => ABSENT_SENTINEL,
    }
}

fn id_or_sentinel(id: Option<i64>) -> String {
    id.map_or_else(|| ABSENT_SENTINEL.to_owned(), |id| id.to_string())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
