//! Cookie state carried between requests.
//!
//! The storefront authenticates with a session cookie and protects
//! mutating endpoints with a double-submit CSRF token: the `csrftoken`
//! cookie value must be echoed back as a form field or header. Cookies live
//! in a `reqwest` jar shared with the HTTP client, so `Set-Cookie` headers
//! are recorded and replayed with their domain, path and expiry honoured.

use std::fmt;
use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::Url;

pub const CSRF_COOKIE: &str = "csrftoken";
pub const SESSION_COOKIE: &str = "sessionid";

pub struct Session {
    jar: Arc<Jar>,
    origin: Url,
}

impl Session {
    /// Empty session for the storefront at `origin`.
    #[must_use]
    pub fn new(origin: Url) -> Self {
        Self {
            jar: Arc::new(Jar::default()),
            origin,
        }
    }

    /// The jar to install as the HTTP client's cookie provider.
    pub(crate) fn jar(&self) -> Arc<Jar> {
        Arc::clone(&self.jar)
    }

    /// Stores a site-wide cookie for the origin.
    pub fn set(&self, name: &str, value: &str) {
        self.jar
            .add_cookie_str(&format!("{name}={value}; Path=/"), &self.origin);
    }

    /// Value of the cookie `name` as it would be sent to the origin.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        let header = self.cookie_header()?;
        header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.trim_matches('"').to_owned())
    }

    #[must_use]
    pub fn csrf_token(&self) -> Option<String> {
        self.get(CSRF_COOKIE).filter(|t| !t.is_empty())
    }

    /// Value of the `Cookie` header sent to the origin, or `None` when no
    /// cookies apply.
    #[must_use]
    pub fn cookie_header(&self) -> Option<String> {
        let value = self.jar.cookies(&self.origin)?;
        value.to_str().ok().map(str::to_owned)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("origin", &self.origin.as_str())
            .field("has_csrf", &self.csrf_token().is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    fn session() -> Session {
        Session::new(Url::parse("https://shop.example.com/vi/").unwrap())
    }

    fn receive(session: &Session, path: &str, set_cookies: &[&str]) {
        let url = session.origin.join(path).unwrap();
        let values: Vec<HeaderValue> = set_cookies
            .iter()
            .map(|v| HeaderValue::from_str(v).unwrap())
            .collect();
        session.jar.set_cookies(&mut values.iter(), &url);
    }

    #[test]
    fn records_csrf_and_session_cookies() {
        let session = session();
        receive(
            &session,
            "/",
            &[
                "csrftoken=tok123; Path=/; SameSite=Lax",
                "sessionid=sess456; HttpOnly; Path=/",
            ],
        );
        assert_eq!(session.csrf_token().as_deref(), Some("tok123"));
        assert_eq!(session.get(SESSION_COOKIE).as_deref(), Some("sess456"));

        let header = session.cookie_header().unwrap();
        assert!(header.contains("csrftoken=tok123"));
        assert!(header.contains("sessionid=sess456"));
    }

    #[test]
    fn expired_cookie_is_dropped() {
        let session = session();
        session.set(SESSION_COOKIE, "sess");
        receive(
            &session,
            "/",
            &["sessionid=\"\"; expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=0; Path=/"],
        );
        assert!(session.get(SESSION_COOKIE).is_none());
        assert!(session.cookie_header().is_none());
    }

    #[test]
    fn cookie_for_another_path_is_not_sent() {
        let session = session();
        receive(&session, "/admin/", &["adminpref=1; Path=/admin"]);
        assert!(session.get("adminpref").is_none());
    }

    #[test]
    fn cookie_for_another_domain_is_ignored() {
        let session = session();
        receive(
            &session,
            "/",
            &["tracker=1; Domain=ads.example.net; Path=/"],
        );
        assert!(session.get("tracker").is_none());
    }

    #[test]
    fn explicit_token_is_readable() {
        let session = session();
        assert!(session.csrf_token().is_none());
        session.set(CSRF_COOKIE, "abc");
        assert_eq!(session.csrf_token().as_deref(), Some("abc"));
    }
}
