//! Login redirect handling.

use std::sync::RwLock;
use tracing::info;

use firestock_core::{defaults, IdentityProvider};

/// Identity provider that sends the user to a fixed login URL.
///
/// The computed redirect URL is logged and remembered; a browser shell would
/// navigate to it, the CLI prints it.
#[derive(Debug)]
pub struct LoginRedirect {
    login_url: String,
    location: RwLock<String>,
    last_redirect: RwLock<Option<String>>,
}

impl LoginRedirect {
    pub fn new(login_url: impl Into<String>) -> Self {
        Self {
            login_url: login_url.into(),
            location: RwLock::new(defaults::RETURN_LOCATION.to_string()),
            last_redirect: RwLock::new(None),
        }
    }

    /// Record where the user currently is.
    pub fn set_location(&self, location: impl Into<String>) {
        if let Ok(mut current) = self.location.write() {
            *current = location.into();
        }
    }

    /// The URL of the most recent redirect, if one happened.
    pub fn last_redirect(&self) -> Option<String> {
        self.last_redirect.read().ok().and_then(|r| r.clone())
    }

    /// `{login_url}?returnUrl={encoded}`
    pub fn redirect_url(&self, return_url: &str) -> String {
        let separator = if self.login_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}returnUrl={}",
            self.login_url,
            separator,
            urlencoding::encode(return_url)
        )
    }
}

impl IdentityProvider for LoginRedirect {
    fn current_location(&self) -> String {
        self.location
            .read()
            .map(|l| l.clone())
            .unwrap_or_else(|_| defaults::RETURN_LOCATION.to_string())
    }

    fn redirect_to_login(&self, return_url: &str) {
        let url = self.redirect_url(return_url);
        info!(subsystem = "auth", url = %url, "Session expired, redirecting to login");
        if let Ok(mut last) = self.last_redirect.write() {
            *last = Some(url);
        }
    }
}
