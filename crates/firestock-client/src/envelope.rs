//! Request envelope: runs one server call and normalizes its outcome.
//!
//! Every call ends in exactly one of three ways:
//! - success: the payload is returned (`Some`), optionally with a success toast;
//! - classified failure: `None`, `last_error` set, optionally an error toast;
//! - authentication failure (401): `None`, login redirect, no error stored.
//!
//! The envelope never returns an error to its caller and never retries.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Instant;

use tracing::{debug, info, warn};

use firestock_core::{ApiError, ApiResponse, Error, IdentityProvider, Notifier, Result};

use crate::config::Messages;

/// Status that triggers the login flow instead of an error.
const UNAUTHORIZED: u16 = 401;

/// Per-call notification settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyOptions {
    pub show_success: bool,
    pub show_error: bool,
    /// Overrides the default success toast text.
    pub success_message: Option<String>,
    /// Overrides the default error toast title.
    pub error_message: Option<String>,
}

impl Default for NotifyOptions {
    fn default() -> Self {
        Self {
            show_success: true,
            show_error: true,
            success_message: None,
            error_message: None,
        }
    }
}

impl NotifyOptions {
    /// No toasts at all.
    pub fn silent() -> Self {
        Self {
            show_success: false,
            show_error: false,
            ..Self::default()
        }
    }

    /// Error toasts only.
    pub fn errors_only() -> Self {
        Self {
            show_success: false,
            ..Self::default()
        }
    }

    pub fn with_success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }
}

/// The external collaborators an envelope reports to.
#[derive(Clone)]
pub struct Collaborators {
    pub notifier: Arc<dyn Notifier>,
    pub identity: Arc<dyn IdentityProvider>,
    pub messages: Arc<Messages>,
}

impl Collaborators {
    pub fn new(notifier: Arc<dyn Notifier>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            notifier,
            identity,
            messages: Arc::new(Messages::default()),
        }
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = Arc::new(messages);
        self
    }
}

/// Counts one outstanding call; released on every exit path, including
/// cancellation of the enclosing future.
struct InFlightGuard<'a>(&'a AtomicUsize);

impl<'a> InFlightGuard<'a> {
    fn raise(count: &'a AtomicUsize) -> Self {
        count.fetch_add(1, Ordering::SeqCst);
        Self(count)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Wraps one kind of server operation.
///
/// Concurrent calls on the same envelope are not de-duplicated; the envelope
/// reports in flight while any of them is outstanding.
pub struct RequestEnvelope {
    op: &'static str,
    collaborators: Collaborators,
    in_flight: AtomicUsize,
    last_error: RwLock<Option<ApiError>>,
}

impl RequestEnvelope {
    pub fn new(op: &'static str, collaborators: Collaborators) -> Self {
        Self {
            op,
            collaborators,
            in_flight: AtomicUsize::new(0),
            last_error: RwLock::new(None),
        }
    }

    /// Operation name used in logs.
    pub fn op(&self) -> &'static str {
        self.op
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn last_error(&self) -> Option<ApiError> {
        self.last_error.read().ok().and_then(|e| e.clone())
    }

    pub fn clear_error(&self) {
        self.set_last_error(None);
    }

    /// Run `operation` and normalize its outcome.
    ///
    /// Returns `None` when the call did not succeed. Payload types that may
    /// legitimately be empty should be `Option<_>` themselves, so that a
    /// successful empty response (`Some(None)`) stays distinguishable from
    /// failure.
    pub async fn execute<T, F, Fut>(&self, operation: F, options: &NotifyOptions) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ApiResponse<T>>>,
    {
        self.set_last_error(None);
        let _guard = InFlightGuard::raise(&self.in_flight);
        let started = Instant::now();

        debug!(subsystem = "envelope", op = self.op, "Request started");

        let outcome = operation().await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(response) => self.handle_response(response, options, duration_ms),
            Err(error) => {
                self.handle_error(&error, options, duration_ms);
                None
            }
        }
    }

    fn handle_response<T>(
        &self,
        response: ApiResponse<T>,
        options: &NotifyOptions,
        duration_ms: u64,
    ) -> Option<T> {
        let status = response.status;

        if status == UNAUTHORIZED {
            self.redirect_to_login();
            return None;
        }

        if status >= 400 {
            let message = response
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| self.collaborators.messages.generic_error.clone());
            self.fail(ApiError::new(message, Some(status)), options, duration_ms);
            return None;
        }

        debug!(
            subsystem = "envelope",
            op = self.op,
            status,
            duration_ms,
            "Request succeeded"
        );

        if options.show_success {
            let message = options
                .success_message
                .as_deref()
                .unwrap_or(&self.collaborators.messages.success);
            self.collaborators.notifier.notify_success(message);
        }

        Some(response.data)
    }

    fn handle_error(&self, error: &Error, options: &NotifyOptions, duration_ms: u64) {
        if error.status_code() == Some(UNAUTHORIZED) {
            self.redirect_to_login();
            return;
        }

        let mut api_error = ApiError::from(error);
        if api_error.message.trim().is_empty() {
            api_error.message = self.collaborators.messages.generic_error.clone();
        }
        self.fail(api_error, options, duration_ms);
    }

    fn fail(&self, error: ApiError, options: &NotifyOptions, duration_ms: u64) {
        warn!(
            subsystem = "envelope",
            op = self.op,
            status = error.status_code,
            duration_ms,
            error = %error.message,
            "Request failed"
        );

        if options.show_error {
            let title = options
                .error_message
                .as_deref()
                .unwrap_or(&self.collaborators.messages.error_title);
            self.collaborators
                .notifier
                .notify_error(title, &error.message);
        }

        self.set_last_error(Some(error));
    }

    fn redirect_to_login(&self) {
        let identity = &self.collaborators.identity;
        let location = identity.current_location();
        info!(
            subsystem = "envelope",
            op = self.op,
            return_url = %location,
            "Authentication required"
        );
        identity.redirect_to_login(&location);
    }

    fn set_last_error(&self, error: Option<ApiError>) {
        if let Ok(mut slot) = self.last_error.write() {
            *slot = error;
        }
    }
}
