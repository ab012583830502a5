//! Centralized default constants for firestock.
//!
//! **This module is the single source of truth** for shared default values.
//! The client configuration, the list controller and the CLI reference these
//! constants instead of defining their own magic numbers.

// =============================================================================
// PAGINATION
// =============================================================================

/// First page index (pages are 1-based).
pub const FIRST_PAGE: u32 = 1;

/// Default number of items per page for entity lists.
pub const PAGE_SIZE: u32 = 10;

// =============================================================================
// TRANSPORT
// =============================================================================

/// Default backend base URL.
pub const API_URL: &str = "http://127.0.0.1:8080/api";

/// Default identity-provider login URL.
pub const LOGIN_URL: &str = "http://127.0.0.1:8180/login";

/// Header carrying the selected tenant.
pub const TENANT_HEADER: &str = "X-Tenant-Id";

/// Header carrying the per-request correlation ID.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Return location used when the caller has none.
pub const RETURN_LOCATION: &str = "/";

// =============================================================================
// SEARCH
// =============================================================================

/// Delay before a search term is considered settled (milliseconds).
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

// =============================================================================
// MESSAGES
// =============================================================================

/// Success toast text when the caller supplies none.
pub const MSG_SUCCESS: &str = "Saved successfully";

/// Error toast title when the caller supplies none.
pub const MSG_ERROR_TITLE: &str = "Error";

/// Fallback when a failed response carries no message.
pub const MSG_GENERIC_ERROR: &str = "An unexpected error occurred";

/// Inline message shown when a list cannot be loaded.
pub const MSG_LIST_ERROR: &str = "Could not load data, please try again";
