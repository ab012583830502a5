//! Structured logging field name constants for firestock.
//!
//! Library code emits `tracing` events with these field names so log
//! aggregation can query them consistently. The library never installs a
//! subscriber; binaries do.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | WARN  | Classified request failure, surfaced to the user |
//! | INFO  | Lifecycle events, login redirects, tenant changes |
//! | DEBUG | Request start/finish, list state transitions |
//! | TRACE | Per-item data |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID sent with each HTTP request (UUIDv7).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "envelope", "controller", "transport", "tenant"
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name.
/// Examples: "list", "create", "update", "delete"
pub const OPERATION: &str = "op";

/// Entity collection path, e.g. "/products".
pub const ENTITY: &str = "entity";

/// Entity identifier being mutated.
pub const ENTITY_ID: &str = "entity_id";

/// Selected tenant.
pub const TENANT: &str = "tenant";

// ─── Paging fields ─────────────────────────────────────────────────────────

/// Current 1-based page.
pub const PAGE: &str = "page";

/// Items per page.
pub const PAGE_SIZE: &str = "page_size";

/// Number of items in the current page.
pub const ITEM_COUNT: &str = "item_count";

/// Normalized search term of a list request.
pub const SEARCH: &str = "search";

/// List request sequence number.
pub const SEQ: &str = "seq";

// ─── Transport fields ──────────────────────────────────────────────────────

/// HTTP method.
pub const METHOD: &str = "method";

/// Request path relative to the base URL.
pub const PATH: &str = "path";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// HTTP status code.
pub const STATUS: &str = "status";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
