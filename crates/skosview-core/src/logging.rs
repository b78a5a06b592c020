//! Structured logging field names for skosview.
//!
//! `tracing` macros take field keys as literals, so these constants are the
//! reference for what call sites write: every event and span in the
//! workspace uses only keys listed in [`FIELDS`], letting log aggregation
//! query Skosmos traffic by the same keys everywhere.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Not used: nothing in this layer is fatal |
//! | WARN  | API failure recovered to an empty result, slow API call |
//! | INFO  | Host record changes, client host changes |
//! | DEBUG | Request completion, counts, guard short-circuits, ignored predicates |
//! | TRACE | Breadcrumb construction, cycle truncation |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "core", "client", "views"
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name.
/// Examples: "get_concept", "search", "breadcrumbs"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Vocabulary identifier sent to the API.
pub const VOCID: &str = "vocid";

/// Concept URI being looked up, or a host's base URI.
pub const URI: &str = "uri";

/// Full request URL.
pub const URL: &str = "url";

/// Language code used for labels.
pub const LANG: &str = "lang";

/// Search query text.
pub const QUERY: &str = "query";

/// Predicate field name.
pub const FIELD: &str = "field";

/// Host configuration record id.
pub const HOST_ID: &str = "host_id";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Configured request timeout in seconds.
pub const TIMEOUT_SECS: &str = "timeout_secs";

/// Number of rows or records returned.
pub const RESULT_COUNT: &str = "result_count";

/// Total items known to a pager after offset adjustment.
pub const TOTAL_ITEMS: &str = "total_items";

/// Number of broader edges indexed.
pub const EDGE_COUNT: &str = "edge_count";

/// Number of breadcrumb trails produced.
pub const TRAIL_COUNT: &str = "trail_count";

/// Breadcrumb path depth.
pub const DEPTH: &str = "depth";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// HTTP status returned by the API.
pub const STATUS: &str = "status";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Slow operation threshold exceeded.
pub const SLOW: &str = "slow";

/// Every structured key in use.
pub const FIELDS: &[&str] = &[
    SUBSYSTEM,
    OPERATION,
    VOCID,
    URI,
    URL,
    LANG,
    QUERY,
    FIELD,
    HOST_ID,
    DURATION_MS,
    TIMEOUT_SECS,
    RESULT_COUNT,
    TOTAL_ITEMS,
    EDGE_COUNT,
    TRAIL_COUNT,
    DEPTH,
    STATUS,
    ERROR_MSG,
    SLOW,
];
