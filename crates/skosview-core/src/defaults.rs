//! Centralized default constants for skosview.
//!
//! Every crate references these instead of defining its own literals.

// =============================================================================
// LANGUAGE
// =============================================================================

/// Sentinel filter value meaning "use the current interface language".
pub const LANGUAGE_INTERFACE_SENTINEL: &str = "***LANGUAGE_language_interface***";

/// Interface language used when the host does not supply one.
pub const INTERFACE_LANGUAGE: &str = "en";

// =============================================================================
// HTTP CLIENT
// =============================================================================

/// Request timeout for Skosmos API calls (seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API calls slower than this are logged at WARN.
pub const SLOW_REQUEST_MS: u64 = 5_000;

/// User agent sent with every API request.
pub const USER_AGENT: &str = concat!("skosview/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the default Skosmos REST base URI.
pub const ENV_HOST_URI: &str = "SKOSMOS_HOST_URI";

/// Environment variable overriding the request timeout.
pub const ENV_TIMEOUT_SECS: &str = "SKOSMOS_TIMEOUT_SECS";

/// Environment variable overriding the user agent.
pub const ENV_USER_AGENT: &str = "SKOSMOS_USER_AGENT";

// =============================================================================
// RENDERING
// =============================================================================

/// Separator used by list fields in "separator" display mode.
pub const LIST_SEPARATOR: &str = ", ";

// =============================================================================
// PAGINATION
// =============================================================================

/// Default items per page for paged search listings.
pub const PAGE_LIMIT: u64 = 10;

/// Default page offset.
pub const PAGE_OFFSET: u64 = 0;
