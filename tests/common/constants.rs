//! Shared constants for end-to-end tests
//!
//! When the built-in catalog changes, update only this file.

// ============================================================================
// Built-in Catalog
// ============================================================================

/// Number of tools in the built-in catalog
pub const TOOL_COUNT: usize = 17;

/// Number of developed tools in the built-in catalog
pub const DEVELOPED_TOOL_COUNT: usize = 14;

/// Number of routes: home, pro, and one per tool
pub const ROUTE_COUNT: usize = 19;

/// Category ids, in display order
pub const CATEGORY_IDS: [&str; 4] = ["dev-tools", "text-tools", "image-tools", "life-tools"];

/// A developed tool whose route name differs from its path
pub const UNIT_PATH: &str = "/unit";

/// Route name of the unit converter
pub const UNIT_ROUTE: &str = "unit-converter";

/// A planned tool
pub const PLANNED_PATH: &str = "/pomodoro";

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;

/// Request body limit the test server runs with (bytes)
pub const TEST_MAX_BODY_BYTES: usize = 64 * 1024;
