// Fintrace - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "Fintrace";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Format detection
// =============================================================================

/// Number of non-empty lines sampled from the start of the input when probing
/// for the tabular-alert grammar. Tabular files carry dense alert lines from
/// the very top, so a bounded prefix scan stays reliable while keeping
/// detection cost flat for large inputs. The block grammar has no such
/// density guarantee and is always probed over the full input.
pub const DETECTION_SAMPLE_LINES: usize = 50;

// =============================================================================
// Timeline sentinels
// =============================================================================

/// Timestamp value recorded on events whose source line carries no usable date.
pub const TIMESTAMP_UNKNOWN: &str = "N/A";

/// Substitute comparison key for unknown timestamps. Lexicographically later
/// than any real `YYYY-MM-DD HH:MM:SS` value, so dateless events sort to the
/// end of the timeline. Never stored on an event.
pub const TIMESTAMP_SORT_LAST: &str = "9999-99-99";

/// Time-of-day suffix appended to date-only alert timestamps.
pub const MIDNIGHT_SUFFIX: &str = " 00:00:00";

// =============================================================================
// Synthetic case identifiers
// =============================================================================

/// Prefix marking a case id as synthesised from a transaction block rather
/// than copied from a logged alert line.
pub const SYNTHETIC_CASE_PREFIX: &str = "SYN";

/// Number of leading typology characters carried into a synthetic case id.
pub const SYNTHETIC_CASE_TYPOLOGY_CHARS: usize = 2;

/// Zero-padded width of the transaction count in a synthetic case id.
pub const SYNTHETIC_CASE_COUNT_WIDTH: usize = 4;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
