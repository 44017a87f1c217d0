// Assistant Console - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "Assistant Console";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "AssistantConsole";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Log tail limits
// =============================================================================

/// How often a new tail fetch cycle is attempted while the log view is live (ms).
pub const LOG_POLL_INTERVAL_MS: u64 = 1_000;

/// Minimum time between two visible buffer commits (ms).
///
/// Bounds UI re-layout frequency independently of the fetch cadence: a
/// manual refresh issued right after a timer cycle must not force two
/// full text relayouts within the same frame budget.
pub const LOG_COMMIT_THROTTLE_MS: u64 = 100;

/// Maximum bytes requested from the log source in a single fetch cycle.
/// Bounds both the transfer size and the per-cycle merge cost.
pub const LOG_FETCH_MAX_BYTES: u64 = 64 * 1024; // 64 KiB

/// Number of trailing lines the source seeds the view with on the very
/// first fetch (cursor at 0), so the view opens showing recent history
/// instead of an empty pane.
pub const LOG_SEED_TAIL_LINES: usize = 10;

/// Maximum retained size of the log display buffer in bytes.
/// Exceeding this triggers a prefix eviction pass.
pub const LOG_BUFFER_CAP: usize = 500_000;

/// Eviction cut point as a fraction of the merged buffer length: when the
/// merged buffer exceeds `LOG_BUFFER_CAP`, everything before 2/5 (40%) of
/// the merged length — extended forward to the next line boundary — is
/// discarded.
pub const LOG_EVICT_CUT_NUM: usize = 2;
/// Denominator of the eviction cut fraction.
pub const LOG_EVICT_CUT_DEN: usize = 5;

/// Minimum user-configurable tail poll interval (ms).
pub const MIN_LOG_POLL_INTERVAL_MS: u64 = 250;

/// Maximum user-configurable tail poll interval (ms).
pub const MAX_LOG_POLL_INTERVAL_MS: u64 = 10_000; // 10 s

// =============================================================================
// Engine endpoints and health limits
// =============================================================================

/// Address of the engine's HTTP health endpoint.
pub const ENGINE_HEALTH_ADDR: &str = "127.0.0.1:5002";

/// Address of the engine's control port (accepts a plain `shutdown` command).
pub const ENGINE_CONTROL_ADDR: &str = "127.0.0.1:5001";

/// TCP connect timeout for engine endpoints (ms). Short so an offline
/// engine never makes the console feel stuck.
pub const ENGINE_CONNECT_TIMEOUT_MS: u64 = 300;

/// Read timeout for the health response (ms).
pub const ENGINE_READ_TIMEOUT_MS: u64 = 700;

/// Write timeout for engine requests (ms).
pub const ENGINE_WRITE_TIMEOUT_MS: u64 = 300;

/// How often health is re-checked while the engine reports an active state (ms).
pub const HEALTH_POLL_INTERVAL_MS: u64 = 5_000;

/// Number of follow-up health checks issued after a start/stop request.
pub const HEALTH_BURST_CHECKS: u32 = 3;

/// Delay between follow-up health checks in a burst (ms).
pub const HEALTH_BURST_INTERVAL_MS: u64 = 3_000;

// =============================================================================
// Settings document
// =============================================================================

/// Engine settings document file name (lives in the shared resources dir).
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Engine log file name.
pub const ENGINE_LOG_FILE_NAME: &str = "os_assistant.log";

/// Subdirectory of the resources dir that holds engine logs.
pub const ENGINE_LOG_DIR_NAME: &str = "logs";

/// Name of the shared resources directory next to the executable.
pub const RESOURCES_DIR_NAME: &str = "resources";

/// Default wake phrase written when no settings document exists yet.
pub const DEFAULT_WAKE_PHRASE: &str = "ola jarvis";

/// Registry value name used for the Windows startup registration.
pub const STARTUP_RUN_VALUE_NAME: &str = "OSAssistant";

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// UI preference persistence file name (stored in the platform data directory).
pub const PREFS_FILE_NAME: &str = "prefs.json";
