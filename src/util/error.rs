// Assistant Console - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every error keeps its causal chain
// for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all console operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum ConsoleError {
    /// Settings document loading, saving, or mutation failed.
    Settings(SettingsError),

    /// A host-boundary call (log fetch, health probe, engine control) failed.
    Bridge(BridgeError),

    /// Startup registration query or toggle failed.
    Startup(StartupError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Settings(e) => write!(f, "Settings error: {e}"),
            Self::Bridge(e) => write!(f, "Bridge error: {e}"),
            Self::Startup(e) => write!(f, "Startup registration error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for ConsoleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Settings(e) => Some(e),
            Self::Bridge(e) => Some(e),
            Self::Startup(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<SettingsError> for ConsoleError {
    fn from(e: SettingsError) -> Self {
        Self::Settings(e)
    }
}

impl From<BridgeError> for ConsoleError {
    fn from(e: BridgeError) -> Self {
        Self::Bridge(e)
    }
}

impl From<StartupError> for ConsoleError {
    fn from(e: StartupError) -> Self {
        Self::Startup(e)
    }
}

// ---------------------------------------------------------------------------
// Settings document errors
// ---------------------------------------------------------------------------

/// Errors related to the engine settings document (settings.json).
#[derive(Debug)]
pub enum SettingsError {
    /// The document could not be read.
    Read { path: PathBuf, source: io::Error },

    /// The document could not be written (temp write or final rename).
    Write { path: PathBuf, source: io::Error },

    /// The document is not valid JSON or does not match the expected shape.
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Settings could not be serialised for writing.
    Serialise { source: serde_json::Error },

    /// An index-based mutation referenced a nonexistent entry.
    IndexOutOfBounds {
        collection: &'static str,
        index: usize,
        len: usize,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "cannot read '{}': {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "cannot write '{}': {source}", path.display())
            }
            Self::Malformed { path, source } => {
                write!(f, "'{}' is malformed: {source}", path.display())
            }
            Self::Serialise { source } => {
                write!(f, "cannot serialise settings: {source}")
            }
            Self::IndexOutOfBounds {
                collection,
                index,
                len,
            } => {
                write!(f, "{collection} index {index} out of bounds (len {len})")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Malformed { source, .. } | Self::Serialise { source } => Some(source),
            Self::IndexOutOfBounds { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Host-boundary errors
// ---------------------------------------------------------------------------

/// Errors from calls across the host boundary: the log source, the health
/// endpoint, and the engine control port.
///
/// All of these are transient from the console's perspective — callers log
/// them and retry on the next cycle rather than surfacing a fatal state.
#[derive(Debug)]
pub enum BridgeError {
    /// I/O failure talking to the host (file read, socket connect/read/write).
    Io {
        operation: &'static str,
        source: io::Error,
    },

    /// The host's response could not be parsed.
    MalformedResponse {
        operation: &'static str,
        detail: String,
    },

    /// The response offset could not be normalised to an integer.
    MalformedOffset { raw: String },

    /// The engine sidecar binary could not be located.
    SidecarNotFound { searched: Vec<PathBuf> },
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { operation, source } => {
                write!(f, "I/O failure during {operation}: {source}")
            }
            Self::MalformedResponse { operation, detail } => {
                write!(f, "malformed response from {operation}: {detail}")
            }
            Self::MalformedOffset { raw } => {
                write!(f, "offset '{raw}' is not a valid integer")
            }
            Self::SidecarNotFound { searched } => {
                write!(
                    f,
                    "engine sidecar binary not found (searched {} locations)",
                    searched.len()
                )
            }
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Startup registration errors
// ---------------------------------------------------------------------------

/// Errors related to the Windows startup registration (HKCU Run key).
#[derive(Debug)]
pub enum StartupError {
    /// The registry key could not be opened or written.
    Registry {
        operation: &'static str,
        source: io::Error,
    },

    /// Startup registration is not available on this platform.
    Unsupported,
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry { operation, source } => {
                write!(f, "registry {operation} failed: {source}")
            }
            Self::Unsupported => {
                write!(f, "startup registration is only supported on Windows")
            }
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Registry { source, .. } => Some(source),
            Self::Unsupported => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors related to config.toml loading.
///
/// Most config problems are reported as accumulated warnings rather than
/// errors (the app starts with defaults); this type exists for callers that
/// need a hard failure, e.g. a future `--check-config` mode.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Read { path: PathBuf, source: io::Error },

    /// The config file is not valid TOML.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "cannot read '{}': {source}", path.display())
            }
            Self::TomlParse { path, source } => {
                write!(f, "'{}' is not valid TOML: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::TomlParse { source, .. } => Some(source),
        }
    }
}

// =============================================================================
// Unit tests
// =============================================================================
