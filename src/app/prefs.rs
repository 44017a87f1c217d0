// Assistant Console - app/prefs.rs
//
// UI preference persistence: theme, font size, and the last active tab
// survive application restarts.
//
// Design principles:
// - Prefs are saved atomically (write→temp, rename→final) so a crash
//   during save never corrupts the previous good file.
// - Load errors are silently discarded (corrupt or incompatible prefs
//   just start the app with defaults rather than surfacing errors).
// - The data directory is created on first save; no user action required.

use crate::app::state::Tab;
use crate::util::constants::{DEFAULT_FONT_SIZE, PREFS_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version stamp for forward-compatibility checks.
///
/// Increment whenever `UiPrefs` changes in a breaking way. Version
/// mismatches silently discard the stored prefs.
pub const PREFS_VERSION: u32 = 1;

/// Persistent UI preferences.
#[derive(Debug, Serialize, Deserialize)]
pub struct UiPrefs {
    /// Schema version — must equal `PREFS_VERSION` to be accepted.
    pub version: u32,

    /// Dark (true) or light (false) theme.
    #[serde(default = "default_dark_mode")]
    pub dark_mode: bool,

    /// Body font size in points.
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Tab that was active when the app last closed.
    #[serde(default)]
    pub last_tab: Tab,
}

fn default_dark_mode() -> bool {
    true
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            version: PREFS_VERSION,
            dark_mode: true,
            font_size: DEFAULT_FONT_SIZE,
            last_tab: Tab::default(),
        }
    }
}

/// Resolve the prefs file path from the platform data directory.
pub fn prefs_path(data_dir: &Path) -> PathBuf {
    data_dir.join(PREFS_FILE_NAME)
}

/// Save `prefs` to `path` atomically (write temp → rename).
///
/// Returns a descriptive error string suitable for a tracing warn! call;
/// callers log it and move on — a failed prefs save never interrupts the
/// user.
pub fn save(prefs: &UiPrefs, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("cannot create prefs directory '{}': {e}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(prefs)
        .map_err(|e| format!("failed to serialise prefs: {e}"))?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes())
        .map_err(|e| format!("failed to write prefs temp file '{}': {e}", tmp.display()))?;

    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        format!("failed to finalise prefs file '{}': {e}", path.display())
    })?;

    tracing::debug!(path = %path.display(), "Prefs saved");
    Ok(())
}

/// Load and validate `UiPrefs` from `path`.
///
/// Returns `None` on any error (file not found, JSON parse failure,
/// version mismatch). The caller should treat `None` as "use defaults".
pub fn load(path: &Path) -> Option<UiPrefs> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Cannot read prefs file");
            }
        })
        .ok()?;

    let prefs: UiPrefs = serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Prefs file is malformed — using defaults"
            );
        })
        .ok()?;

    if prefs.version != PREFS_VERSION {
        tracing::warn!(
            found = prefs.version,
            expected = PREFS_VERSION,
            "Prefs file version mismatch — using defaults"
        );
        return None;
    }

    Some(prefs)
}

// =============================================================================
// Unit tests
// =============================================================================
