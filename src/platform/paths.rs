// Assistant Console - platform/paths.rs
//
// Path resolution for the two worlds the console straddles:
//
//   1. Console-owned state (config.toml, prefs.json) in the platform
//      config/data directories via the `directories` crate.
//   2. Engine-shared state (settings.json, the engine log, the sidecar
//      binary) in the `resources` directory the engine is deployed with.
//
// The resources directory lives next to the installed executable in a
// release layout; during development it is found relative to the working
// directory instead. A CLI override beats both.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for console data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/assistantconsole/).
    pub config_dir: PathBuf,

    /// Data directory for UI preference persistence.
    pub data_dir: PathBuf,

    /// Shared engine resources directory, when one could be located.
    pub resources_dir: Option<PathBuf>,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// `resources_override` comes from the CLI and wins unconditionally.
    /// Falls back to the current directory if platform dirs cannot be
    /// determined.
    pub fn resolve(resources_override: Option<&Path>) -> Self {
        let resources_dir = match resources_override {
            Some(dir) => Some(dir.to_path_buf()),
            None => locate_resources_dir(),
        };

        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                resources = ?resources_dir.as_ref().map(|p| p.display().to_string()),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
                resources_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
                resources_dir,
            }
        }
    }

    /// Path of the engine settings document.
    ///
    /// Prefers an existing document inside the resources directory; when
    /// none exists yet, the document is created next to the executable so
    /// a first save works on a fresh install.
    pub fn settings_path(&self) -> PathBuf {
        if let Some(ref res) = self.resources_dir {
            let candidate = res.join(constants::SETTINGS_FILE_NAME);
            if candidate.exists() {
                return candidate;
            }
        }

        if let Some(exe_dir) = exe_dir() {
            let candidate = exe_dir
                .join(constants::RESOURCES_DIR_NAME)
                .join(constants::SETTINGS_FILE_NAME);
            if candidate.exists() {
                return candidate;
            }
            return exe_dir.join(constants::SETTINGS_FILE_NAME);
        }

        PathBuf::from(constants::SETTINGS_FILE_NAME)
    }

    /// Path of the engine's append-only log file.
    ///
    /// Prefers `<resources>/logs/os_assistant.log`, then the flat layout
    /// `<resources>/os_assistant.log`. When neither exists yet (the engine
    /// has not logged anything), the logs-folder path is still returned so
    /// the tail view displays where the log will appear.
    pub fn engine_log_path(&self) -> Option<PathBuf> {
        let base = self.resources_dir.as_ref()?;
        let nested = base
            .join(constants::ENGINE_LOG_DIR_NAME)
            .join(constants::ENGINE_LOG_FILE_NAME);
        if nested.exists() {
            return Some(nested);
        }
        let flat = base.join(constants::ENGINE_LOG_FILE_NAME);
        if flat.exists() {
            return Some(flat);
        }
        Some(nested)
    }
}

/// Directory containing the running executable, if determinable.
fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
}

/// Locate the shared resources directory.
///
/// Release layout first (`<exe_dir>/resources`), then the development
/// fallbacks: `./resources` and `./engine/resources` relative to the
/// working directory.
fn locate_resources_dir() -> Option<PathBuf> {
    if let Some(dir) = exe_dir() {
        let candidate = dir.join(constants::RESOURCES_DIR_NAME);
        if candidate.exists() {
            return Some(candidate);
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        let candidate = cwd.join(constants::RESOURCES_DIR_NAME);
        if candidate.exists() {
            return Some(candidate);
        }
        let candidate = cwd.join("engine").join(constants::RESOURCES_DIR_NAME);
        if candidate.exists() {
            return Some(candidate);
        }
    }

    None
}

// =============================================================================
// Unit tests
// =============================================================================
