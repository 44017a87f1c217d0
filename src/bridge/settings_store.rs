// Assistant Console - bridge/settings_store.rs
//
// Load/save and index-based CRUD for the engine-owned settings document.
//
// Design principles:
// - The document is saved atomically (write→temp, rename→final) so a crash
//   during save never corrupts the previous good document — the engine may
//   read it at any moment.
// - A missing document is a fresh install: defaults are returned, and the
//   file is created on first save.
// - A malformed document is an error, not a silent reset: overwriting a
//   document the engine still half-understands would destroy user data.
// - Mutations are load-modify-save so concurrent edits from another writer
//   are not clobbered wholesale between list operations.

use crate::core::model::{ChromeProfile, CustomApp, ExecutionPlan, Settings};
use crate::util::error::SettingsError;
use std::path::{Path, PathBuf};

/// Handle on the engine settings document.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Location of the document (shown to the user after a save).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, or defaults when none exists yet.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No settings document; using defaults");
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| SettingsError::Read {
            path: self.path.clone(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| SettingsError::Malformed {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Save the document atomically (write temp → rename).
    ///
    /// Creates all parent directories as needed. A crash between write and
    /// rename loses the new document but never corrupts the previous one
    /// (rename is atomic on all supported platforms).
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| SettingsError::Write {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| SettingsError::Serialise { source: e })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json.as_bytes()).map_err(|e| SettingsError::Write {
            path: tmp.clone(),
            source: e,
        })?;

        std::fs::rename(&tmp, &self.path).map_err(|e| {
            // Clean up the temp file on failure; ignore any secondary error.
            let _ = std::fs::remove_file(&tmp);
            SettingsError::Write {
                path: self.path.clone(),
                source: e,
            }
        })?;

        tracing::debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    // -------------------------------------------------------------------
    // Execution plans
    // -------------------------------------------------------------------

    pub fn add_execution_plan(&self, plan: ExecutionPlan) -> Result<(), SettingsError> {
        let mut settings = self.load()?;
        settings.execution_plans.push(plan);
        self.save(&settings)
    }

    pub fn update_execution_plan(
        &self,
        index: usize,
        plan: ExecutionPlan,
    ) -> Result<(), SettingsError> {
        let mut settings = self.load()?;
        let len = settings.execution_plans.len();
        match settings.execution_plans.get_mut(index) {
            Some(slot) => {
                *slot = plan;
                self.save(&settings)
            }
            None => Err(SettingsError::IndexOutOfBounds {
                collection: "execution plan",
                index,
                len,
            }),
        }
    }

    pub fn remove_execution_plan(&self, index: usize) -> Result<(), SettingsError> {
        let mut settings = self.load()?;
        let len = settings.execution_plans.len();
        if index >= len {
            return Err(SettingsError::IndexOutOfBounds {
                collection: "execution plan",
                index,
                len,
            });
        }
        settings.execution_plans.remove(index);
        self.save(&settings)
    }

    // -------------------------------------------------------------------
    // Chrome profiles
    // -------------------------------------------------------------------

    pub fn add_chrome_profile(&self, profile: ChromeProfile) -> Result<(), SettingsError> {
        let mut settings = self.load()?;
        settings.chrome_profiles.push(profile);
        self.save(&settings)
    }

    pub fn update_chrome_profile(
        &self,
        index: usize,
        profile: ChromeProfile,
    ) -> Result<(), SettingsError> {
        let mut settings = self.load()?;
        let len = settings.chrome_profiles.len();
        match settings.chrome_profiles.get_mut(index) {
            Some(slot) => {
                *slot = profile;
                self.save(&settings)
            }
            None => Err(SettingsError::IndexOutOfBounds {
                collection: "chrome profile",
                index,
                len,
            }),
        }
    }

    pub fn remove_chrome_profile(&self, index: usize) -> Result<(), SettingsError> {
        let mut settings = self.load()?;
        let len = settings.chrome_profiles.len();
        if index >= len {
            return Err(SettingsError::IndexOutOfBounds {
                collection: "chrome profile",
                index,
                len,
            });
        }
        settings.chrome_profiles.remove(index);
        self.save(&settings)
    }

    // -------------------------------------------------------------------
    // Custom apps
    // -------------------------------------------------------------------

    pub fn add_custom_app(&self, app: CustomApp) -> Result<(), SettingsError> {
        let mut settings = self.load()?;
        settings.custom_apps.push(app);
        self.save(&settings)
    }

    pub fn update_custom_app(&self, index: usize, app: CustomApp) -> Result<(), SettingsError> {
        let mut settings = self.load()?;
        let len = settings.custom_apps.len();
        match settings.custom_apps.get_mut(index) {
            Some(slot) => {
                *slot = app;
                self.save(&settings)
            }
            None => Err(SettingsError::IndexOutOfBounds {
                collection: "custom app",
                index,
                len,
            }),
        }
    }

    pub fn remove_custom_app(&self, index: usize) -> Result<(), SettingsError> {
        let mut settings = self.load()?;
        let len = settings.custom_apps.len();
        if index >= len {
            return Err(SettingsError::IndexOutOfBounds {
                collection: "custom app",
                index,
                len,
            });
        }
        settings.custom_apps.remove(index);
        self.save(&settings)
    }
}

// =============================================================================
// Unit tests
// =============================================================================
