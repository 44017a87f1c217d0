// Assistant Console - bridge/startup.rs
//
// Windows startup registration: a value under the per-user Run key that
// points at the engine sidecar, so the engine starts with the session
// without the console needing to run.
//
// Non-Windows platforms report "not registered" on query and Unsupported
// on toggle — the General tab disables the switch accordingly.

use crate::util::error::StartupError;

#[cfg(target_os = "windows")]
use crate::util::constants::STARTUP_RUN_VALUE_NAME;

#[cfg(target_os = "windows")]
const RUN_KEY_PATH: &str = "Software\\Microsoft\\Windows\\CurrentVersion\\Run";

/// Enable or disable starting the engine at login.
pub fn set_enabled(enable: bool, sidecar_path: Option<&std::path::Path>) -> Result<(), StartupError> {
    #[cfg(target_os = "windows")]
    {
        use winreg::enums::{HKEY_CURRENT_USER, KEY_READ, KEY_WRITE};
        use winreg::RegKey;

        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let run = hkcu
            .open_subkey_with_flags(RUN_KEY_PATH, KEY_WRITE | KEY_READ)
            .map_err(|e| StartupError::Registry {
                operation: "open Run key",
                source: e,
            })?;

        if enable {
            let sidecar = sidecar_path.ok_or(StartupError::Registry {
                operation: "resolve sidecar path",
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "engine sidecar binary not found",
                ),
            })?;
            let value = sidecar.to_string_lossy().to_string();
            run.set_value(STARTUP_RUN_VALUE_NAME, &value)
                .map_err(|e| StartupError::Registry {
                    operation: "set Run value",
                    source: e,
                })?;
            tracing::info!(sidecar = %value, "Startup registration enabled");
        } else {
            // Deleting a value that does not exist is already the desired state.
            run.delete_value(STARTUP_RUN_VALUE_NAME).ok();
            tracing::info!("Startup registration disabled");
        }
        Ok(())
    }
    #[cfg(not(target_os = "windows"))]
    {
        let _ = (enable, sidecar_path);
        Err(StartupError::Unsupported)
    }
}

/// Query whether the engine is registered to start at login.
pub fn is_enabled() -> Result<bool, StartupError> {
    #[cfg(target_os = "windows")]
    {
        use winreg::enums::{HKEY_CURRENT_USER, KEY_READ};
        use winreg::RegKey;

        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let run = hkcu
            .open_subkey_with_flags(RUN_KEY_PATH, KEY_READ)
            .map_err(|e| StartupError::Registry {
                operation: "open Run key",
                source: e,
            })?;

        Ok(run.get_value::<String, _>(STARTUP_RUN_VALUE_NAME).is_ok())
    }
    #[cfg(not(target_os = "windows"))]
    {
        Ok(false)
    }
}

// =============================================================================
// Unit tests
// =============================================================================
