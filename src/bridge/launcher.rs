// Assistant Console - bridge/launcher.rs
//
// Starting the engine sidecar and cleaning up orphaned instances.
//
// The engine ships as a standalone binary (`main` / `main.exe`) inside the
// shared resources directory. The console only spawns it detached and
// never waits on it — lifecycle beyond that point belongs to the engine
// itself and is observed through the health endpoint.

use crate::util::constants::RESOURCES_DIR_NAME;
use crate::util::error::BridgeError;
use std::path::{Path, PathBuf};

/// Engine binary file names, in preference order.
const SIDECAR_NAMES: &[&str] = &["main.exe", "main"];

/// Locate and spawn the engine sidecar.
///
/// `resources_dir` is the resolved shared resources directory, when one
/// exists; the executable's own directory is always searched as well.
pub fn start_engine(resources_dir: Option<&Path>) -> Result<(), BridgeError> {
    let sidecar = sidecar_path(resources_dir)?;

    // Spawn detached relative to the sidecar's directory so the engine
    // finds its own resources with relative paths.
    let mut command = std::process::Command::new(&sidecar);
    if let Some(dir) = sidecar.parent() {
        command.current_dir(dir);
    }

    command.spawn().map_err(|e| BridgeError::Io {
        operation: "spawn engine sidecar",
        source: e,
    })?;

    tracing::info!(sidecar = %sidecar.display(), "Engine sidecar started");
    Ok(())
}

/// Best-effort kill of orphaned engine processes.
///
/// Called at console startup and on window close so a crashed console
/// session never leaves a headless engine holding the microphone. On
/// non-Windows platforms the engine manages its own lifetime and this is
/// a no-op.
pub fn cleanup_orphans() {
    #[cfg(target_os = "windows")]
    {
        match std::process::Command::new("taskkill")
            .args(["/f", "/im", "main.exe"])
            .output()
        {
            Ok(output) if output.status.success() => {
                tracing::info!("Cleaned up orphaned engine processes");
            }
            Ok(_) => {
                tracing::debug!("No orphaned engine processes found");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Orphan cleanup failed");
            }
        }
    }
}

/// Search the known deployment layouts for the sidecar binary.
///
/// Also used by the startup registration to record the path the Run key
/// should point at.
pub fn sidecar_path(resources_dir: Option<&Path>) -> Result<PathBuf, BridgeError> {
    let mut search_dirs: Vec<PathBuf> = Vec::new();

    if let Some(dir) = resources_dir {
        search_dirs.push(dir.to_path_buf());
    }
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    {
        search_dirs.push(exe_dir.join(RESOURCES_DIR_NAME));
        search_dirs.push(exe_dir);
    }

    let mut searched = Vec::new();
    for dir in &search_dirs {
        for name in SIDECAR_NAMES {
            let candidate = dir.join(name);
            if candidate.exists() {
                return Ok(candidate);
            }
            searched.push(candidate);
        }
    }

    Err(BridgeError::SidecarNotFound { searched })
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// The resources directory is searched first and both binary names
    /// are recognised.
    #[test]
    fn test_sidecar_path_in_resources_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main"), b"#!/bin/sh\n").unwrap();

        let found = sidecar_path(Some(dir.path())).unwrap();
        assert_eq!(found, dir.path().join("main"));
    }

    /// With no binary anywhere, the error lists the searched locations.
    #[test]
    fn test_sidecar_path_missing_reports_locations() {
        let dir = tempfile::tempdir().unwrap();
        let err = sidecar_path(Some(dir.path())).unwrap_err();
        match err {
            BridgeError::SidecarNotFound { searched } => {
                assert!(searched.iter().any(|p| p.starts_with(dir.path())));
            }
            other => panic!("expected SidecarNotFound, got {other:?}"),
        }
    }
}
