// Assistant Console - app/health.rs
//
// Engine health manager: owns the latest health report and runs every
// probe, start, and stop request on a worker thread so the UI never waits
// on a socket.
//
// Mirrors the log view's single-flight shape: one outstanding worker at a
// time, results drained once per frame over an mpsc channel. On top of
// that sit two scheduling behaviours:
//   - auto re-check every HEALTH_POLL_INTERVAL_MS while the engine reports
//     an active state (running/processing/starting);
//   - a burst of HEALTH_BURST_CHECKS follow-up checks after a start or
//     stop request, spaced HEALTH_BURST_INTERVAL_MS apart, so the badge
//     tracks the engine through its transition.

use crate::bridge::{health, launcher};
use crate::core::model::HealthStatus;
use crate::util::constants::{
    HEALTH_BURST_CHECKS, HEALTH_BURST_INTERVAL_MS, HEALTH_POLL_INTERVAL_MS,
};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// Result of one worker task.
enum HealthEvent {
    Report(HealthStatus),
    StartFailed(String),
}

/// Owns engine status for the header panel.
pub struct HealthManager {
    latest: Option<HealthStatus>,
    /// Most recent start failure, shown until the next successful action.
    last_error: Option<String>,

    /// Receiver for the outstanding worker; `Some` doubles as the
    /// single-flight guard.
    in_flight: Option<mpsc::Receiver<HealthEvent>>,
    last_check: Option<Instant>,

    /// Follow-up checks left in the current burst.
    burst_remaining: u32,
    next_burst_at: Option<Instant>,
}

impl HealthManager {
    pub fn new() -> Self {
        Self {
            latest: None,
            last_error: None,
            in_flight: None,
            last_check: None,
            burst_remaining: 0,
            next_burst_at: None,
        }
    }

    pub fn latest(&self) -> Option<&HealthStatus> {
        self.latest.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True while a probe/start/stop worker is outstanding (used to show
    /// a spinner and disable the action buttons).
    pub fn busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Drain the outstanding worker and run the auto/burst schedulers.
    /// Returns true when the displayed status changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if let Some(rx) = self.in_flight.take() {
            match rx.try_recv() {
                Ok(HealthEvent::Report(status)) => {
                    self.latest = Some(status);
                    self.last_error = None;
                    changed = true;
                }
                Ok(HealthEvent::StartFailed(message)) => {
                    self.last_error = Some(message);
                    changed = true;
                }
                Err(mpsc::TryRecvError::Empty) => {
                    self.in_flight = Some(rx);
                }
                Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::warn!("Health worker exited without a reply");
                }
            }
        }

        // Burst follow-ups after a start/stop request.
        if self.burst_remaining > 0 {
            if let Some(at) = self.next_burst_at {
                if now >= at && self.in_flight.is_none() {
                    self.burst_remaining -= 1;
                    self.next_burst_at = if self.burst_remaining > 0 {
                        Some(now + Duration::from_millis(HEALTH_BURST_INTERVAL_MS))
                    } else {
                        None
                    };
                    self.spawn_check(now);
                }
            }
        }

        // Steady-state polling while the engine is active.
        let active = self.latest.as_ref().map(|h| h.is_active()).unwrap_or(false);
        if active && self.in_flight.is_none() {
            let due = match self.last_check {
                None => true,
                Some(at) => now.duration_since(at) >= Duration::from_millis(HEALTH_POLL_INTERVAL_MS),
            };
            if due {
                self.spawn_check(now);
            }
        }

        changed
    }

    /// Manual refresh. No-op while a worker is outstanding.
    pub fn request_check(&mut self) {
        self.spawn_check(Instant::now());
    }

    /// Ask the engine to stop, then re-check through a burst.
    pub fn request_stop(&mut self) {
        if self.in_flight.is_some() {
            return;
        }
        let (tx, rx) = mpsc::channel();
        self.in_flight = Some(rx);
        self.last_check = Some(Instant::now());
        std::thread::spawn(move || {
            let status = health::request_stop();
            let _ = tx.send(HealthEvent::Report(status));
        });
        self.schedule_burst();
    }

    /// Spawn the engine sidecar, then re-check through a burst.
    pub fn request_start(&mut self, resources_dir: Option<PathBuf>) {
        if self.in_flight.is_some() {
            return;
        }
        let (tx, rx) = mpsc::channel();
        self.in_flight = Some(rx);
        self.last_check = Some(Instant::now());
        std::thread::spawn(move || {
            let event = match launcher::start_engine(resources_dir.as_deref()) {
                Ok(()) => HealthEvent::Report(health::probe()),
                Err(e) => {
                    tracing::warn!(error = %e, "Engine start failed");
                    HealthEvent::StartFailed(e.to_string())
                }
            };
            let _ = tx.send(event);
        });
        self.schedule_burst();
    }

    fn spawn_check(&mut self, now: Instant) {
        if self.in_flight.is_some() {
            return;
        }
        let (tx, rx) = mpsc::channel();
        self.in_flight = Some(rx);
        self.last_check = Some(now);
        std::thread::spawn(move || {
            let _ = tx.send(HealthEvent::Report(health::probe()));
        });
    }

    fn schedule_burst(&mut self) {
        self.burst_remaining = HEALTH_BURST_CHECKS;
        self.next_burst_at =
            Some(Instant::now() + Duration::from_millis(HEALTH_BURST_INTERVAL_MS));
    }
}

impl Default for HealthManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit tests
// =============================================================================
