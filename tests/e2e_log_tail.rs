// Assistant Console - tests/e2e_log_tail.rs
//
// End-to-end tests for the log tail pipeline: a real file on disk, the
// real FileLogSource, and the real LogTailView with its worker threads —
// no mocks, no stubs. This exercises the full path from bytes appended to
// the engine log to text visible in the view buffer.
//
// The poll interval is shortened to keep the tests fast; all other
// constants are the production values.

use assistant_console::app::log_view::LogTailView;
use assistant_console::bridge::log_source::FileLogSource;
use assistant_console::util::constants::LOG_SEED_TAIL_LINES;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Fast poll cadence for tests.
const TEST_POLL_MS: u64 = 50;

// =============================================================================
// Helpers
// =============================================================================

fn view_over(path: PathBuf) -> LogTailView {
    LogTailView::new(Arc::new(FileLogSource::new(path)), TEST_POLL_MS)
}

/// Tick the view until `cond` holds or `timeout` passes.
fn drive_until<F>(view: &mut LogTailView, timeout: Duration, cond: F) -> bool
where
    F: Fn(&LogTailView) -> bool,
{
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        view.tick(Instant::now());
        if cond(view) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    false
}

/// Tick the view for a fixed duration (for asserting nothing changes).
fn drive_for(view: &mut LogTailView, duration: Duration) {
    let deadline = Instant::now() + duration;
    while Instant::now() < deadline {
        view.tick(Instant::now());
        std::thread::sleep(Duration::from_millis(10));
    }
}

fn write_lines(path: &std::path::Path, range: std::ops::RangeInclusive<u32>) {
    let mut body = String::new();
    for i in range {
        body.push_str(&format!("engine event {i:04}\n"));
    }
    std::fs::write(path, body).unwrap();
}

// =============================================================================
// Mount / seed
// =============================================================================

/// Mounting over an existing log seeds the view with the last N lines and
/// places the cursor at the end of file.
#[test]
fn e2e_mount_seeds_with_tail_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("os_assistant.log");
    write_lines(&path, 1..=40);
    let file_len = std::fs::metadata(&path).unwrap().len();

    let mut view = view_over(path.clone());
    assert!(
        drive_until(&mut view, Duration::from_secs(5), |v| !v.buffer().is_empty()),
        "seed never arrived"
    );

    // Exactly the last LOG_SEED_TAIL_LINES lines are visible (the final
    // newline leaves one empty trailing split).
    assert!(view.buffer().contains("engine event 0040"));
    assert!(!view.buffer().contains("engine event 0030"));
    let non_empty = view.buffer().lines().filter(|l| !l.is_empty()).count();
    assert!(
        non_empty <= LOG_SEED_TAIL_LINES,
        "seed returned {non_empty} lines"
    );

    assert_eq!(view.cursor(), file_len);
    assert!(view.source_path().ends_with("os_assistant.log"));
}

/// Mounting over a missing log is quiet: empty buffer, cursor stays 0,
/// and the view keeps polling without erroring.
#[test]
fn e2e_mount_over_missing_log_stays_quiet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("os_assistant.log");

    let mut view = view_over(path.clone());
    drive_for(&mut view, Duration::from_millis(300));
    assert_eq!(view.buffer(), "");
    assert_eq!(view.cursor(), 0);

    // The log appearing later is picked up by the regular poll.
    write_lines(&path, 1..=3);
    assert!(
        drive_until(&mut view, Duration::from_secs(5), |v| !v.buffer().is_empty()),
        "content never arrived after the log appeared"
    );
    assert!(view.buffer().contains("engine event 0003"));
}

// =============================================================================
// Incremental tailing
// =============================================================================

/// Lines appended after the mount stream into the buffer and advance the
/// cursor; already-seen bytes are never re-read into the view.
#[test]
fn e2e_appended_lines_stream_in() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("os_assistant.log");
    write_lines(&path, 1..=12);

    let mut view = view_over(path.clone());
    assert!(drive_until(&mut view, Duration::from_secs(5), |v| {
        !v.buffer().is_empty()
    }));
    let cursor_after_seed = view.cursor();

    let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(b"appended alpha\nappended beta\n").unwrap();
    drop(file);

    assert!(
        drive_until(&mut view, Duration::from_secs(5), |v| {
            v.buffer().contains("appended beta")
        }),
        "appended content never arrived"
    );
    assert!(view.buffer().contains("appended alpha"));
    assert!(view.cursor() > cursor_after_seed);

    // The seed content was not duplicated by the incremental fetch.
    assert_eq!(view.buffer().matches("engine event 0012").count(), 1);
}

/// Polls with no new content are no-ops: buffer and cursor stay put.
#[test]
fn e2e_noop_polls_change_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("os_assistant.log");
    write_lines(&path, 1..=5);

    let mut view = view_over(path);
    assert!(drive_until(&mut view, Duration::from_secs(5), |v| {
        !v.buffer().is_empty()
    }));

    let buffer = view.buffer().to_string();
    let cursor = view.cursor();

    // Several empty poll cycles.
    drive_for(&mut view, Duration::from_millis(400));

    assert_eq!(view.buffer(), buffer);
    assert_eq!(view.cursor(), cursor);
}

/// Pause halts the timer: content appended while paused stays invisible,
/// then resume picks it up immediately.
#[test]
fn e2e_pause_and_resume() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("os_assistant.log");
    write_lines(&path, 1..=5);

    let mut view = view_over(path.clone());
    assert!(drive_until(&mut view, Duration::from_secs(5), |v| {
        !v.buffer().is_empty()
    }));

    view.pause();
    let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(b"while paused\n").unwrap();
    drop(file);

    drive_for(&mut view, Duration::from_millis(300));
    assert!(
        !view.buffer().contains("while paused"),
        "paused view must not fetch"
    );

    view.resume();
    assert!(
        drive_until(&mut view, Duration::from_secs(5), |v| {
            v.buffer().contains("while paused")
        }),
        "resume never picked up the backlog"
    );
}

// =============================================================================
// Clear / rotation
// =============================================================================

/// Clear empties the view and the next cycles re-seed from the beginning.
#[test]
fn e2e_clear_reseeds_from_scratch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("os_assistant.log");
    write_lines(&path, 1..=8);

    let mut view = view_over(path);
    assert!(drive_until(&mut view, Duration::from_secs(5), |v| {
        !v.buffer().is_empty()
    }));

    view.clear();
    assert_eq!(view.buffer(), "");
    assert_eq!(view.cursor(), 0);

    assert!(
        drive_until(&mut view, Duration::from_secs(5), |v| {
            v.buffer().contains("engine event 0008")
        }),
        "view never re-seeded after clear"
    );
}

/// After the engine rotates (truncates) its log, stale tail responses are
/// ignored and an explicit clear recovers the view.
#[test]
fn e2e_rotation_recovers_via_clear() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("os_assistant.log");
    write_lines(&path, 1..=30);

    let mut view = view_over(path.clone());
    assert!(drive_until(&mut view, Duration::from_secs(5), |v| {
        !v.buffer().is_empty()
    }));
    let cursor_before = view.cursor();

    // Rotation: the file is rewritten much smaller.
    std::fs::write(&path, b"fresh after rotation\n").unwrap();

    // Stale responses (offset below the cursor) must not regress anything.
    drive_for(&mut view, Duration::from_millis(300));
    assert_eq!(view.cursor(), cursor_before);
    assert!(!view.buffer().contains("fresh after rotation"));

    view.clear();
    assert!(
        drive_until(&mut view, Duration::from_secs(5), |v| {
            v.buffer().contains("fresh after rotation")
        }),
        "clear never recovered the rotated log"
    );
    assert_eq!(view.cursor(), 21);
}
