// Assistant Console - app/log_view.rs
//
// The log tail view model: maintains a locally bounded, continuously
// growing view of the engine's append-only log, fetched incrementally,
// without re-reading already-seen bytes and without unbounded memory.
//
// Architecture:
//   - `LogTailView` lives on the UI thread; each fetch cycle runs on a
//     short-lived worker thread and reports back over an mpsc channel the
//     UI drains once per frame (same pattern as the health manager).
//   - The in-flight guard is the presence of the pending receiver, so at
//     most one cycle runs at a time and replies are processed strictly in
//     request order.
//   - Unmounting (dropping the view) or `clear()` drops the receiver; a
//     late worker reply then fails its send and is discarded wholesale.
//
// Two independent cadences:
//   - fetch: one cycle per `LOG_POLL_INTERVAL_MS` while live, skipped
//     while a cycle is in flight; an immediate cycle fires on mount and
//     on resume, and a manual refresh may run even while paused.
//   - commit: fetched content becomes visible at most once per
//     `LOG_COMMIT_THROTTLE_MS`. Content that arrives inside the throttle
//     window is queued and flushed with the next allowed commit — the
//     cursor still advances immediately, so nothing is re-fetched and
//     nothing is dropped from the view.
//
// Failure policy: a transport error or unparseable offset leaves buffer
// and cursor untouched, is logged, and the next scheduled cycle retries.
// No failure is fatal and none surfaces as a user-facing error state.

use crate::bridge::log_source::{LogSource, TailRequest};
use crate::core::logbuf;
use crate::core::model::LogChunk;
use crate::util::constants::{
    LOG_BUFFER_CAP, LOG_COMMIT_THROTTLE_MS, LOG_EVICT_CUT_DEN, LOG_EVICT_CUT_NUM,
    LOG_FETCH_MAX_BYTES, LOG_SEED_TAIL_LINES,
};
use crate::util::error::BridgeError;
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

/// Outcome of one fetch cycle, delivered from the worker thread.
struct FetchReply {
    /// Cursor value captured when the cycle started.
    request_offset: u64,
    result: Result<LogChunk, BridgeError>,
}

/// View model for the live engine-log pane.
pub struct LogTailView {
    source: Arc<dyn LogSource>,
    poll_interval: Duration,

    /// Accumulated display text, bounded by `LOG_BUFFER_CAP`.
    buffer: String,
    /// Content fetched but not yet visible (held back by the commit throttle).
    pending: String,
    /// Last known offset into the log source. Only ever increases, except
    /// through `clear()`.
    cursor: u64,
    /// Source location as reported by the host (display only).
    source_path: String,

    paused: bool,
    autoscroll: bool,
    /// One-shot flag consumed by the panel to pin the scroll position.
    scroll_to_bottom: bool,

    /// Receiver for the cycle currently in flight; `Some` doubles as the
    /// single-flight guard.
    in_flight: Option<mpsc::Receiver<FetchReply>>,
    /// When the last buffer commit happened (None = commit immediately).
    last_commit: Option<Instant>,
    /// When the last cycle was started (None = fire immediately).
    last_cycle: Option<Instant>,
}

impl LogTailView {
    pub fn new(source: Arc<dyn LogSource>, poll_interval_ms: u64) -> Self {
        Self {
            source,
            poll_interval: Duration::from_millis(poll_interval_ms),
            buffer: String::new(),
            pending: String::new(),
            cursor: 0,
            source_path: String::new(),
            paused: false,
            autoscroll: true,
            scroll_to_bottom: false,
            in_flight: None,
            last_commit: None,
            last_cycle: None,
        }
    }

    // -------------------------------------------------------------------
    // Accessors for the panel
    // -------------------------------------------------------------------

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn autoscroll(&self) -> bool {
        self.autoscroll
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Consume the scroll-to-bottom flag (set by commits while autoscroll
    /// is on).
    pub fn take_scroll_to_bottom(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_bottom)
    }

    // -------------------------------------------------------------------
    // Frame driver
    // -------------------------------------------------------------------

    /// Advance the view model: drain a finished cycle, flush throttled
    /// content whose window has passed, and start the next cycle when due.
    ///
    /// Called once per frame. Returns true when the visible buffer changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if let Some(rx) = self.in_flight.take() {
            match rx.try_recv() {
                Ok(reply) => {
                    changed |= self.process_reply(reply, now);
                }
                Err(mpsc::TryRecvError::Empty) => {
                    // Still in flight — keep the guard.
                    self.in_flight = Some(rx);
                }
                Err(mpsc::TryRecvError::Disconnected) => {
                    // Worker died without replying. Guard stays released so
                    // the next scheduled cycle recovers.
                    tracing::warn!("Log fetch worker exited without a reply");
                }
            }
        }

        if !self.pending.is_empty() && self.commit_allowed(now) {
            self.commit(now);
            changed = true;
        }

        if !self.paused && self.in_flight.is_none() && self.cycle_due(now) {
            self.start_cycle(now);
        }

        changed
    }

    // -------------------------------------------------------------------
    // Controls
    // -------------------------------------------------------------------

    /// Manual refresh: runs even while paused, but still honours the
    /// single-flight guard.
    pub fn refresh(&mut self) {
        self.start_cycle(Instant::now());
    }

    /// Halt the poll timer. A cycle already in flight completes and its
    /// reply is still applied.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Restart the poll timer and trigger one cycle immediately.
    pub fn resume(&mut self) {
        self.paused = false;
        self.start_cycle(Instant::now());
    }

    pub fn toggle_autoscroll(&mut self) {
        self.autoscroll = !self.autoscroll;
        if self.autoscroll {
            self.scroll_to_bottom = true;
        }
    }

    /// Reset the view to empty, unconditionally.
    ///
    /// The cursor returns to 0 so the next cycle re-requests from the
    /// beginning with the tail-lines seed. A cycle in flight at this
    /// moment is discarded by dropping its receiver — its stale reply must
    /// not resurrect pre-clear content or a pre-clear cursor.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.pending.clear();
        self.cursor = 0;
        self.last_commit = None;
        self.in_flight = None;
    }

    // -------------------------------------------------------------------
    // Cycle machinery
    // -------------------------------------------------------------------

    fn cycle_due(&self, now: Instant) -> bool {
        match self.last_cycle {
            None => true,
            Some(at) => now.duration_since(at) >= self.poll_interval,
        }
    }

    fn commit_allowed(&self, now: Instant) -> bool {
        match self.last_commit {
            None => true,
            Some(at) => {
                now.duration_since(at) >= Duration::from_millis(LOG_COMMIT_THROTTLE_MS)
            }
        }
    }

    /// Start one fetch cycle on a worker thread.
    ///
    /// No-op while a cycle is already in flight. The cursor is captured
    /// here and travels with the reply so processing never races a cursor
    /// change made after the request was issued.
    fn start_cycle(&mut self, now: Instant) {
        if self.in_flight.is_some() {
            return;
        }

        let request_offset = self.cursor;
        let req = TailRequest {
            offset: request_offset,
            max_bytes: LOG_FETCH_MAX_BYTES,
            last_lines: if request_offset == 0 {
                Some(LOG_SEED_TAIL_LINES)
            } else {
                None
            },
        };

        let (tx, rx) = mpsc::channel();
        let source = Arc::clone(&self.source);
        self.in_flight = Some(rx);
        self.last_cycle = Some(now);

        std::thread::spawn(move || {
            let result = source.fetch(&req);
            // Send failure means the view was cleared or dropped — the
            // reply is intentionally discarded.
            let _ = tx.send(FetchReply {
                request_offset,
                result,
            });
        });
    }

    /// Apply one cycle's reply to the view state.
    fn process_reply(&mut self, reply: FetchReply, now: Instant) -> bool {
        let chunk = match reply.result {
            Ok(chunk) => chunk,
            Err(e) => {
                tracing::warn!(error = %e, "Log fetch cycle failed; will retry");
                return false;
            }
        };

        let Some(next_offset) = chunk.offset.normalize() else {
            tracing::warn!(offset = ?chunk.offset, "Log fetch returned unparseable offset; skipping cycle");
            return false;
        };

        // The source identifier is display-only and always current.
        self.source_path = chunk.path;

        if !chunk.content.is_empty() && next_offset > reply.request_offset {
            // Genuinely new data. Queue it; the throttle decides whether it
            // becomes visible this frame or with the next allowed commit.
            let normalized = logbuf::normalize_line_endings(&chunk.content);
            self.pending = logbuf::merge(&self.pending, &normalized);
            self.cursor = next_offset;

            if self.commit_allowed(now) {
                self.commit(now);
                return true;
            }
            return false;
        }

        if next_offset > self.cursor {
            // No content but the source moved on (skipped or truncated
            // bytes). Follow it so those bytes are not re-requested.
            self.cursor = next_offset;
        }

        false
    }

    /// Move queued content into the visible buffer and enforce the cap.
    fn commit(&mut self, now: Instant) {
        let incoming = std::mem::take(&mut self.pending);
        let merged = logbuf::merge(&self.buffer, &incoming);
        self.buffer = logbuf::enforce_cap(
            merged,
            LOG_BUFFER_CAP,
            LOG_EVICT_CUT_NUM,
            LOG_EVICT_CUT_DEN,
        );
        self.last_commit = Some(now);
        if self.autoscroll {
            self.scroll_to_bottom = true;
        }
    }
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::RawOffset;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Source that is never actually fetched from — for tests that drive
    /// `process_reply` directly.
    struct NullSource;

    impl LogSource for NullSource {
        fn fetch(&self, _req: &TailRequest) -> Result<LogChunk, BridgeError> {
            Ok(LogChunk {
                content: String::new(),
                offset: 0u64.into(),
                path: String::new(),
            })
        }
    }

    /// Source that records every request and counts fetches; optionally
    /// sleeps so a cycle can be observed in flight.
    struct RecordingSource {
        requests: Mutex<Vec<(u64, Option<usize>)>>,
        fetches: AtomicUsize,
        delay: Duration,
        reply: Mutex<LogChunk>,
    }

    impl RecordingSource {
        fn new(delay_ms: u64, reply: LogChunk) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                fetches: AtomicUsize::new(0),
                delay: Duration::from_millis(delay_ms),
                reply: Mutex::new(reply),
            }
        }
    }

    impl LogSource for RecordingSource {
        fn fetch(&self, req: &TailRequest) -> Result<LogChunk, BridgeError> {
            self.requests
                .lock()
                .unwrap()
                .push((req.offset, req.last_lines));
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
            Ok(self.reply.lock().unwrap().clone())
        }
    }

    fn view() -> LogTailView {
        LogTailView::new(Arc::new(NullSource), 1000)
    }

    fn reply(request_offset: u64, content: &str, offset: RawOffset, path: &str) -> FetchReply {
        FetchReply {
            request_offset,
            result: Ok(LogChunk {
                content: content.to_string(),
                offset,
                path: path.to_string(),
            }),
        }
    }

    /// Initial mount at offset 0: content applied, string offset
    /// normalised, path shown.
    #[test]
    fn initial_mount_applies_seed_chunk() {
        let mut v = view();
        let t0 = Instant::now();
        let changed = v.process_reply(
            reply(0, "line1\nline2\n", RawOffset::Text("12".into()), "/var/log/x"),
            t0,
        );
        assert!(changed);
        assert_eq!(v.buffer(), "line1\nline2\n");
        assert_eq!(v.cursor(), 12);
        assert_eq!(v.source_path(), "/var/log/x");
    }

    /// A poll that returns no offset advance is a no-op cycle.
    #[test]
    fn non_advancing_cycle_changes_nothing() {
        let mut v = view();
        let t0 = Instant::now();
        v.process_reply(reply(0, "line1\n", RawOffset::Number(12), "/l"), t0);

        let changed = v.process_reply(
            reply(12, "", RawOffset::Text("12".into()), "/l"),
            t0 + Duration::from_millis(1000),
        );
        assert!(!changed);
        assert_eq!(v.buffer(), "line1\n");
        assert_eq!(v.cursor(), 12);
    }

    /// The cursor never regresses, and content reported at a stale offset
    /// is never applied.
    #[test]
    fn stale_offset_does_not_regress_cursor_or_apply_content() {
        let mut v = view();
        let t0 = Instant::now();
        v.process_reply(reply(0, "fresh\n", RawOffset::Number(100), "/l"), t0);

        let changed = v.process_reply(
            reply(100, "stale tail after rotation\n", RawOffset::Number(40), "/l"),
            t0 + Duration::from_millis(1000),
        );
        assert!(!changed);
        assert_eq!(v.cursor(), 100);
        assert_eq!(v.buffer(), "fresh\n");
    }

    /// An offset advance with empty content moves the cursor without
    /// touching the buffer (source skipped/truncated bytes).
    #[test]
    fn offset_advance_without_content_moves_cursor_only() {
        let mut v = view();
        let t0 = Instant::now();
        v.process_reply(reply(0, "a\n", RawOffset::Number(2), "/l"), t0);

        v.process_reply(
            reply(2, "", RawOffset::Number(5000), "/l"),
            t0 + Duration::from_millis(1000),
        );
        assert_eq!(v.cursor(), 5000);
        assert_eq!(v.buffer(), "a\n");
    }

    /// A failed cycle leaves buffer and cursor untouched.
    #[test]
    fn transport_failure_is_a_noop() {
        let mut v = view();
        let t0 = Instant::now();
        v.process_reply(reply(0, "kept\n", RawOffset::Number(5), "/l"), t0);

        let failed = FetchReply {
            request_offset: 5,
            result: Err(BridgeError::MalformedResponse {
                operation: "tail fetch",
                detail: "test".into(),
            }),
        };
        assert!(!v.process_reply(failed, t0 + Duration::from_millis(1000)));
        assert_eq!(v.buffer(), "kept\n");
        assert_eq!(v.cursor(), 5);
    }

    /// An unparseable offset is treated like a transport failure.
    #[test]
    fn unparseable_offset_skips_the_cycle() {
        let mut v = view();
        let t0 = Instant::now();
        v.process_reply(reply(0, "kept\n", RawOffset::Number(5), "/l"), t0);

        assert!(!v.process_reply(
            reply(5, "junk\n", RawOffset::Text("not-a-number".into()), "/l"),
            t0 + Duration::from_millis(1000),
        ));
        assert_eq!(v.buffer(), "kept\n");
        assert_eq!(v.cursor(), 5);
    }

    /// The source path is updated even by cycles that carry no new data.
    #[test]
    fn path_updates_unconditionally() {
        let mut v = view();
        let t0 = Instant::now();
        v.process_reply(reply(0, "", RawOffset::Number(0), "/var/log/renamed"), t0);
        assert_eq!(v.source_path(), "/var/log/renamed");
    }

    /// Open-question decision: content arriving inside the throttle window
    /// is queued, not dropped; the cursor advances immediately; the queued
    /// content becomes visible with the next allowed commit.
    #[test]
    fn throttled_content_is_queued_not_dropped() {
        let mut v = view();
        let t0 = Instant::now();
        v.process_reply(reply(0, "first\n", RawOffset::Number(6), "/l"), t0);
        assert_eq!(v.buffer(), "first\n");

        // 50 ms later: inside the 100 ms window — cursor moves, buffer not yet.
        let t1 = t0 + Duration::from_millis(50);
        let changed = v.process_reply(reply(6, "second\n", RawOffset::Number(13), "/l"), t1);
        assert!(!changed);
        assert_eq!(v.cursor(), 13, "cursor advances immediately");
        assert_eq!(v.buffer(), "first\n", "commit deferred");

        // Once the window passes, a tick flushes the queue.
        v.pause(); // keep the tick from spawning a real cycle
        let t2 = t0 + Duration::from_millis(200);
        assert!(v.tick(t2));
        assert_eq!(v.buffer(), "first\nsecond\n");
    }

    /// Sequential commits and queued-then-flushed commits produce the same
    /// buffer (queuing never changes the rendered output).
    #[test]
    fn queued_flush_matches_sequential_commits() {
        let t0 = Instant::now();

        let mut sequential = view();
        sequential.process_reply(reply(0, "a", RawOffset::Number(1), "/l"), t0);
        sequential.process_reply(
            reply(1, "b", RawOffset::Number(2), "/l"),
            t0 + Duration::from_millis(500),
        );

        let mut queued = view();
        queued.process_reply(reply(0, "a", RawOffset::Number(1), "/l"), t0);
        queued.process_reply(
            reply(1, "b", RawOffset::Number(2), "/l"),
            t0 + Duration::from_millis(10),
        );
        queued.pause();
        queued.tick(t0 + Duration::from_millis(500));

        assert_eq!(sequential.buffer(), queued.buffer());
        assert_eq!(sequential.buffer(), "a\nb");
    }

    /// Single flight: a manual refresh while a cycle is in flight must not
    /// start a second concurrent cycle.
    #[test]
    fn refresh_during_flight_does_not_double_fetch() {
        let source = Arc::new(RecordingSource::new(
            100,
            LogChunk {
                content: String::new(),
                offset: 0u64.into(),
                path: "/l".into(),
            },
        ));
        let mut v = LogTailView::new(Arc::clone(&source) as Arc<dyn LogSource>, 1000);

        v.refresh();
        v.refresh(); // guard holds — ignored
        v.refresh();

        // Wait out the worker and drain.
        std::thread::sleep(Duration::from_millis(250));
        v.tick(Instant::now());

        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    /// Clear resets precisely: empty buffer, cursor 0, and the next cycle
    /// requests offset 0 with the tail-lines seed again.
    #[test]
    fn clear_resets_and_reseeds() {
        let source = Arc::new(RecordingSource::new(
            0,
            LogChunk {
                content: "seeded\n".into(),
                offset: RawOffset::Number(7),
                path: "/l".into(),
            },
        ));
        let mut v = LogTailView::new(Arc::clone(&source) as Arc<dyn LogSource>, 1000);

        // First cycle: seed request, applied after the worker replies.
        v.refresh();
        let deadline = Instant::now() + Duration::from_secs(2);
        while v.buffer().is_empty() && Instant::now() < deadline {
            v.tick(Instant::now());
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(v.buffer(), "seeded\n");
        assert_eq!(v.cursor(), 7);

        v.clear();
        assert_eq!(v.buffer(), "");
        assert_eq!(v.cursor(), 0);

        // Next cycle re-requests from the beginning with the seed parameter.
        v.refresh();
        std::thread::sleep(Duration::from_millis(100));
        let requests = source.requests.lock().unwrap().clone();
        assert_eq!(requests[0], (0, Some(LOG_SEED_TAIL_LINES)));
        let last = *requests.last().unwrap();
        assert_eq!(last, (0, Some(LOG_SEED_TAIL_LINES)));
    }

    /// A reply in flight when clear() runs is discarded wholesale — it must
    /// not resurrect the old cursor or append stale content.
    #[test]
    fn clear_discards_in_flight_reply() {
        let source = Arc::new(RecordingSource::new(
            100,
            LogChunk {
                content: "stale\n".into(),
                offset: RawOffset::Number(999),
                path: "/l".into(),
            },
        ));
        let mut v = LogTailView::new(Arc::clone(&source) as Arc<dyn LogSource>, 1000);

        v.refresh();
        v.clear(); // worker still sleeping; its reply goes nowhere

        std::thread::sleep(Duration::from_millis(250));
        v.pause();
        v.tick(Instant::now());

        assert_eq!(v.buffer(), "");
        assert_eq!(v.cursor(), 0);
    }

    /// Pausing stops the timer but a manual refresh still works.
    #[test]
    fn manual_refresh_overrides_pause() {
        let source = Arc::new(RecordingSource::new(
            0,
            LogChunk {
                content: String::new(),
                offset: 0u64.into(),
                path: "/l".into(),
            },
        ));
        let mut v = LogTailView::new(Arc::clone(&source) as Arc<dyn LogSource>, 1000);
        v.pause();

        // The timer never fires while paused.
        v.tick(Instant::now());
        assert_eq!(source.fetches.load(Ordering::SeqCst), 0);

        v.refresh();
        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    /// Autoscroll pins the view to the bottom on every commit.
    #[test]
    fn autoscroll_sets_scroll_flag_on_commit() {
        let mut v = view();
        let t0 = Instant::now();
        assert!(v.autoscroll());

        v.process_reply(reply(0, "x\n", RawOffset::Number(2), "/l"), t0);
        assert!(v.take_scroll_to_bottom());
        assert!(!v.take_scroll_to_bottom(), "flag is one-shot");

        v.toggle_autoscroll();
        v.take_scroll_to_bottom();
        v.process_reply(
            reply(2, "y\n", RawOffset::Number(4), "/l"),
            t0 + Duration::from_millis(500),
        );
        assert!(!v.take_scroll_to_bottom(), "no pinning while autoscroll off");
    }

    /// Carriage returns are stripped before content reaches the buffer.
    #[test]
    fn crlf_content_is_normalized() {
        let mut v = view();
        v.process_reply(
            reply(0, "a\r\nb\r\n", RawOffset::Number(8), "/l"),
            Instant::now(),
        );
        assert_eq!(v.buffer(), "a\nb\n");
    }

    /// The buffer stays bounded across merges that overflow the cap.
    #[test]
    fn buffer_stays_bounded_across_large_merges() {
        let mut v = view();
        let t0 = Instant::now();
        let chunk: String = "padding line for cap overflow checks\n".repeat(1500); // ~55 KiB
        let mut offset = 0u64;
        for i in 0..12 {
            let next = offset + chunk.len() as u64;
            v.process_reply(
                reply(offset, &chunk, RawOffset::Number(next), "/l"),
                t0 + Duration::from_millis(1000 * (i + 1)),
            );
            offset = next;
            assert!(
                v.buffer().len() <= LOG_BUFFER_CAP,
                "cap violated at merge {i}: {}",
                v.buffer().len()
            );
        }
        // Eviction keeps the newest content.
        assert!(v.buffer().ends_with("padding line for cap overflow checks\n"));
    }
}
