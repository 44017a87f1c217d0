// Assistant Console - core/logbuf.rs
//
// Pure maintenance logic for the bounded log display buffer: line-ending
// normalisation, single-separator merging, and prefix eviction.
//
// No I/O and no view state here — the tail view model (app/log_view.rs)
// owns the cursor/throttle/in-flight machinery and calls into these
// functions for every buffer mutation, which keeps the invariants unit-
// testable without threads or timers:
//
//   - merged output contains exactly one '\n' between old and new content
//     (none when the old buffer is empty or already newline-terminated);
//   - after eviction the buffer never exceeds the cap, the cut removes a
//     prefix only, and the cut lands just after a line boundary whenever
//     one exists at or beyond the cut point.

/// Strip carriage returns so the buffer holds uniform '\n' line endings
/// regardless of how the engine writes its log on Windows.
pub fn normalize_line_endings(content: &str) -> String {
    content.replace('\r', "")
}

/// Append `incoming` to `prev` with exactly one separating newline.
///
/// No separator is inserted when `prev` is empty (the seed chunk starts
/// the buffer verbatim) or when `prev` already ends in a newline.
pub fn merge(prev: &str, incoming: &str) -> String {
    if prev.is_empty() {
        return incoming.to_string();
    }
    let mut merged = String::with_capacity(prev.len() + incoming.len() + 1);
    merged.push_str(prev);
    if !prev.ends_with('\n') {
        merged.push('\n');
    }
    merged.push_str(incoming);
    merged
}

/// Enforce the retained-size cap on a merged buffer.
///
/// Returns the input untouched while it fits. Otherwise computes a cut
/// point at `cut_num/cut_den` of the merged length, searches forward for
/// the next line boundary, and keeps the suffix starting just after that
/// boundary — or, when no boundary exists at or after the cut point, the
/// raw suffix from the cut point itself (aligned to a char boundary so
/// multi-byte sequences are never split).
pub fn enforce_cap(merged: String, cap: usize, cut_num: usize, cut_den: usize) -> String {
    if merged.len() <= cap {
        return merged;
    }

    let mut cut = merged.len() * cut_num / cut_den;
    while cut < merged.len() && !merged.is_char_boundary(cut) {
        cut += 1;
    }

    match merged[cut..].find('\n') {
        Some(rel) => merged[cut + rel + 1..].to_string(),
        None => merged[cut..].to_string(),
    }
}

// =============================================================================
// Unit tests
// =============================================================================
