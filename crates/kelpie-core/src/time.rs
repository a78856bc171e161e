use std::cell::Cell;

thread_local! {
    static FIXED_NOW_MS: Cell<Option<i64>> = const { Cell::new(None) };
}

/// Overrides "now" (milliseconds since the Unix epoch) for the current thread.
///
/// Every aggregate in this crate (frequency windows, idle thresholds, drag exemptions) is a
/// function of wall-clock time, which makes fixtures produce different outputs from one run to
/// the next.
///
/// This helper provides a minimally invasive mechanism: during the closure, treat "now" as the
/// given fixed instant for deterministic, reproducible tests. `None` uses the system clock.
/// Overrides nest; the previous value is restored when the closure returns.
pub fn with_fixed_now_ms<R>(now_ms: Option<i64>, f: impl FnOnce() -> R) -> R {
    FIXED_NOW_MS.with(|cell| {
        let prev = cell.replace(now_ms);
        let out = f();
        cell.set(prev);
        out
    })
}

/// Milliseconds since the Unix epoch under the active clock semantics.
pub fn now_ms() -> i64 {
    FIXED_NOW_MS
        .with(|cell| cell.get())
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis())
}
