//! Process-local identifier generation.
//!
//! Ids are `prefix_timestamp_sequence`. They are unique within one running
//! process only; two processes started in the same millisecond can collide.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a new identifier with the given prefix.
pub fn generate_id(prefix: &str) -> String {
    let sequence = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("{prefix}_{millis}_{sequence}")
}
