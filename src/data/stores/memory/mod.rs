//! In-memory store backends. Same contract as the MongoDB backends, no
//! external service; the test suite seeds and tears these down.

pub mod author_store;
pub mod post_store;

pub use author_store::MemoryAuthorStore;
pub use post_store::MemoryPostStore;

use std::sync::atomic::{AtomicU64, Ordering};

/// Store-assigned opaque id, formatted like a 24-hex document id. Starts at
/// 1 so the all-zero string stays free for tests to use as an unknown id.
pub(crate) fn next_id(sequence: &AtomicU64) -> String {
    format!("{:024x}", sequence.fetch_add(1, Ordering::Relaxed) + 1)
}
