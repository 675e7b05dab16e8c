use std::sync::atomic::{AtomicI32, Ordering};

/// Source of format-native sequence ids for outbound calls.
///
/// A simple counter which is initialized at 0; the first id handed out is 1.
/// Wraps around on overflow.
#[derive(Debug, Default)]
pub struct SeqIdGenerator {
    counter: AtomicI32,
}

impl SeqIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn next_id(&self) -> i32 {
        self.counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    /// The most recently issued id (0 before the first call).
    pub fn current(&self) -> i32 {
        self.counter.load(Ordering::Relaxed)
    }
}
