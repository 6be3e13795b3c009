use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic id source for one registry.
///
/// Ids start at 1 and are handed out exactly once, including ids whose insert was later
/// rejected, so a removed entity's id can never resolve to a different entity.
#[derive(Debug)]
pub struct IdSequence {
    next: AtomicU64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}
