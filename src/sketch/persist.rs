use crate::sketch::codec::SurfaceBlob;
use std::time::{Duration, Instant};

pub const DEFAULT_PERSIST_DEBOUNCE: Duration = Duration::from_millis(500);

/// Receives the surface whenever drawn content settles. The store owns the
/// note id and durable write; the engine only hands over the blob.
pub trait NoteStoreCollaborator {
    fn notify_changed(&mut self, blob: &SurfaceBlob);
}

impl<F> NoteStoreCollaborator for F
where
    F: FnMut(&SurfaceBlob),
{
    fn notify_changed(&mut self, blob: &SurfaceBlob) {
        self(blob)
    }
}

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Trailing-edge debounce. Every `schedule` pushes the deadline out again, so
/// a burst of strokes produces one notification after the last of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for PersistDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_PERSIST_DEBOUNCE)
    }
}

impl PersistDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Consumes the pending deadline if it has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Consumes the pending deadline regardless of time.
    pub fn take_pending(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}
