//! Frame scheduling
//!
//! The viewer renders as a self-sustaining frame chain: presenting a frame
//! requests the next one. [`FrameScheduler`] abstracts the "request the next
//! frame" side so the chain works both against a real window (redraw
//! requests) and in tests ([`ManualScheduler`]).

/// Sink for next-frame requests.
pub trait FrameScheduler {
    /// Asks the host to schedule one more frame.
    fn request_frame(&mut self);
}

/// Scheduler for tests and headless drivers: requests are counted and
/// handed back one at a time.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: u32,
    total: u64,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one pending request, if any.
    pub fn take_request(&mut self) -> bool {
        if self.pending > 0 {
            self.pending -= 1;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn pending(&self) -> u32 {
        self.pending
    }

    /// Total requests ever made; each rendered frame adds exactly one.
    #[must_use]
    pub fn total_requested(&self) -> u64 {
        self.total
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending += 1;
        self.total += 1;
    }
}
