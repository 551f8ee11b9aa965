use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation source, polled once per minimizer iteration.
///
/// Returning `true` requests immediate termination. The minimizer still
/// reports the best point found so far.
pub trait CancellationPoll {
    fn poll(&mut self) -> bool;
}

/// Cancellation source that never fires
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl CancellationPoll for Never {
    fn poll(&mut self) -> bool {
        false
    }
}

impl CancellationPoll for AtomicBool {
    fn poll(&mut self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl CancellationPoll for &AtomicBool {
    fn poll(&mut self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl CancellationPoll for Arc<AtomicBool> {
    fn poll(&mut self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// Wrapper turning a closure into a cancellation source
#[derive(Clone)]
pub struct PollFn<F>(pub F)
where
    F: FnMut() -> bool;

impl<F> PollFn<F>
where
    F: FnMut() -> bool,
{
    pub fn new(f: F) -> Self {
        PollFn(f)
    }
}

impl<F> CancellationPoll for PollFn<F>
where
    F: FnMut() -> bool,
{
    fn poll(&mut self) -> bool {
        (self.0)()
    }
}
