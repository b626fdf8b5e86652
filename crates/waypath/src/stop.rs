use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cooperative stop request shared between a solver and whoever drives
/// it, backed by an [`AtomicBool`].
///
/// A request is honored at the next tick boundary and then consumed, so
/// the same token can pause a solver any number of times.
#[derive(Clone, Debug, Default)]
pub struct StopToken {
    requested: Arc<AtomicBool>,
}

impl StopToken {
    /// Create a token with no pending request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the solver to pause at the next tick boundary.
    #[inline]
    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Whether a request is pending.
    #[inline]
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Consume a pending request, returning whether there was one.
    #[inline]
    pub(crate) fn take(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }
}
