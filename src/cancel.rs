//! Cooperative cancellation.  Workers poll a token between pixels;
//! once it fires they stop computing but still report their tile as
//! done, so the aggregator always sees one completion per tile.

use std::time::{Duration, Instant};

/// Something a worker can ask "should I stop?".
pub trait CancelToken: Send + Sync {
    /// True once the render should be abandoned.
    fn is_cancelled(&self) -> bool;
}

/// A token that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Fires once a fixed instant has passed.
#[derive(Debug, Clone, Copy)]
pub struct Deadline(Instant);

impl Deadline {
    /// A deadline `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Deadline(Instant::now() + timeout)
    }
}

impl CancelToken for Deadline {
    #[inline]
    fn is_cancelled(&self) -> bool {
        Instant::now() >= self.0
    }
}

impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn never_cancel_always_returns_false() {
        let token = NeverCancel;
        assert!(!token.is_cancelled());
        assert!(!token.is_cancelled());
    }

    #[test]
    fn closure_token_reflects_atomic_state() {
        let flag = AtomicBool::new(false);
        let token = || flag.load(Ordering::Relaxed);

        assert!(!token.is_cancelled());

        flag.store(true, Ordering::Relaxed);
        assert!(token.is_cancelled());
    }

    #[test]
    fn expired_deadline_fires() {
        assert!(Deadline::after(Duration::from_secs(0)).is_cancelled());
        assert!(!Deadline::after(Duration::from_secs(3600)).is_cancelled());
    }
}
