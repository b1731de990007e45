//! Timeout and cancellation shared by search workers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Why a search ended before covering its candidate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StopReason {
    Timeout,
    Cancelled,
}

/// Stop condition polled by search loops.
///
/// Once tripped it stays tripped, so every worker winds down at its next
/// check point. The clock is read only when a timeout is set, which keeps
/// untimed runs usable on targets without `Instant`.
#[derive(Debug)]
pub(crate) struct StopSignal {
    started: Option<Instant>,
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
    timed_out: AtomicBool,
}

impl StopSignal {
    pub fn new(timeout: Option<Duration>, cancel: Option<Arc<AtomicBool>>) -> Self {
        let started = timeout.map(|_| Instant::now());
        Self {
            started,
            deadline: started.zip(timeout).map(|(s, t)| s + t),
            cancel,
            timed_out: AtomicBool::new(false),
        }
    }

    pub fn should_stop(&self) -> bool {
        if self.timed_out.load(Ordering::Relaxed) {
            return true;
        }
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.timed_out.store(true, Ordering::Relaxed);
                return true;
            }
        }
        false
    }

    /// Reason for an interrupted search. Timeout wins if both fired.
    pub fn reason(&self) -> StopReason {
        if self.timed_out.load(Ordering::Relaxed) {
            StopReason::Timeout
        } else {
            StopReason::Cancelled
        }
    }

    /// Time since the search started; `None` for untimed runs.
    pub fn elapsed(&self) -> Option<Duration> {
        self.started.map(|s| s.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_limits_never_stops() {
        let stop = StopSignal::new(None, None);
        assert!(!stop.should_stop());
        assert!(stop.elapsed().is_none());
    }

    #[test]
    fn test_zero_timeout_trips() {
        let stop = StopSignal::new(Some(Duration::ZERO), None);
        assert!(stop.should_stop());
        assert_eq!(stop.reason(), StopReason::Timeout);
    }

    #[test]
    fn test_cancel_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let stop = StopSignal::new(None, Some(flag.clone()));
        assert!(!stop.should_stop());
        flag.store(true, Ordering::Relaxed);
        assert!(stop.should_stop());
        assert_eq!(stop.reason(), StopReason::Cancelled);
    }
}
