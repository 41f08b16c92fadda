//! Busy-wait mutex binding.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::{NO_WAIT, RtMutex, WAIT_FOREVER};
use crate::error::MutexError;

/// Spinning mutex for contexts that must never park (ISR hand-off,
/// bare-metal loops). Waiting burns CPU until the deadline.
pub struct SpinMutex {
    locked: AtomicBool,
    deleted: AtomicBool,
}

impl SpinMutex {
    /// Create an unlocked mutex.
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
            deleted: AtomicBool::new(false),
        }
    }

    /// Never fails spuriously, so an uncontended [`NO_WAIT`] take succeeds.
    #[inline]
    fn try_acquire(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }
}

impl Default for SpinMutex {
    fn default() -> Self {
        Self::new()
    }
}

impl RtMutex for SpinMutex {
    fn take(&self, timeout: Duration) -> Result<(), MutexError> {
        if self.deleted.load(Ordering::Acquire) {
            return Err(MutexError::NullPointer);
        }

        // None = no deadline.
        let deadline = if timeout == WAIT_FOREVER {
            None
        } else {
            Instant::now().checked_add(timeout)
        };

        loop {
            if self.try_acquire() {
                return Ok(());
            }
            if self.deleted.load(Ordering::Acquire) {
                return Err(MutexError::NullPointer);
            }
            if timeout == NO_WAIT || deadline.is_some_and(|d| Instant::now() >= d) {
                return Err(MutexError::Timeout);
            }
            std::hint::spin_loop();
        }
    }

    fn release(&self) -> Result<(), MutexError> {
        if self.deleted.load(Ordering::Acquire) {
            return Err(MutexError::NullPointer);
        }
        if self.locked.swap(false, Ordering::Release) {
            Ok(())
        } else {
            Err(MutexError::ReleaseFailed)
        }
    }

    fn delete(&self) {
        self.deleted.store(true, Ordering::Release);
        self.locked.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_fails_when_held() {
        let m = SpinMutex::new();
        m.take(NO_WAIT).unwrap();
        assert_eq!(m.take(NO_WAIT), Err(MutexError::Timeout));
        m.release().unwrap();
        m.take(NO_WAIT).unwrap();
    }

    #[test]
    fn uncontended_poll_always_succeeds() {
        let m = SpinMutex::new();
        for _ in 0..10_000 {
            assert_eq!(m.take(NO_WAIT), Ok(()));
            assert_eq!(m.release(), Ok(()));
        }
    }

    #[test]
    fn bounded_spin_times_out() {
        let m = SpinMutex::new();
        m.take(NO_WAIT).unwrap();
        let start = Instant::now();
        assert_eq!(m.take(Duration::from_millis(5)), Err(MutexError::Timeout));
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn double_release_fails() {
        let m = SpinMutex::new();
        m.take(WAIT_FOREVER).unwrap();
        m.release().unwrap();
        assert_eq!(m.release(), Err(MutexError::ReleaseFailed));
    }

    #[test]
    fn deleted_mutex_reports_null() {
        let m = SpinMutex::new();
        m.take(NO_WAIT).unwrap();
        m.delete();
        assert_eq!(m.take(WAIT_FOREVER), Err(MutexError::NullPointer));
        assert_eq!(m.release(), Err(MutexError::NullPointer));
    }
}
