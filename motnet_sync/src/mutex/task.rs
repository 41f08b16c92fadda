//! Blocking mutex binding for task context.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::lock_api::{RawMutex as _, RawMutexTimed as _};

use super::{NO_WAIT, RtMutex, WAIT_FOREVER};
use crate::error::MutexError;

/// Timed, parking mutex for threads/tasks.
///
/// Backed by `parking_lot`'s raw mutex so that acquisition and release can
/// happen in separate calls. Not recursive: a second `take` from the holder
/// times out. The `send_guard` feature lets a thread other than the taker
/// release it.
///
/// [`delete`](RtMutex::delete) never unlocks on behalf of the holder. The
/// holder's next `release` still unlocks (and reports
/// [`MutexError::NullPointer`]), which wakes waiters so they observe the
/// deletion.
pub struct TaskMutex {
    raw: parking_lot::RawMutex,
    held: AtomicBool,
    deleted: AtomicBool,
}

impl TaskMutex {
    /// Create an unlocked mutex.
    pub const fn new() -> Self {
        Self {
            raw: parking_lot::RawMutex::INIT,
            held: AtomicBool::new(false),
            deleted: AtomicBool::new(false),
        }
    }

    fn unlock_raw(&self) -> bool {
        if self.held.swap(false, Ordering::AcqRel) {
            // SAFETY: `held` is only set after a successful lock and is
            // cleared exactly once per acquisition, so the raw mutex is locked.
            // Only `take` and `release` get here, on behalf of the holder, and
            // `send_guard` allows the unlock from any thread.
            unsafe { self.raw.unlock() };
            true
        } else {
            false
        }
    }
}

impl Default for TaskMutex {
    fn default() -> Self {
        Self::new()
    }
}

impl RtMutex for TaskMutex {
    fn take(&self, timeout: Duration) -> Result<(), MutexError> {
        if self.deleted.load(Ordering::Acquire) {
            return Err(MutexError::NullPointer);
        }

        let acquired = if timeout == NO_WAIT {
            self.raw.try_lock()
        } else if timeout == WAIT_FOREVER {
            self.raw.lock();
            true
        } else {
            self.raw.try_lock_for(timeout)
        };

        if !acquired {
            return Err(MutexError::Timeout);
        }
        self.held.store(true, Ordering::Release);

        // Deleted while we were waiting.
        if self.deleted.load(Ordering::Acquire) {
            self.unlock_raw();
            return Err(MutexError::NullPointer);
        }
        Ok(())
    }

    fn release(&self) -> Result<(), MutexError> {
        if self.deleted.load(Ordering::Acquire) {
            // Hand the lock back anyway so waiters wake up.
            self.unlock_raw();
            return Err(MutexError::NullPointer);
        }
        if self.unlock_raw() {
            Ok(())
        } else {
            Err(MutexError::ReleaseFailed)
        }
    }

    fn delete(&self) {
        self.deleted.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn take_release_cycle() {
        let m = TaskMutex::new();
        m.take(WAIT_FOREVER).unwrap();
        m.release().unwrap();
        m.take(NO_WAIT).unwrap();
        m.release().unwrap();
    }

    #[test]
    fn not_recursive() {
        let m = TaskMutex::new();
        m.take(NO_WAIT).unwrap();
        assert_eq!(m.take(NO_WAIT), Err(MutexError::Timeout));
        m.release().unwrap();
    }

    #[test]
    fn bounded_wait_times_out() {
        let m = TaskMutex::new();
        m.take(NO_WAIT).unwrap();
        let start = Instant::now();
        assert_eq!(m.take(Duration::from_millis(20)), Err(MutexError::Timeout));
        assert!(start.elapsed() >= Duration::from_millis(20));
        m.release().unwrap();
    }

    #[test]
    fn release_without_take_fails() {
        let m = TaskMutex::new();
        assert_eq!(m.release(), Err(MutexError::ReleaseFailed));
    }

    #[test]
    fn released_from_other_thread_wakes_waiter() {
        let m = Arc::new(TaskMutex::new());
        m.take(NO_WAIT).unwrap();

        let waiter = {
            let m = Arc::clone(&m);
            thread::spawn(move || m.take(Duration::from_secs(5)))
        };
        thread::sleep(Duration::from_millis(10));
        m.release().unwrap();

        assert_eq!(waiter.join().unwrap(), Ok(()));
        m.release().unwrap();
    }

    #[test]
    fn deleted_mutex_reports_null() {
        let m = TaskMutex::new();
        m.delete();
        assert_eq!(m.take(NO_WAIT), Err(MutexError::NullPointer));
        assert_eq!(m.release(), Err(MutexError::NullPointer));
    }

    #[test]
    fn delete_leaves_lock_with_holder() {
        let m = Arc::new(TaskMutex::new());
        m.take(NO_WAIT).unwrap();

        let waiter = {
            let m = Arc::clone(&m);
            thread::spawn(move || m.take(Duration::from_secs(5)))
        };
        thread::sleep(Duration::from_millis(10));
        m.delete();

        // Still held: nobody else may enter yet.
        assert!(m.held.load(Ordering::Acquire));
        assert!(!m.raw.try_lock());

        assert_eq!(m.release(), Err(MutexError::NullPointer));
        assert_eq!(waiter.join().unwrap(), Err(MutexError::NullPointer));

        // The waiter handed the lock back too.
        assert!(!m.held.load(Ordering::Acquire));
        assert!(m.raw.try_lock());
        // SAFETY: locked just above by this thread.
        unsafe { m.raw.unlock() };
    }
}
