//! Mutex abstraction.
//!
//! [`RtMutex`] is the only seam between the queues and the execution
//! environment. A platform supplies a binding (RTOS mutex, interrupt
//! masking, ...); a component that needs no locking passes `None`.
//!
//! The free functions [`take`], [`release`] and [`delete`] accept an
//! optional binding and report [`MutexError::NullPointer`] for `None`
//! instead of faulting.

use std::sync::Arc;
use std::time::Duration;

use crate::error::MutexError;

mod spin;
mod task;

pub use spin::SpinMutex;
pub use task::TaskMutex;

/// Poll once, never wait.
pub const NO_WAIT: Duration = Duration::ZERO;

/// Wait until the mutex is available.
pub const WAIT_FOREVER: Duration = Duration::MAX;

/// Shared handle to a mutex binding, as injected into a FIFO.
pub type SharedMutex = Arc<dyn RtMutex>;

/// Capability set of a mutex usable by the queues.
///
/// # Contract
///
/// | Operation | Success | Failure |
/// |-----------|---------|---------|
/// | `take(timeout)` | acquired | `Timeout`, `NullPointer` after `delete` |
/// | `release()` | released | `ReleaseFailed` if not held, `NullPointer` after `delete` |
/// | `delete()` | binding unusable from now on | - |
///
/// A `timeout` of [`NO_WAIT`] must not block; [`WAIT_FOREVER`] must not
/// time out.
pub trait RtMutex: Send + Sync {
    /// Acquire the mutex, waiting at most `timeout`.
    fn take(&self, timeout: Duration) -> Result<(), MutexError>;

    /// Release a mutex previously acquired with [`take`](RtMutex::take).
    fn release(&self) -> Result<(), MutexError>;

    /// Destroy the binding.
    fn delete(&self);
}

/// Take an optional binding.
pub fn take(mutex: Option<&dyn RtMutex>, timeout: Duration) -> Result<(), MutexError> {
    mutex.ok_or(MutexError::NullPointer)?.take(timeout)
}

/// Release an optional binding.
pub fn release(mutex: Option<&dyn RtMutex>) -> Result<(), MutexError> {
    mutex.ok_or(MutexError::NullPointer)?.release()
}

/// Delete an optional binding.
pub fn delete(mutex: Option<&dyn RtMutex>) -> Result<(), MutexError> {
    mutex.ok_or(MutexError::NullPointer)?.delete();
    Ok(())
}
