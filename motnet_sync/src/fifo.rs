//! Fixed-capacity FIFO of fixed-size items.
//!
//! The item buffer is allocated once at creation; `put`, `get`, `rem` and
//! `clear` never allocate. Every operation runs under the optional guard
//! and releases it before returning, on success and on every error path.
//!
//! Consumption is two-step: [`Fifo::get`] lends the oldest item to a
//! closure without copying it out, [`Fifo::rem`] commits the removal. A
//! consumer can therefore inspect an item and leave it queued.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{FifoError, FifoResult};
use crate::mutex::{SharedMutex, WAIT_FOREVER};

/// Circular storage. Only touched through [`Access`].
struct Ring {
    items: Box<[u8]>,
    /// Slot of the next `put`.
    write: usize,
    /// Slot of the next `get`.
    read: usize,
    count: usize,
}

/// Circular buffer of `capacity` items, `item_size` bytes each.
///
/// With a mutex configured, operations are totally ordered by that mutex.
/// Without one, the caller is responsible for not sharing the FIFO between
/// contexts; overlapping calls are detected and rejected with
/// [`FifoError::Timeout`] rather than racing.
pub struct Fifo {
    item_size: usize,
    capacity: usize,
    mutex: Option<SharedMutex>,
    /// Set while one caller is inside the ring.
    busy: AtomicBool,
    ring: UnsafeCell<Ring>,
}

// SAFETY: the ring is only reached through `Access`, which exists only while
// `busy` has been won by a compare-exchange, so at most one thread touches it.
unsafe impl Sync for Fifo {}

impl Fifo {
    /// Create a FIFO of `capacity` items of `item_size` bytes.
    ///
    /// `mutex = None` means no locking.
    ///
    /// # Errors
    /// [`FifoError::ZeroCapacity`] if either dimension is zero,
    /// [`FifoError::TooLarge`] if the buffer cannot be allocated.
    pub fn new(item_size: usize, capacity: usize, mutex: Option<SharedMutex>) -> FifoResult<Self> {
        if item_size == 0 || capacity == 0 {
            return Err(FifoError::ZeroCapacity);
        }
        let too_large = FifoError::TooLarge { item_size, capacity };
        let bytes = item_size.checked_mul(capacity).ok_or(too_large)?;
        let mut items = Vec::new();
        items.try_reserve_exact(bytes).map_err(|_| too_large)?;
        items.resize(bytes, 0u8);

        debug!(
            item_size,
            capacity,
            guarded = mutex.is_some(),
            "fifo created"
        );

        Ok(Self {
            item_size,
            capacity,
            mutex,
            busy: AtomicBool::new(false),
            ring: UnsafeCell::new(Ring {
                items: items.into_boxed_slice(),
                write: 0,
                read: 0,
                count: 0,
            }),
        })
    }

    /// Size in bytes of one item. Fixed at creation, needs no guard.
    #[inline]
    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// Maximum number of items.
    pub fn capacity(&self, timeout: Duration) -> FifoResult<usize> {
        let _access = self.lock(timeout)?;
        Ok(self.capacity)
    }

    /// Number of items currently queued.
    pub fn size(&self, timeout: Duration) -> FifoResult<usize> {
        let access = self.lock(timeout)?;
        Ok(access.ring().count)
    }

    /// Copy `item` into the next free slot.
    ///
    /// Never waits for space: a full FIFO fails immediately with
    /// [`FifoError::Full`]. `timeout` only bounds guard acquisition.
    pub fn put(&self, item: &[u8], timeout: Duration) -> FifoResult<()> {
        if item.len() != self.item_size {
            return Err(FifoError::ItemSize {
                expected: self.item_size,
                actual: item.len(),
            });
        }

        let mut access = self.lock(timeout)?;
        let capacity = self.capacity;
        let item_size = self.item_size;
        let ring = access.ring_mut();

        if ring.count == capacity {
            return Err(FifoError::Full);
        }

        let start = ring.write * item_size;
        ring.items[start..start + item_size].copy_from_slice(item);
        ring.write = (ring.write + 1) % capacity;
        ring.count += 1;
        Ok(())
    }

    /// Lend the oldest item to `f` without removing it.
    ///
    /// The slice is only valid inside `f`; the guard is held for the
    /// duration of the call. Follow with [`Fifo::rem`] to consume.
    pub fn get<R>(&self, timeout: Duration, f: impl FnOnce(&[u8]) -> R) -> FifoResult<R> {
        let access = self.lock(timeout)?;
        let ring = access.ring();

        if ring.count == 0 {
            return Err(FifoError::Empty);
        }

        let start = ring.read * self.item_size;
        Ok(f(&ring.items[start..start + self.item_size]))
    }

    /// Drop the oldest item.
    pub fn rem(&self, timeout: Duration) -> FifoResult<()> {
        let mut access = self.lock(timeout)?;
        let capacity = self.capacity;
        let ring = access.ring_mut();

        if ring.count == 0 {
            return Err(FifoError::Empty);
        }

        ring.read = (ring.read + 1) % capacity;
        ring.count -= 1;
        Ok(())
    }

    /// Discard every queued item.
    pub fn clear(&self, timeout: Duration) -> FifoResult<()> {
        let mut access = self.lock(timeout)?;
        let ring = access.ring_mut();
        ring.write = 0;
        ring.read = 0;
        ring.count = 0;
        Ok(())
    }

    /// Drain and destroy the FIFO.
    ///
    /// The FIFO is cleared first (waiting for the guard as long as needed),
    /// then the item buffer is released. The mutex binding is not deleted:
    /// it belongs to whoever injected it.
    pub fn delete(self) -> FifoResult<()> {
        self.clear(WAIT_FOREVER)?;
        debug!(capacity = self.capacity, "fifo deleted");
        Ok(())
    }

    fn lock(&self, timeout: Duration) -> FifoResult<Access<'_>> {
        if let Some(mutex) = &self.mutex {
            mutex.take(timeout)?;
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            // Unguarded FIFO used from two contexts at once.
            if let Some(mutex) = &self.mutex {
                if let Err(e) = mutex.release() {
                    warn!(error = %e, "fifo guard release failed");
                }
            }
            return Err(FifoError::Timeout);
        }

        Ok(Access { fifo: self })
    }
}

impl std::fmt::Debug for Fifo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fifo")
            .field("item_size", &self.item_size)
            .field("capacity", &self.capacity)
            .field("guarded", &self.mutex.is_some())
            .finish()
    }
}

/// Exclusive access to the ring; released on drop.
struct Access<'a> {
    fifo: &'a Fifo,
}

impl Access<'_> {
    fn ring(&self) -> &Ring {
        // SAFETY: `busy` is held by this `Access`.
        unsafe { &*self.fifo.ring.get() }
    }

    fn ring_mut(&mut self) -> &mut Ring {
        // SAFETY: `busy` is held by this `Access`, and `&mut self` prevents
        // a second reference from the same guard.
        unsafe { &mut *self.fifo.ring.get() }
    }
}

impl Drop for Access<'_> {
    fn drop(&mut self) {
        self.fifo.busy.store(false, Ordering::Release);
        if let Some(mutex) = &self.fifo.mutex {
            if let Err(e) = mutex.release() {
                warn!(error = %e, "fifo guard release failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MutexError;
    use crate::mutex::{NO_WAIT, RtMutex, SpinMutex, TaskMutex};
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    /// Grants every take and fails every release, counting the releases.
    #[derive(Default)]
    struct LeakyMutex {
        releases: AtomicUsize,
    }

    impl RtMutex for LeakyMutex {
        fn take(&self, _timeout: Duration) -> Result<(), MutexError> {
            Ok(())
        }

        fn release(&self) -> Result<(), MutexError> {
            self.releases.fetch_add(1, Ordering::SeqCst);
            Err(MutexError::ReleaseFailed)
        }

        fn delete(&self) {}
    }

    fn word(v: u32) -> [u8; 4] {
        v.to_le_bytes()
    }

    fn read_word(fifo: &Fifo) -> FifoResult<u32> {
        fifo.get(NO_WAIT, |item| {
            u32::from_le_bytes([item[0], item[1], item[2], item[3]])
        })
    }

    #[test]
    fn oversized_buffer_rejected() {
        let item_size = usize::MAX / 2 + 1;
        assert_eq!(
            Fifo::new(item_size, 2, None).unwrap_err(),
            FifoError::TooLarge { item_size, capacity: 2 }
        );
        let item_size = isize::MAX as usize + 1;
        assert_eq!(
            Fifo::new(item_size, 1, None).unwrap_err(),
            FifoError::TooLarge { item_size, capacity: 1 }
        );
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(Fifo::new(0, 4, None).unwrap_err(), FifoError::ZeroCapacity);
        assert_eq!(Fifo::new(4, 0, None).unwrap_err(), FifoError::ZeroCapacity);
    }

    #[test]
    fn fills_then_reports_full() {
        let fifo = Fifo::new(4, 3, None).unwrap();
        for v in 0..3 {
            fifo.put(&word(v), NO_WAIT).unwrap();
        }
        assert_eq!(fifo.put(&word(3), NO_WAIT), Err(FifoError::Full));
        assert_eq!(fifo.size(NO_WAIT), Ok(3));
        assert_eq!(fifo.capacity(NO_WAIT), Ok(3));
    }

    #[test]
    fn drains_then_reports_empty() {
        let fifo = Fifo::new(4, 3, None).unwrap();
        for v in 0..3 {
            fifo.put(&word(v), NO_WAIT).unwrap();
        }
        for v in 0..3 {
            assert_eq!(read_word(&fifo), Ok(v));
            fifo.rem(NO_WAIT).unwrap();
        }
        assert_eq!(fifo.size(NO_WAIT), Ok(0));
        assert_eq!(read_word(&fifo), Err(FifoError::Empty));
        assert_eq!(fifo.rem(NO_WAIT), Err(FifoError::Empty));
    }

    #[test]
    fn get_does_not_consume() {
        let fifo = Fifo::new(4, 2, None).unwrap();
        fifo.put(&word(7), NO_WAIT).unwrap();
        assert_eq!(read_word(&fifo), Ok(7));
        assert_eq!(read_word(&fifo), Ok(7));
        assert_eq!(fifo.size(NO_WAIT), Ok(1));
    }

    #[test]
    fn indices_wrap_around() {
        let fifo = Fifo::new(4, 2, None).unwrap();
        for v in 0..10u32 {
            fifo.put(&word(v), NO_WAIT).unwrap();
            assert_eq!(read_word(&fifo), Ok(v));
            fifo.rem(NO_WAIT).unwrap();
        }
        assert_eq!(fifo.size(NO_WAIT), Ok(0));
    }

    #[test]
    fn wrong_item_size_rejected() {
        let fifo = Fifo::new(4, 2, None).unwrap();
        assert_eq!(
            fifo.put(&[1, 2], NO_WAIT),
            Err(FifoError::ItemSize {
                expected: 4,
                actual: 2
            })
        );
        assert_eq!(fifo.size(NO_WAIT), Ok(0));
    }

    #[test]
    fn clear_resets_state() {
        let fifo = Fifo::new(4, 2, None).unwrap();
        fifo.put(&word(1), NO_WAIT).unwrap();
        fifo.put(&word(2), NO_WAIT).unwrap();
        fifo.clear(NO_WAIT).unwrap();
        assert_eq!(fifo.size(NO_WAIT), Ok(0));
        fifo.put(&word(3), NO_WAIT).unwrap();
        assert_eq!(read_word(&fifo), Ok(3));
    }

    #[test]
    fn guard_released_on_error_paths() {
        let mutex = Arc::new(TaskMutex::new());
        let fifo = Fifo::new(4, 1, Some(mutex.clone())).unwrap();

        assert_eq!(fifo.rem(NO_WAIT), Err(FifoError::Empty));
        fifo.put(&word(1), NO_WAIT).unwrap();
        assert_eq!(fifo.put(&word(2), NO_WAIT), Err(FifoError::Full));

        // Still free after the failures above.
        mutex.take(NO_WAIT).unwrap();
        mutex.release().unwrap();
    }

    #[test]
    fn contention_reported_as_timeout() {
        let mutex = Arc::new(SpinMutex::new());
        let fifo = Fifo::new(4, 2, Some(mutex.clone())).unwrap();

        mutex.take(NO_WAIT).unwrap();
        assert_eq!(fifo.put(&word(1), NO_WAIT), Err(FifoError::Timeout));
        assert_eq!(fifo.size(Duration::from_millis(2)), Err(FifoError::Timeout));
        mutex.release().unwrap();

        fifo.put(&word(1), NO_WAIT).unwrap();
    }

    #[test]
    fn reentrant_use_without_guard_rejected() {
        let fifo = Fifo::new(4, 2, None).unwrap();
        fifo.put(&word(1), NO_WAIT).unwrap();
        let nested = fifo.get(NO_WAIT, |_| fifo.rem(NO_WAIT)).unwrap();
        assert_eq!(nested, Err(FifoError::Timeout));
        assert_eq!(fifo.size(NO_WAIT), Ok(1));
    }

    #[test]
    fn overlap_behind_failing_guard_still_releases() {
        let mutex = Arc::new(LeakyMutex::default());
        let fifo = Fifo::new(4, 2, Some(mutex.clone())).unwrap();
        fifo.put(&word(1), NO_WAIT).unwrap();
        assert_eq!(mutex.releases.load(Ordering::SeqCst), 1);

        let nested = fifo.get(NO_WAIT, |_| fifo.rem(NO_WAIT)).unwrap();
        assert_eq!(nested, Err(FifoError::Timeout));
        // Inner attempt and outer guard both handed the mutex back.
        assert_eq!(mutex.releases.load(Ordering::SeqCst), 3);
        assert_eq!(fifo.size(NO_WAIT), Ok(1));
    }

    #[test]
    fn deleted_guard_reports_null() {
        let mutex = Arc::new(TaskMutex::new());
        let fifo = Fifo::new(4, 2, Some(mutex.clone())).unwrap();
        mutex.delete();
        assert_eq!(fifo.put(&word(1), NO_WAIT), Err(FifoError::NullPointer));
        assert_eq!(fifo.delete(), Err(FifoError::NullPointer));
    }

    #[test]
    fn delete_drains_first() {
        let fifo = Fifo::new(4, 2, Some(Arc::new(TaskMutex::new()))).unwrap();
        fifo.put(&word(1), NO_WAIT).unwrap();
        assert_eq!(fifo.delete(), Ok(()));
    }
}
