//! FIFO of single bytes.
//!
//! Thin wrapper: every call is forwarded to an owned [`Fifo`] with an item
//! size of one byte, so the ring bookkeeping lives in one place.

use std::time::Duration;

use crate::error::FifoResult;
use crate::fifo::Fifo;
use crate::mutex::SharedMutex;

/// Byte queue, typically fed from a receive interrupt and drained by a task.
#[derive(Debug)]
pub struct FifoByte {
    fifo: Fifo,
}

impl FifoByte {
    /// Create a byte FIFO holding up to `capacity` bytes.
    ///
    /// # Errors
    /// [`FifoError::ZeroCapacity`](crate::FifoError::ZeroCapacity) if `capacity` is zero.
    pub fn new(capacity: usize, mutex: Option<SharedMutex>) -> FifoResult<Self> {
        Ok(Self {
            fifo: Fifo::new(1, capacity, mutex)?,
        })
    }

    /// Maximum number of bytes.
    pub fn capacity(&self, timeout: Duration) -> FifoResult<usize> {
        self.fifo.capacity(timeout)
    }

    /// Number of bytes queued.
    pub fn size(&self, timeout: Duration) -> FifoResult<usize> {
        self.fifo.size(timeout)
    }

    /// Append one byte.
    pub fn put(&self, byte: u8, timeout: Duration) -> FifoResult<()> {
        self.fifo.put(&[byte], timeout)
    }

    /// Oldest byte, left in the queue.
    pub fn get(&self, timeout: Duration) -> FifoResult<u8> {
        self.fifo.get(timeout, |item| item[0])
    }

    /// Drop the oldest byte.
    pub fn rem(&self, timeout: Duration) -> FifoResult<()> {
        self.fifo.rem(timeout)
    }

    /// Discard every queued byte.
    pub fn clear(&self, timeout: Duration) -> FifoResult<()> {
        self.fifo.clear(timeout)
    }

    /// Drain and destroy.
    pub fn delete(self) -> FifoResult<()> {
        self.fifo.delete()
    }
}
