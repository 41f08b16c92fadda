//! # motnet Sync Primitives
//!
//! Allocation-free hand-off of fixed-size items between producers and
//! consumers running in interrupt or task context.
//!
//! ## Components
//!
//! - [`RtMutex`]: the capability set `{take, release, delete}` any platform
//!   mutex must provide. Two bindings ship with the crate: [`TaskMutex`]
//!   (blocking, timed) and [`SpinMutex`] (busy-wait, never parks).
//! - [`Fifo`]: fixed-capacity circular buffer of fixed-size items, guarded
//!   by an optional [`RtMutex`].
//! - [`FifoByte`]: one-byte specialization of [`Fifo`].
//!
//! ## Timeouts
//!
//! Every guarded operation takes a `Duration` that bounds mutex
//! acquisition only. [`NO_WAIT`] polls once, [`WAIT_FOREVER`] blocks until
//! the mutex is free. A full or empty queue is reported immediately.
//!
//! ```rust
//! use std::sync::Arc;
//! use motnet_sync::{FifoByte, TaskMutex, WAIT_FOREVER};
//!
//! # fn main() -> Result<(), motnet_sync::FifoError> {
//! let fifo = FifoByte::new(3, Some(Arc::new(TaskMutex::new())))?;
//! fifo.put(10, WAIT_FOREVER)?;
//! assert_eq!(fifo.get(WAIT_FOREVER)?, 10);
//! fifo.rem(WAIT_FOREVER)?;
//! fifo.delete()?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod fifo;
pub mod fifo_byte;
pub mod mutex;

pub use error::{FifoError, FifoResult, MutexError};
pub use fifo::Fifo;
pub use fifo_byte::FifoByte;
pub use mutex::{NO_WAIT, RtMutex, SharedMutex, SpinMutex, TaskMutex, WAIT_FOREVER};
