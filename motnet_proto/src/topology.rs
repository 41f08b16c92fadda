//! Process-wide board topology registry.
//!
//! One slot per board id holds that board's entity-count vector (one count
//! per entity kind, in ROM order). A slot is written once and then only
//! read; a second load for the same board is rejected until [`reset`].
//!
//! The registry is `const`-constructible so a firmware image can keep it in
//! a `static`:
//!
//! ```
//! use motnet_proto::topology::TopologyRegistry;
//!
//! static TOPOLOGY: TopologyRegistry = TopologyRegistry::new();
//!
//! TOPOLOGY.init();
//! TOPOLOGY.load_entity_counts(0, &[4, 2, 1]).unwrap();
//! assert_eq!(TOPOLOGY.entity_count(0, 1), 2);
//! ```
//!
//! [`reset`] takes `&mut self`, so a plain `static` like the one above can
//! never be reset; its topology lives until the process restarts. A registry
//! that must be reloaded in place goes behind a lock instead:
//!
//! ```
//! use std::sync::RwLock;
//! use motnet_proto::topology::TopologyRegistry;
//!
//! static TOPOLOGY: RwLock<TopologyRegistry> = RwLock::new(TopologyRegistry::new());
//!
//! TOPOLOGY.read().unwrap().init();
//! TOPOLOGY.read().unwrap().load_entity_counts(0, &[4]).unwrap();
//! TOPOLOGY.write().unwrap().reset();
//! TOPOLOGY.read().unwrap().load_entity_counts(0, &[6]).unwrap();
//! assert_eq!(TOPOLOGY.read().unwrap().entity_count(0, 0), 6);
//! ```
//!
//! [`reset`]: TopologyRegistry::reset

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use motnet::config::BoardConfig;
use motnet::consts::{MAX_BOARDS, MAX_ENTITY_KINDS};
use motnet::endpoint::Endpoint;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Entity counts of one board, indexed by entity kind.
pub type EntityCounts = heapless::Vec<u8, MAX_ENTITY_KINDS>;

/// Topology registry errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Board {0} topology already loaded")]
    AlreadyLoaded(u8),

    #[error("Board {board} out of range (max {max})", max = MAX_BOARDS - 1)]
    BoardOutOfRange { board: u8 },

    #[error("Topology registry not initialized")]
    Uninitialized,

    #[error("Board {board}: {count} entity kinds exceed the limit of {max}", max = MAX_ENTITY_KINDS)]
    TooManyEntityKinds { board: u8, count: usize },
}

/// Single-writer-per-board table of entity-count vectors.
#[derive(Debug)]
pub struct TopologyRegistry {
    initialized: AtomicBool,
    slots: [OnceLock<EntityCounts>; MAX_BOARDS],
}

impl TopologyRegistry {
    /// Empty, uninitialized registry. Call [`init`](Self::init) before loading.
    pub const fn new() -> Self {
        Self {
            initialized: AtomicBool::new(false),
            slots: [const { OnceLock::new() }; MAX_BOARDS],
        }
    }

    /// Mark the registry ready for loads. Idempotent.
    pub fn init(&self) {
        if !self.initialized.swap(true, Ordering::AcqRel) {
            debug!(boards = MAX_BOARDS, "Topology registry initialized");
        }
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Publish the entity counts of `board`.
    ///
    /// # Errors
    ///
    /// - [`TopologyError::Uninitialized`] before [`init`](Self::init)
    /// - [`TopologyError::BoardOutOfRange`] for `board >= MAX_BOARDS`
    /// - [`TopologyError::TooManyEntityKinds`] if `counts` is longer than `MAX_ENTITY_KINDS`
    /// - [`TopologyError::AlreadyLoaded`] if the board was loaded before
    pub fn load_entity_counts(&self, board: u8, counts: &[u8]) -> Result<(), TopologyError> {
        if !self.is_initialized() {
            return Err(TopologyError::Uninitialized);
        }
        let slot = self
            .slots
            .get(board as usize)
            .ok_or(TopologyError::BoardOutOfRange { board })?;
        let counts = EntityCounts::from_slice(counts).map_err(|_| {
            TopologyError::TooManyEntityKinds {
                board,
                count: counts.len(),
            }
        })?;

        match slot.set(counts) {
            Ok(()) => {
                info!(board, counts = ?slot.get().map(|c| c.as_slice()), "Board topology loaded");
                Ok(())
            }
            Err(_) => {
                warn!(board, "Board topology already loaded, new counts rejected");
                Err(TopologyError::AlreadyLoaded(board))
            }
        }
    }

    /// Load every board of `boards` that belongs to `endpoint`.
    ///
    /// Stops at the first rejected board. Returns the number of boards loaded.
    pub fn load_config(
        &self,
        boards: &[BoardConfig],
        endpoint: Endpoint,
    ) -> Result<usize, TopologyError> {
        let mut loaded = 0;
        for cfg in boards.iter().filter(|b| b.endpoint == endpoint) {
            self.load_entity_counts(cfg.board, &cfg.entities)?;
            loaded += 1;
        }
        info!(%endpoint, loaded, "Topology loaded from configuration");
        Ok(loaded)
    }

    /// Counts of `board`, `None` if not loaded.
    #[inline]
    pub fn entity_counts(&self, board: u8) -> Option<&[u8]> {
        if !self.is_initialized() {
            return None;
        }
        self.slots.get(board as usize)?.get().map(|c| c.as_slice())
    }

    #[inline]
    pub fn is_loaded(&self, board: u8) -> bool {
        self.entity_counts(board).is_some()
    }

    /// Instances of `kind` on `board`; 0 for any unknown board or kind.
    #[inline]
    pub fn entity_count(&self, board: u8, kind: u8) -> u8 {
        self.entity_counts(board)
            .and_then(|c| c.get(kind as usize).copied())
            .unwrap_or(0)
    }

    /// Drop every loaded topology. The registry stays initialized.
    ///
    /// Needs exclusive access: readers hold plain borrows of the loaded
    /// counts. Use an owned registry, or one behind a lock, when reloads are
    /// required.
    pub fn reset(&mut self) {
        let mut cleared = 0usize;
        for slot in &mut self.slots {
            cleared += usize::from(slot.take().is_some());
        }
        info!(cleared, "Topology registry reset");
    }
}

impl Default for TopologyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
