//! Prelude module for common re-exports.
//!
//! ```rust
//! use motnet_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{BoardConfig, ConfigError, ConfigLoader, NodeConfig};

// ─── Limits ─────────────────────────────────────────────────────────
pub use crate::consts::{MAX_BOARDS, MAX_ENDPOINTS, MAX_ENTITY_KINDS, MAX_TAGS};

// ─── Endpoints ──────────────────────────────────────────────────────
pub use crate::endpoint::Endpoint;
