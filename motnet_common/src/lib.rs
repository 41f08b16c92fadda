//! motnet Common Library
//!
//! Shared constants, endpoint identifiers and configuration loading used by
//! every crate of the motnet workspace.
//!
//! # Module Structure
//!
//! - [`consts`] - Board, entity-kind and tag limits
//! - [`endpoint`] - Logical endpoint identifiers
//! - [`config`] - TOML configuration loading and board topology tables
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! Add to your `Cargo.toml` with alias for shorter imports:
//! ```toml
//! [dependencies]
//! motnet = { package = "motnet_common", path = "../motnet_common" }
//! ```
//!
//! Then import:
//! ```rust
//! use motnet_common::consts::MAX_BOARDS;
//! use motnet_common::config::{ConfigLoader, NodeConfig};
//! ```

pub mod config;
pub mod consts;
pub mod endpoint;
pub mod prelude;
