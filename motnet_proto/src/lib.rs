//! motnet Protocol Addressing
//!
//! Variable addressing for distributed motor-control boards.
//!
//! # Module Structure
//!
//! - [`id`] - Packed 32-bit variable identifier
//! - [`rom`] - Read-only entity layout tables per endpoint
//! - [`topology`] - Per-board entity-count registry
//! - [`engine`] - RAM offsets and wire progressive numbers
//! - [`ram`] - Bounds-checked RAM image access
//! - [`diagnostic`] - Diagnostic record layout
//!
//! # Usage
//!
//! ```
//! use motnet::endpoint::Endpoint;
//! use motnet_proto::rom::MOTION_CONTROL;
//! use motnet_proto::rom::motion::{McEntity, MotorTag};
//! use motnet_proto::{AddressingEngine, Identifier, TopologyRegistry};
//!
//! let registry = TopologyRegistry::new();
//! registry.init();
//! registry.load_entity_counts(0, &[4, 2, 0]).unwrap();
//!
//! let engine = AddressingEngine::new(&MOTION_CONTROL, &registry);
//! let id = Identifier::new(0, Endpoint::MotionControl, McEntity::Motor as u8, 1, MotorTag::Current as u8);
//!
//! assert_eq!(engine.variable_count(0), 32);
//! assert_eq!(engine.progressive_number(0, id), Some(30));
//! assert_eq!(engine.identifier_from_progressive_number(0, 30), Some(id));
//! ```

pub mod diagnostic;
pub mod engine;
pub mod id;
pub mod ram;
pub mod rom;
pub mod topology;

pub use diagnostic::DiagnosticRop;
pub use engine::AddressingEngine;
pub use id::{Identifier, PROGNUM_DUMMY};
pub use ram::RamImage;
pub use rom::{EndpointRom, EntityRom, RwMode, TagRom};
pub use topology::{EntityCounts, TopologyError, TopologyRegistry};
