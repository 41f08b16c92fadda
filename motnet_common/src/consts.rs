//! System-wide limits for the motnet workspace.
//!
//! Single source of truth for the sizes of the topology registry, the
//! identifier fields and the ROM tables. Imported by all crates.

use static_assertions::const_assert;

/// Maximum number of boards a registry tracks (board ids `0..MAX_BOARDS`).
pub const MAX_BOARDS: usize = 10;

/// Maximum number of entity kinds inside one endpoint.
pub const MAX_ENTITY_KINDS: usize = 8;

/// Maximum number of tags (variables) of one entity kind.
pub const MAX_TAGS: usize = 32;

/// Number of distinct endpoint values the identifier can carry.
pub const MAX_ENDPOINTS: usize = 16;

// Field widths of the packed identifier: board 8, endpoint 4, entity 4, index 8, tag 8.
const_assert!(MAX_BOARDS <= 1 << 8);
const_assert!(MAX_ENDPOINTS <= 1 << 4);
const_assert!(MAX_ENTITY_KINDS <= 1 << 4);
const_assert!(MAX_TAGS <= 1 << 8);
