//! Packed 32-bit variable identifier.
//!
//! ```text
//!  31        24 23    20 19    16 15        8 7         0
//! ┌────────────┬────────┬────────┬───────────┬───────────┐
//! │   board    │endpoint│ entity │   index   │    tag    │
//! └────────────┴────────┴────────┴───────────┴───────────┘
//! ```

use motnet::endpoint::Endpoint;

const BOARD_SHIFT: u32 = 24;
const ENDPOINT_SHIFT: u32 = 20;
const ENTITY_SHIFT: u32 = 16;
const INDEX_SHIFT: u32 = 8;

const NIBBLE: u32 = 0x0F;
const BYTE: u32 = 0xFF;

/// Wire value of an absent progressive number.
pub const PROGNUM_DUMMY: u32 = u32::MAX;

/// One variable of one entity on one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(u32);

impl Identifier {
    /// Wire value of an absent identifier.
    pub const DUMMY: Self = Self(u32::MAX);

    /// Pack the fields. `entity` is truncated to its 4-bit field.
    #[inline]
    pub const fn new(board: u8, endpoint: Endpoint, entity: u8, index: u8, tag: u8) -> Self {
        Self(
            (board as u32) << BOARD_SHIFT
                | (endpoint as u32 & NIBBLE) << ENDPOINT_SHIFT
                | (entity as u32 & NIBBLE) << ENTITY_SHIFT
                | (index as u32) << INDEX_SHIFT
                | tag as u32,
        )
    }

    /// Reinterpret a raw wire value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw wire value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn board(self) -> u8 {
        ((self.0 >> BOARD_SHIFT) & BYTE) as u8
    }

    /// Endpoint field, `None` if it does not name a known endpoint.
    #[inline]
    pub const fn endpoint(self) -> Option<Endpoint> {
        Endpoint::from_u8(((self.0 >> ENDPOINT_SHIFT) & NIBBLE) as u8)
    }

    #[inline]
    pub const fn entity(self) -> u8 {
        ((self.0 >> ENTITY_SHIFT) & NIBBLE) as u8
    }

    #[inline]
    pub const fn index(self) -> u8 {
        ((self.0 >> INDEX_SHIFT) & BYTE) as u8
    }

    #[inline]
    pub const fn tag(self) -> u8 {
        (self.0 & BYTE) as u8
    }

    #[inline]
    pub const fn is_dummy(self) -> bool {
        self.0 == Self::DUMMY.0
    }

    /// Same variable addressed to another board.
    #[inline]
    pub const fn with_board(self, board: u8) -> Self {
        Self((self.0 & !(BYTE << BOARD_SHIFT)) | (board as u32) << BOARD_SHIFT)
    }
}

impl From<Identifier> for u32 {
    fn from(id: Identifier) -> Self {
        id.0
    }
}
