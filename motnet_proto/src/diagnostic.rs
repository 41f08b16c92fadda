//! Diagnostic record carried by the management endpoint.
//!
//! Fixed 24-byte layout shared with the host-side dump tools:
//!
//! | Offset | Field        | Meaning                    |
//! |--------|--------------|----------------------------|
//! | 0      | `params[0]`  | code                       |
//! | 2      | `params[1]`  | severity                   |
//! | 4..16  | `params[2..]`| code-specific parameters   |
//! | 16     | `time`       | board timestamp [µs]       |

use core::mem::size_of;

use static_assertions::const_assert_eq;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Code of a record that carries no diagnostic.
pub const CODE_EMPTY: u16 = 0;
/// Severity of a record that carries no diagnostic.
pub const SEVERITY_EMPTY: u16 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct DiagnosticRop {
    pub params: [u16; 8],
    pub time: u64,
}

const_assert_eq!(size_of::<DiagnosticRop>(), 24);

impl DiagnosticRop {
    pub const SIZE: usize = size_of::<Self>();

    /// Parse a received record.
    ///
    /// Shorter input leaves the missing tail zeroed; input longer than
    /// [`SIZE`](Self::SIZE) is rejected.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() > Self::SIZE {
            return None;
        }
        let mut rop = Self::default();
        rop.as_mut_bytes()[..data.len()].copy_from_slice(data);
        Some(rop)
    }

    #[inline]
    pub fn code(&self) -> u16 {
        self.params[0]
    }

    #[inline]
    pub fn severity(&self) -> u16 {
        self.params[1]
    }

    /// Code-specific parameters after code and severity.
    #[inline]
    pub fn args(&self) -> &[u16] {
        &self.params[2..]
    }

    pub fn is_empty(&self) -> bool {
        self.code() == CODE_EMPTY
            && self.severity() == SEVERITY_EMPTY
            && self.args().iter().all(|&p| p == 0)
            && self.time == 0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
