//! Safe access to board RAM images.
//!
//! The engine computes offsets; this module turns them into bounds-checked
//! slices of a byte buffer and typed copies through `zerocopy`. No pointer
//! casts: a record or variable is read with `FromBytes::read_from_bytes` and
//! written with `IntoBytes::write_to`, both of which check the length.

use std::ops::Range;

use tracing::debug;
use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::engine::AddressingEngine;
use crate::id::Identifier;

impl AddressingEngine<'_> {
    fn variable_range(&self, board: u8, id: Identifier) -> Option<Range<usize>> {
        let start = self.ram_offset(board, id)?;
        Some(start..start + self.variable_size(id)?)
    }

    fn record_range(&self, board: u8, kind: u8, index: u8) -> Option<Range<usize>> {
        if index >= self.entity_count(board, kind) {
            return None;
        }
        let size = self.rom().record_size(kind);
        let start = self.entity_ram_offset(board, kind)? + index as usize * size;
        Some(start..start + size)
    }

    /// All records of `kind` inside `buf`, the RAM image of `board`.
    ///
    /// `None` for an unknown board or kind, or when `buf` is too short.
    pub fn entity_slice<'b>(&self, board: u8, kind: impl Into<u8>, buf: &'b [u8]) -> Option<&'b [u8]> {
        let kind = kind.into();
        let start = self.entity_ram_offset(board, kind)?;
        let len = self.entity_count(board, kind) as usize * self.rom().record_size(kind);
        buf.get(start..start + len)
    }

    /// Bytes of the variable `id` inside `buf`, the RAM image of `board`.
    pub fn variable_slice<'b>(&self, board: u8, id: Identifier, buf: &'b [u8]) -> Option<&'b [u8]> {
        buf.get(self.variable_range(board, id)?)
    }

    pub fn variable_slice_mut<'b>(
        &self,
        board: u8,
        id: Identifier,
        buf: &'b mut [u8],
    ) -> Option<&'b mut [u8]> {
        buf.get_mut(self.variable_range(board, id)?)
    }
}

/// Owned RAM image of one board.
///
/// Sized by [`AddressingEngine::ram_size`] and filled with the default record
/// of every entity at construction.
#[derive(Debug, Clone)]
pub struct RamImage<'r> {
    engine: AddressingEngine<'r>,
    board: u8,
    bytes: Box<[u8]>,
}

impl<'r> RamImage<'r> {
    /// Bring up the image of `board`. `None` if its topology is not loaded.
    pub fn new(engine: AddressingEngine<'r>, board: u8) -> Option<Self> {
        if !engine.registry().is_loaded(board) {
            return None;
        }
        let mut bytes = vec![0u8; engine.ram_size(board)].into_boxed_slice();

        for entity in engine.rom().entities {
            let Some(default) = engine.default_record(entity.kind) else {
                continue;
            };
            for index in 0..engine.entity_count(board, entity.kind) {
                let range = engine.record_range(board, entity.kind, index)?;
                bytes.get_mut(range)?.copy_from_slice(default);
            }
        }

        debug!(
            board,
            endpoint = %engine.endpoint(),
            size = bytes.len(),
            "RAM image initialized"
        );
        Some(Self {
            engine,
            board,
            bytes,
        })
    }

    #[inline]
    pub fn board(&self) -> u8 {
        self.board
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Bytes of one variable.
    pub fn variable(&self, id: Identifier) -> Option<&[u8]> {
        self.engine.variable_slice(self.board, id, &self.bytes)
    }

    pub fn variable_mut(&mut self, id: Identifier) -> Option<&mut [u8]> {
        self.engine.variable_slice_mut(self.board, id, &mut self.bytes)
    }

    /// All records of `kind`.
    pub fn entities(&self, kind: impl Into<u8>) -> Option<&[u8]> {
        self.engine.entity_slice(self.board, kind, &self.bytes)
    }

    /// Copy a variable out as `T`. `None` if `id` is invalid or `T` has another size.
    pub fn read<T: FromBytes>(&self, id: Identifier) -> Option<T> {
        T::read_from_bytes(self.variable(id)?).ok()
    }

    /// Copy `value` into a variable. Returns whether it was written.
    pub fn write<T: IntoBytes + Immutable>(&mut self, id: Identifier, value: &T) -> bool {
        self.variable_mut(id)
            .is_some_and(|dst| value.write_to(dst).is_ok())
    }

    /// Copy the record `index` of `kind` out as `T`.
    pub fn record<T: FromBytes>(&self, kind: impl Into<u8>, index: u8) -> Option<T> {
        let range = self.engine.record_range(self.board, kind.into(), index)?;
        T::read_from_bytes(self.bytes.get(range)?).ok()
    }

    /// Overwrite the record `index` of `kind`. Returns whether it was written.
    pub fn set_record<T: IntoBytes + Immutable>(
        &mut self,
        kind: impl Into<u8>,
        index: u8,
        value: &T,
    ) -> bool {
        self.engine
            .record_range(self.board, kind.into(), index)
            .and_then(|range| self.bytes.get_mut(range))
            .is_some_and(|dst| value.write_to(dst).is_ok())
    }
}
