//! Read-only entity layout tables.
//!
//! For every endpoint, an [`EndpointRom`] lists its entity kinds in the
//! globally agreed order. That order is both the order of the records in a
//! board's RAM image and the order of the progressive-number bands on the
//! wire; reordering the `entities` slice is a protocol break.
//!
//! Each [`EntityRom`] maps a tag to the byte range of that variable inside
//! one record, its read/write capability and its default value.

use bitflags::bitflags;
use motnet::consts::MAX_TAGS;
use motnet::endpoint::Endpoint;

pub mod analog;
pub mod motion;

pub use analog::ANALOG_SENSORS;
pub use motion::MOTION_CONTROL;

bitflags! {
    /// What a remote peer may do with a variable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RwMode: u8 {
        /// Value can be queried.
        const READ = 0b01;
        /// Value can be set.
        const WRITE = 0b10;
        /// Both.
        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
    }
}

/// Byte range of one variable inside its entity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRom {
    pub name: &'static str,
    pub offset: usize,
    pub size: usize,
}

/// Layout of one entity kind.
#[derive(Debug)]
pub struct EntityRom {
    /// Entity kind value, equal to the position in [`EndpointRom::entities`].
    pub kind: u8,
    pub name: &'static str,
    /// `size_of` the record struct.
    pub record_size: usize,
    /// Variables, indexed by tag.
    pub tags: &'static [TagRom],
    /// Capability of each tag, same indexing as `tags`.
    pub rwmodes: &'static [RwMode],
    /// Bytes of the default record.
    pub default_record: fn() -> &'static [u8],
}

impl EntityRom {
    #[inline]
    pub fn tags_count(&self) -> usize {
        self.tags.len()
    }

    /// Descriptor of `tag`.
    #[inline]
    pub fn tag(&self, tag: u8) -> Option<&'static TagRom> {
        self.tags.get(tag as usize)
    }

    /// Whether `tag` names a variable of this kind.
    #[inline]
    pub fn is_valid_tag(&self, tag: u8) -> bool {
        // Tags are dense 0..N-1, so a bound check against the table length
        // is enough. A kind with holes in its tag numbering needs a lookup
        // of the descriptor here instead.
        (tag as usize) < self.tags_count()
    }

    /// Position of `tag` in the progressive-number sub-band of one entity.
    #[inline]
    pub fn tag_prognum(&self, tag: u8) -> Option<u32> {
        // Dense tags: the position is the tag value.
        self.is_valid_tag(tag).then_some(tag as u32)
    }

    #[inline]
    pub fn rwmode(&self, tag: u8) -> Option<RwMode> {
        self.rwmodes.get(tag as usize).copied()
    }

    /// Default bytes of one variable.
    pub fn default_value(&self, tag: u8) -> Option<&'static [u8]> {
        let t = self.tag(tag)?;
        (self.default_record)().get(t.offset..t.offset + t.size)
    }
}

/// Layout of all entity kinds of one endpoint.
#[derive(Debug)]
pub struct EndpointRom {
    pub endpoint: Endpoint,
    /// Entity kinds in RAM / wire order.
    pub entities: &'static [EntityRom],
}

impl EndpointRom {
    #[inline]
    pub fn entity(&self, kind: u8) -> Option<&'static EntityRom> {
        self.entities.get(kind as usize)
    }

    #[inline]
    pub fn entity_kinds(&self) -> usize {
        self.entities.len()
    }

    pub fn tags_count(&self, kind: u8) -> usize {
        self.entity(kind).map_or(0, EntityRom::tags_count)
    }

    pub fn record_size(&self, kind: u8) -> usize {
        self.entity(kind).map_or(0, |e| e.record_size)
    }

    /// Byte offset of `tag` inside one record of `kind`.
    pub fn tag_offset(&self, kind: u8, tag: u8) -> Option<usize> {
        Some(self.entity(kind)?.tag(tag)?.offset)
    }

    /// Byte size of `tag` of `kind`.
    pub fn variable_size(&self, kind: u8, tag: u8) -> Option<usize> {
        Some(self.entity(kind)?.tag(tag)?.size)
    }

    pub fn rwmode(&self, kind: u8, tag: u8) -> Option<RwMode> {
        self.entity(kind)?.rwmode(tag)
    }

    /// Default bytes of one variable, used to initialize RAM images.
    pub fn default_value(&self, kind: u8, tag: u8) -> Option<&'static [u8]> {
        self.entity(kind)?.default_value(tag)
    }

    /// Default bytes of a whole record of `kind`.
    pub fn default_record(&self, kind: u8) -> Option<&'static [u8]> {
        self.entity(kind).map(|e| (e.default_record)())
    }
}

/// Compile-time check of a tag table against its record.
///
/// Holds when every tag has a capability, the table fits `MAX_TAGS`, and
/// every variable lies inside the record without overlapping the next one.
pub const fn layout_is_sound(tags: &[TagRom], rwmodes: &[RwMode], record_size: usize) -> bool {
    if tags.len() != rwmodes.len() || tags.len() > MAX_TAGS {
        return false;
    }
    let mut i = 0;
    while i < tags.len() {
        let end = tags[i].offset + tags[i].size;
        if tags[i].size == 0 || end > record_size {
            return false;
        }
        if i + 1 < tags.len() && end > tags[i + 1].offset {
            return false;
        }
        i += 1;
    }
    true
}
