//! Protocol addressing engine.
//!
//! Translates identifiers of one endpoint into byte offsets inside a board's
//! RAM image and into dense wire progressive numbers, and back.
//!
//! # RAM image
//!
//! ```text
//! [kind 0 × count[0]][kind 1 × count[1]] ... [kind N-1 × count[N-1]]
//! ```
//!
//! # Progressive numbers
//!
//! Same kind order, tag-minor:
//!
//! ```text
//! prog = Σ_{j<k} count[j]·tags[j]  +  index·tags[k]  +  tag
//! ```
//!
//! All queries are pure offset arithmetic over the registry and the ROM; an
//! unknown board, kind, index or tag yields `None` / `false` / `0`.

use motnet::endpoint::Endpoint;

use crate::id::Identifier;
use crate::rom::{EndpointRom, EntityRom, RwMode};
use crate::topology::TopologyRegistry;

/// Addressing queries for one endpoint over a topology registry.
#[derive(Debug, Clone, Copy)]
pub struct AddressingEngine<'r> {
    rom: &'static EndpointRom,
    registry: &'r TopologyRegistry,
}

impl<'r> AddressingEngine<'r> {
    pub const fn new(rom: &'static EndpointRom, registry: &'r TopologyRegistry) -> Self {
        Self { rom, registry }
    }

    #[inline]
    pub fn rom(&self) -> &'static EndpointRom {
        self.rom
    }

    #[inline]
    pub fn registry(&self) -> &'r TopologyRegistry {
        self.registry
    }

    #[inline]
    pub fn endpoint(&self) -> Endpoint {
        self.rom.endpoint
    }

    /// Instances of `kind` on `board`.
    #[inline]
    pub fn entity_count(&self, board: u8, kind: impl Into<u8>) -> u8 {
        self.registry.entity_count(board, kind.into())
    }

    /// Pairs every ROM entity with its count on `board`, in RAM order.
    fn kinds(&self, board: u8) -> impl Iterator<Item = (&'static EntityRom, usize)> + '_ {
        self.rom
            .entities
            .iter()
            .map(move |e| (e, self.registry.entity_count(board, e.kind) as usize))
    }

    /// Whether `id` names an existing variable on `board`.
    ///
    /// The board field of `id` is not consulted; `board` selects the topology.
    pub fn is_valid_variable(&self, board: u8, id: Identifier) -> bool {
        if !self.registry.is_loaded(board) || id.endpoint() != Some(self.rom.endpoint) {
            return false;
        }
        let Some(entity) = self.rom.entity(id.entity()) else {
            return false;
        };
        id.index() < self.registry.entity_count(board, entity.kind) && entity.is_valid_tag(id.tag())
    }

    /// Number of variables on `board`, i.e. the size of its progressive-number space.
    pub fn variable_count(&self, board: u8) -> u32 {
        self.kinds(board)
            .map(|(e, n)| (e.tags_count() * n) as u32)
            .sum()
    }

    /// Byte size of the RAM image of `board`.
    pub fn ram_size(&self, board: u8) -> usize {
        self.kinds(board).map(|(e, n)| e.record_size * n).sum()
    }

    /// Offset of the first record of `kind` in the RAM image of `board`.
    ///
    /// Defined for every known kind of a loaded board, also when its count is 0.
    pub fn entity_ram_offset(&self, board: u8, kind: impl Into<u8>) -> Option<usize> {
        let kind = kind.into() as usize;
        if !self.registry.is_loaded(board) || kind >= self.rom.entity_kinds() {
            return None;
        }
        Some(
            self.kinds(board)
                .take(kind)
                .map(|(e, n)| e.record_size * n)
                .sum(),
        )
    }

    /// Offset of the variable `id` in the RAM image of `board`.
    pub fn ram_offset(&self, board: u8, id: Identifier) -> Option<usize> {
        if !self.is_valid_variable(board, id) {
            return None;
        }
        let entity = self.rom.entity(id.entity())?;
        let base = self.entity_ram_offset(board, entity.kind)?;
        let tag = entity.tag(id.tag())?;
        Some(base + id.index() as usize * entity.record_size + tag.offset)
    }

    /// Wire progressive number of `id` on `board`.
    pub fn progressive_number(&self, board: u8, id: Identifier) -> Option<u32> {
        if !self.is_valid_variable(board, id) {
            return None;
        }
        let kind = id.entity() as usize;
        let band: usize = self
            .kinds(board)
            .take(kind)
            .map(|(e, n)| e.tags_count() * n)
            .sum();
        let entity = self.rom.entity(id.entity())?;
        let within = id.index() as usize * entity.tags_count();
        Some((band + within) as u32 + entity.tag_prognum(id.tag())?)
    }

    /// Inverse of [`progressive_number`](Self::progressive_number).
    ///
    /// The returned identifier carries `board` and this engine's endpoint.
    /// `None` when `prog >= variable_count(board)`.
    pub fn identifier_from_progressive_number(&self, board: u8, prog: u32) -> Option<Identifier> {
        if !self.registry.is_loaded(board) {
            return None;
        }
        let mut rem = prog as usize;
        for (entity, count) in self.kinds(board) {
            let tags = entity.tags_count();
            let band = tags * count;
            if band == 0 {
                continue;
            }
            if rem < band {
                return Some(Identifier::new(
                    board,
                    self.rom.endpoint,
                    entity.kind,
                    (rem / tags) as u8,
                    (rem % tags) as u8,
                ));
            }
            rem -= band;
        }
        None
    }

    /// Every valid identifier of `board` in progressive-number order.
    pub fn variables(&self, board: u8) -> impl Iterator<Item = Identifier> + '_ {
        let endpoint = self.rom.endpoint;
        self.kinds(board).flat_map(move |(entity, count)| {
            (0..count).flat_map(move |index| {
                (0..entity.tags_count()).map(move |tag| {
                    Identifier::new(board, endpoint, entity.kind, index as u8, tag as u8)
                })
            })
        })
    }

    /// Byte size of the variable `id`, from the ROM.
    #[inline]
    pub fn variable_size(&self, id: Identifier) -> Option<usize> {
        self.rom.variable_size(id.entity(), id.tag())
    }

    /// Read/write capability of the variable `id`.
    #[inline]
    pub fn rwmode(&self, id: Identifier) -> Option<RwMode> {
        self.rom.rwmode(id.entity(), id.tag())
    }

    /// Default bytes of `tag` of `kind`.
    #[inline]
    pub fn default_value(&self, kind: impl Into<u8>, tag: u8) -> Option<&'static [u8]> {
        self.rom.default_value(kind.into(), tag)
    }

    /// Default bytes of a whole record of `kind`.
    #[inline]
    pub fn default_record(&self, kind: impl Into<u8>) -> Option<&'static [u8]> {
        self.rom.default_record(kind.into())
    }
}
