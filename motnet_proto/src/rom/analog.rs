//! Analog-sensors endpoint: six-axis strain gauges and MAIS hand encoders.

use core::mem::{offset_of, size_of};

use motnet::endpoint::Endpoint;
use static_assertions::{const_assert, const_assert_eq};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::{EndpointRom, EntityRom, RwMode, TagRom, layout_is_sound};

/// Entity kinds of the analog-sensors endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AsEntity {
    Strain = 0,
    Mais = 1,
}

impl From<AsEntity> for u8 {
    fn from(kind: AsEntity) -> Self {
        kind as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StrainTag {
    Mode = 0,
    DataRate = 1,
    Values = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MaisTag {
    Mode = 0,
    DataRate = 1,
    Resolution = 2,
    Values = 3,
}

/// Acquisition modes stored in the `mode` field of both sensors.
pub mod mode {
    pub const IDLE: u32 = 0;
    pub const TX_CALIBRATED: u32 = 1;
    pub const TX_UNCALIBRATED: u32 = 2;
}

/// Six-axis force/torque sensor. Size: 20 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct Strain {
    pub mode: u32,
    pub data_rate_ms: u32,
    /// Fx, Fy, Fz, Tx, Ty, Tz.
    pub values: [u16; 6],
}

/// Hand joint encoder array. Size: 28 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct Mais {
    pub mode: u32,
    pub data_rate_ms: u32,
    /// Bits per sample.
    pub resolution: u32,
    pub values: [u8; 16],
}

const_assert_eq!(size_of::<Strain>(), 20);
const_assert_eq!(size_of::<Mais>(), 28);

impl Strain {
    pub const DEFAULT: Self = Self {
        mode: mode::IDLE,
        data_rate_ms: 10,
        values: [0; 6],
    };
}

impl Mais {
    pub const DEFAULT: Self = Self {
        mode: mode::IDLE,
        data_rate_ms: 10,
        resolution: 8,
        values: [0; 16],
    };
}

static STRAIN_DEFAULT: Strain = Strain::DEFAULT;
static MAIS_DEFAULT: Mais = Mais::DEFAULT;

pub const STRAIN_TAGS: [TagRom; 3] = [
    TagRom {
        name: "mode",
        offset: offset_of!(Strain, mode),
        size: size_of::<u32>(),
    },
    TagRom {
        name: "data_rate",
        offset: offset_of!(Strain, data_rate_ms),
        size: size_of::<u32>(),
    },
    TagRom {
        name: "values",
        offset: offset_of!(Strain, values),
        size: size_of::<[u16; 6]>(),
    },
];

pub const STRAIN_RWMODES: [RwMode; 3] = [RwMode::READ_WRITE, RwMode::READ_WRITE, RwMode::READ];

pub const MAIS_TAGS: [TagRom; 4] = [
    TagRom {
        name: "mode",
        offset: offset_of!(Mais, mode),
        size: size_of::<u32>(),
    },
    TagRom {
        name: "data_rate",
        offset: offset_of!(Mais, data_rate_ms),
        size: size_of::<u32>(),
    },
    TagRom {
        name: "resolution",
        offset: offset_of!(Mais, resolution),
        size: size_of::<u32>(),
    },
    TagRom {
        name: "values",
        offset: offset_of!(Mais, values),
        size: size_of::<[u8; 16]>(),
    },
];

pub const MAIS_RWMODES: [RwMode; 4] = [
    RwMode::READ_WRITE,
    RwMode::READ_WRITE,
    RwMode::READ_WRITE,
    RwMode::READ,
];

const_assert_eq!(STRAIN_TAGS.len(), STRAIN_RWMODES.len());
const_assert_eq!(MAIS_TAGS.len(), MAIS_RWMODES.len());
const_assert!(layout_is_sound(&STRAIN_TAGS, &STRAIN_RWMODES, size_of::<Strain>()));
const_assert!(layout_is_sound(&MAIS_TAGS, &MAIS_RWMODES, size_of::<Mais>()));

/// Layout table of the analog-sensors endpoint.
pub static ANALOG_SENSORS: EndpointRom = EndpointRom {
    endpoint: Endpoint::AnalogSensors,
    entities: &[
        EntityRom {
            kind: AsEntity::Strain as u8,
            name: "strain",
            record_size: size_of::<Strain>(),
            tags: &STRAIN_TAGS,
            rwmodes: &STRAIN_RWMODES,
            default_record: || STRAIN_DEFAULT.as_bytes(),
        },
        EntityRom {
            kind: AsEntity::Mais as u8,
            name: "mais",
            record_size: size_of::<Mais>(),
            tags: &MAIS_TAGS,
            rwmodes: &MAIS_RWMODES,
            default_record: || MAIS_DEFAULT.as_bytes(),
        },
    ],
};
