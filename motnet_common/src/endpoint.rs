//! Logical endpoint identifiers.
//!
//! An endpoint groups the entities a board exposes (for example all the
//! joints, motors and controllers of the motion-control endpoint). The
//! numeric value travels inside the packed identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical endpoint kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Endpoint {
    /// Board management (application state, communication settings).
    Management = 0,
    /// Motion control: joints, motors, controllers.
    MotionControl = 1,
    /// Analog sensors: strain gauges, mais.
    AnalogSensors = 2,
    /// Tactile skin patches.
    Skin = 3,
}

impl Endpoint {
    /// Convert from raw `u8` value. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Management),
            1 => Some(Self::MotionControl),
            2 => Some(Self::AnalogSensors),
            3 => Some(Self::Skin),
            _ => None,
        }
    }

    /// Short lowercase name, matching the configuration spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Management => "management",
            Self::MotionControl => "motion_control",
            Self::AnalogSensors => "analog_sensors",
            Self::Skin => "skin",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
