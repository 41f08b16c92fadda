//! Motion-control endpoint: joints, motors, controllers.
//!
//! RAM order (and progressive-number order) is joints, then motors, then
//! controllers.

use core::mem::{offset_of, size_of};

use motnet::endpoint::Endpoint;
use static_assertions::{const_assert, const_assert_eq};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::{EndpointRom, EntityRom, RwMode, TagRom, layout_is_sound};

/// Entity kinds of the motion-control endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum McEntity {
    Joint = 0,
    Motor = 1,
    Controller = 2,
}

impl From<McEntity> for u8 {
    fn from(kind: McEntity) -> Self {
        kind as u8
    }
}

/// Joint variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum JointTag {
    PidGains = 0,
    Limits = 1,
    ControlMode = 2,
    Setpoint = 3,
    Position = 4,
    Velocity = 5,
}

/// Motor variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MotorTag {
    CurrentLimit = 0,
    GearboxRatio = 1,
    Current = 2,
    Temperature = 3,
}

/// Controller variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ControllerTag {
    CycleTime = 0,
    Status = 1,
    Command = 2,
}

/// Joint control modes stored in [`Joint::control_mode`].
pub mod control_mode {
    pub const IDLE: u32 = 0;
    pub const POSITION: u32 = 1;
    pub const VELOCITY: u32 = 2;
    pub const TORQUE: u32 = 3;
}

#[derive(Debug, Clone, Copy, PartialEq, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct PidGains {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct JointLimits {
    pub min: f32,
    pub max: f32,
}

/// Joint record. Size: 36 bytes.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct Joint {
    pub pid: PidGains,
    pub limits: JointLimits,
    pub control_mode: u32,
    pub setpoint: f32,
    pub position: f32,
    pub velocity: f32,
}

/// Motor record. Size: 16 bytes.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct Motor {
    /// Peak current [mA].
    pub current_limit: f32,
    pub gearbox_ratio: i32,
    /// Measured current [mA].
    pub current: f32,
    /// Winding temperature [°C].
    pub temperature: f32,
}

/// Controller record (one per board at most). Size: 12 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct Controller {
    pub cycle_time_us: u32,
    pub status: u32,
    pub command: u32,
}

const_assert_eq!(size_of::<Joint>(), 36);
const_assert_eq!(size_of::<Motor>(), 16);
const_assert_eq!(size_of::<Controller>(), 12);

impl Joint {
    pub const DEFAULT: Self = Self {
        pid: PidGains {
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
        },
        limits: JointLimits {
            min: -180.0,
            max: 180.0,
        },
        control_mode: control_mode::IDLE,
        setpoint: 0.0,
        position: 0.0,
        velocity: 0.0,
    };
}

impl Motor {
    pub const DEFAULT: Self = Self {
        current_limit: 1000.0,
        gearbox_ratio: 1,
        current: 0.0,
        temperature: 0.0,
    };
}

impl Controller {
    pub const DEFAULT: Self = Self {
        cycle_time_us: 1000,
        status: 0,
        command: 0,
    };
}

static JOINT_DEFAULT: Joint = Joint::DEFAULT;
static MOTOR_DEFAULT: Motor = Motor::DEFAULT;
static CONTROLLER_DEFAULT: Controller = Controller::DEFAULT;

const fn tag(name: &'static str, offset: usize, size: usize) -> TagRom {
    TagRom { name, offset, size }
}

pub const JOINT_TAGS: [TagRom; 6] = [
    tag("pid_gains", offset_of!(Joint, pid), size_of::<PidGains>()),
    tag("limits", offset_of!(Joint, limits), size_of::<JointLimits>()),
    tag("control_mode", offset_of!(Joint, control_mode), size_of::<u32>()),
    tag("setpoint", offset_of!(Joint, setpoint), size_of::<f32>()),
    tag("position", offset_of!(Joint, position), size_of::<f32>()),
    tag("velocity", offset_of!(Joint, velocity), size_of::<f32>()),
];

pub const JOINT_RWMODES: [RwMode; 6] = [
    RwMode::READ_WRITE,
    RwMode::READ_WRITE,
    RwMode::READ_WRITE,
    RwMode::READ_WRITE,
    RwMode::READ,
    RwMode::READ,
];

pub const MOTOR_TAGS: [TagRom; 4] = [
    tag("current_limit", offset_of!(Motor, current_limit), size_of::<f32>()),
    tag("gearbox_ratio", offset_of!(Motor, gearbox_ratio), size_of::<i32>()),
    tag("current", offset_of!(Motor, current), size_of::<f32>()),
    tag("temperature", offset_of!(Motor, temperature), size_of::<f32>()),
];

pub const MOTOR_RWMODES: [RwMode; 4] = [
    RwMode::READ_WRITE,
    RwMode::READ_WRITE,
    RwMode::READ,
    RwMode::READ,
];

pub const CONTROLLER_TAGS: [TagRom; 3] = [
    tag("cycle_time", offset_of!(Controller, cycle_time_us), size_of::<u32>()),
    tag("status", offset_of!(Controller, status), size_of::<u32>()),
    tag("command", offset_of!(Controller, command), size_of::<u32>()),
];

pub const CONTROLLER_RWMODES: [RwMode; 3] = [RwMode::READ_WRITE, RwMode::READ, RwMode::WRITE];

// Every tag has a capability and lies inside its record.
const_assert_eq!(JOINT_TAGS.len(), JOINT_RWMODES.len());
const_assert_eq!(MOTOR_TAGS.len(), MOTOR_RWMODES.len());
const_assert_eq!(CONTROLLER_TAGS.len(), CONTROLLER_RWMODES.len());
const_assert!(layout_is_sound(&JOINT_TAGS, &JOINT_RWMODES, size_of::<Joint>()));
const_assert!(layout_is_sound(&MOTOR_TAGS, &MOTOR_RWMODES, size_of::<Motor>()));
const_assert!(layout_is_sound(&CONTROLLER_TAGS, &CONTROLLER_RWMODES, size_of::<Controller>()));

/// Layout table of the motion-control endpoint.
pub static MOTION_CONTROL: EndpointRom = EndpointRom {
    endpoint: Endpoint::MotionControl,
    entities: &[
        EntityRom {
            kind: McEntity::Joint as u8,
            name: "joint",
            record_size: size_of::<Joint>(),
            tags: &JOINT_TAGS,
            rwmodes: &JOINT_RWMODES,
            default_record: || JOINT_DEFAULT.as_bytes(),
        },
        EntityRom {
            kind: McEntity::Motor as u8,
            name: "motor",
            record_size: size_of::<Motor>(),
            tags: &MOTOR_TAGS,
            rwmodes: &MOTOR_RWMODES,
            default_record: || MOTOR_DEFAULT.as_bytes(),
        },
        EntityRom {
            kind: McEntity::Controller as u8,
            name: "controller",
            record_size: size_of::<Controller>(),
            tags: &CONTROLLER_TAGS,
            rwmodes: &CONTROLLER_RWMODES,
            default_record: || CONTROLLER_DEFAULT.as_bytes(),
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_counts() {
        assert_eq!(MOTION_CONTROL.tags_count(McEntity::Joint as u8), 6);
        assert_eq!(MOTION_CONTROL.tags_count(McEntity::Motor as u8), 4);
        assert_eq!(MOTION_CONTROL.tags_count(McEntity::Controller as u8), 3);
        assert_eq!(MOTION_CONTROL.tags_count(3), 0);
    }

    #[test]
    fn joint_offsets() {
        let joint = McEntity::Joint as u8;
        assert_eq!(MOTION_CONTROL.tag_offset(joint, JointTag::PidGains as u8), Some(0));
        assert_eq!(MOTION_CONTROL.tag_offset(joint, JointTag::Limits as u8), Some(12));
        assert_eq!(MOTION_CONTROL.tag_offset(joint, JointTag::Velocity as u8), Some(32));
        assert_eq!(MOTION_CONTROL.variable_size(joint, JointTag::PidGains as u8), Some(12));
        assert_eq!(MOTION_CONTROL.tag_offset(joint, 6), None);
    }

    #[test]
    fn default_values_slice_the_default_record() {
        let motor = McEntity::Motor as u8;
        let limit = MOTION_CONTROL
            .default_value(motor, MotorTag::CurrentLimit as u8)
            .unwrap();
        assert_eq!(limit, 1000.0f32.to_ne_bytes());

        let ratio = MOTION_CONTROL
            .default_value(motor, MotorTag::GearboxRatio as u8)
            .unwrap();
        assert_eq!(ratio, 1i32.to_ne_bytes());

        let cycle = MOTION_CONTROL
            .default_value(McEntity::Controller as u8, ControllerTag::CycleTime as u8)
            .unwrap();
        assert_eq!(cycle, 1000u32.to_ne_bytes());
    }

    #[test]
    fn default_record_roundtrips_through_bytes() {
        let bytes = MOTION_CONTROL.default_record(McEntity::Joint as u8).unwrap();
        let joint = Joint::read_from_bytes(bytes).unwrap();
        assert_eq!(joint, Joint::DEFAULT);
    }

    #[test]
    fn rwmodes() {
        let ctrl = McEntity::Controller as u8;
        assert_eq!(
            MOTION_CONTROL.rwmode(ctrl, ControllerTag::Command as u8),
            Some(RwMode::WRITE)
        );
        assert_eq!(
            MOTION_CONTROL.rwmode(McEntity::Joint as u8, JointTag::Position as u8),
            Some(RwMode::READ)
        );
        assert_eq!(MOTION_CONTROL.rwmode(ctrl, 9), None);
    }
}
