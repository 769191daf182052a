//! Aggregate payload shapes returned by value from the native SDK.
//!
//! The `#[repr(C)]` raw mirrors are part of the wire contract: field order,
//! field types and field count must match the SDK's in-memory layout exactly.

/// Digital action state read back from a controller.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DigitalActionData {
    /// Current state of the action.
    pub state: bool,
    /// Whether the action is bound to an origin and visible to the user.
    pub active: bool,
}

/// Analog action state (joystick, trigger, trackpad).
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AnalogActionData {
    /// Input mode the source is operating in.
    pub mode: i32,
    /// Current horizontal value.
    pub x: f32,
    /// Current vertical value.
    pub y: f32,
    /// Whether the action is bound to an origin and visible to the user.
    pub active: bool,
}

/// Motion sensor state: rotation quaternion, positional acceleration and
/// angular velocity, in that field order.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MotionData {
    pub rot_quat_x: f32,
    pub rot_quat_y: f32,
    pub rot_quat_z: f32,
    pub rot_quat_w: f32,
    pub pos_accel_x: f32,
    pub pos_accel_y: f32,
    pub pos_accel_z: f32,
    pub rot_vel_x: f32,
    pub rot_vel_y: f32,
    pub rot_vel_z: f32,
}

/// The closed set of aggregate shapes this dispatcher supports.
///
/// Fixed by the upstream SDK; deliberately an enum rather than an open
/// plugin mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Digital,
    Analog,
    Motion,
}

impl Shape {
    /// Number of call arguments for this shape (receiver + numeric handles).
    #[inline]
    pub(crate) const fn arg_count(self) -> usize {
        match self {
            Self::Digital | Self::Analog => 3,
            Self::Motion => 2,
        }
    }
}

impl core::fmt::Display for Shape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Digital => write!(f, "digital action"),
            Self::Analog => write!(f, "analog action"),
            Self::Motion => write!(f, "motion"),
        }
    }
}

/// C layout of the digital action result.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct RawDigital {
    pub state: u8,
    pub active: u8,
}

/// C layout of the analog action result.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct RawAnalog {
    pub mode: i32,
    pub x: f32,
    pub y: f32,
    pub active: u8,
}

/// C layout of the motion result: ten consecutive 32-bit floats.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct RawMotion {
    pub rot_quat_x: f32,
    pub rot_quat_y: f32,
    pub rot_quat_z: f32,
    pub rot_quat_w: f32,
    pub pos_accel_x: f32,
    pub pos_accel_y: f32,
    pub pos_accel_z: f32,
    pub rot_vel_x: f32,
    pub rot_vel_y: f32,
    pub rot_vel_z: f32,
}

impl From<RawDigital> for DigitalActionData {
    #[inline]
    fn from(raw: RawDigital) -> Self {
        Self {
            state: raw.state != 0,
            active: raw.active != 0,
        }
    }
}

impl From<RawAnalog> for AnalogActionData {
    #[inline]
    fn from(raw: RawAnalog) -> Self {
        Self {
            mode: raw.mode,
            x: raw.x,
            y: raw.y,
            active: raw.active != 0,
        }
    }
}

impl From<RawMotion> for MotionData {
    #[inline]
    fn from(raw: RawMotion) -> Self {
        Self {
            rot_quat_x: raw.rot_quat_x,
            rot_quat_y: raw.rot_quat_y,
            rot_quat_z: raw.rot_quat_z,
            rot_quat_w: raw.rot_quat_w,
            pos_accel_x: raw.pos_accel_x,
            pos_accel_y: raw.pos_accel_y,
            pos_accel_z: raw.pos_accel_z,
            rot_vel_x: raw.rot_vel_x,
            rot_vel_y: raw.rot_vel_y,
            rot_vel_z: raw.rot_vel_z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_layouts_match_sdk() {
        assert_eq!(core::mem::size_of::<RawDigital>(), 2);
        assert_eq!(core::mem::size_of::<RawAnalog>(), 16);
        assert_eq!(core::mem::size_of::<RawMotion>(), 40);
        assert_eq!(core::mem::align_of::<RawAnalog>(), 4);
    }

    #[test]
    fn test_raw_conversions() {
        let d: DigitalActionData = RawDigital { state: 1, active: 0 }.into();
        assert_eq!(d, DigitalActionData { state: true, active: false });

        let a: AnalogActionData = RawAnalog {
            mode: 4,
            x: 1.0,
            y: 2.0,
            active: 2,
        }
        .into();
        assert_eq!(a.mode, 4);
        assert!(a.active);
    }

    #[test]
    fn test_zero_defaults() {
        assert!(!DigitalActionData::default().state);
        assert_eq!(AnalogActionData::default().mode, 0);
        assert_eq!(MotionData::default().rot_vel_z, 0.0);
    }

    #[test]
    fn test_shape_arg_counts() {
        assert_eq!(Shape::Digital.arg_count(), 3);
        assert_eq!(Shape::Analog.arg_count(), 3);
        assert_eq!(Shape::Motion.arg_count(), 2);
    }
}
