//! Per-shape override seam.
//!
//! Each shape has one process-wide, swappable function reference checked
//! before any native dispatch. An installed override replaces the whole
//! call; clearing it restores native dispatch. This exists to make the
//! dispatcher's call sites deterministic and hardware-independent for
//! testing.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::payload::{AnalogActionData, DigitalActionData, MotionData};

pub(crate) type DigitalHook =
    Arc<dyn Fn(usize, usize, u64, u64) -> DigitalActionData + Send + Sync>;
pub(crate) type AnalogHook =
    Arc<dyn Fn(usize, usize, u64, u64) -> AnalogActionData + Send + Sync>;
pub(crate) type MotionHook = Arc<dyn Fn(usize, usize, u64) -> MotionData + Send + Sync>;

static DIGITAL: RwLock<Option<DigitalHook>> = RwLock::new(None);
static ANALOG: RwLock<Option<AnalogHook>> = RwLock::new(None);
static MOTION: RwLock<Option<MotionHook>> = RwLock::new(None);

/// Install an override for digital action calls.
pub fn set_digital_action_override<F>(hook: F)
where
    F: Fn(usize, usize, u64, u64) -> DigitalActionData + Send + Sync + 'static,
{
    *DIGITAL.write() = Some(Arc::new(hook));
}

/// Restore native dispatch for digital action calls.
pub fn clear_digital_action_override() {
    *DIGITAL.write() = None;
}

/// Install an override for analog action calls.
pub fn set_analog_action_override<F>(hook: F)
where
    F: Fn(usize, usize, u64, u64) -> AnalogActionData + Send + Sync + 'static,
{
    *ANALOG.write() = Some(Arc::new(hook));
}

/// Restore native dispatch for analog action calls.
pub fn clear_analog_action_override() {
    *ANALOG.write() = None;
}

/// Install an override for motion calls.
pub fn set_motion_override<F>(hook: F)
where
    F: Fn(usize, usize, u64) -> MotionData + Send + Sync + 'static,
{
    *MOTION.write() = Some(Arc::new(hook));
}

/// Restore native dispatch for motion calls.
pub fn clear_motion_override() {
    *MOTION.write() = None;
}

#[inline]
pub(crate) fn digital() -> Option<DigitalHook> {
    DIGITAL.read().clone()
}

#[inline]
pub(crate) fn analog() -> Option<AnalogHook> {
    ANALOG.read().clone()
}

#[inline]
pub(crate) fn motion() -> Option<MotionHook> {
    MOTION.read().clone()
}
