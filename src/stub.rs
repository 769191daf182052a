//! Inert fallback for targets with neither a register-decode routine nor
//! the generic trampoline.
//!
//! Every request returns the zero payload unconditionally. This is a
//! deliberate degrade-to-inert behavior, not an error; callers must not
//! depend on non-zero results on such builds.

use crate::payload::{AnalogActionData, DigitalActionData, MotionData};

#[inline]
pub(crate) fn call_digital(
    _fn_ptr: usize,
    _receiver: usize,
    _input_handle: u64,
    _action_handle: u64,
) -> DigitalActionData {
    DigitalActionData::default()
}

#[inline]
pub(crate) fn call_analog(
    _fn_ptr: usize,
    _receiver: usize,
    _input_handle: u64,
    _action_handle: u64,
) -> AnalogActionData {
    AnalogActionData::default()
}

#[inline]
pub(crate) fn call_motion(
    _fn_ptr: usize,
    _receiver: usize,
    _input_handle: u64,
) -> MotionData {
    MotionData::default()
}
