//! Public entry points.
//!
//! Dispatch order: an installed override takes unconditional precedence;
//! null function or receiver addresses short-circuit to the zero payload;
//! otherwise the register-decode path is preferred where available, with
//! the generic trampoline as the portable fallback and the inert stub
//! everywhere else.
//!
//! All paths are synchronous: one blocking native call per invocation,
//! no timeout or cancellation at this layer.

use crate::error::FfiError;
use crate::hooks;
use crate::payload::{AnalogActionData, DigitalActionData, MotionData};

#[cfg(all(any(unix, windows), not(all(target_arch = "x86_64", unix))))]
use crate::cif::Dispatcher;
#[cfg(all(any(unix, windows), not(all(target_arch = "x86_64", unix))))]
use crate::payload::Shape;

#[cfg(all(any(unix, windows), not(all(target_arch = "x86_64", unix))))]
static DISPATCHER: Dispatcher = Dispatcher::new();

/// Read a digital action result from the native function at `fn_ptr`.
///
/// `fn_ptr` and `receiver` are raw addresses; a zero value for either
/// short-circuits to the zero payload without issuing a call. Only
/// initialization of the generic path can fail; the error is cached and
/// identical for every subsequent caller, who should treat the
/// dispatcher as permanently unavailable rather than retry.
pub fn digital_action_data(
    fn_ptr: usize,
    receiver: usize,
    input_handle: u64,
    action_handle: u64,
) -> Result<DigitalActionData, FfiError> {
    if let Some(hook) = hooks::digital() {
        return Ok(hook(fn_ptr, receiver, input_handle, action_handle));
    }
    if fn_ptr == 0 || receiver == 0 {
        return Ok(DigitalActionData::default());
    }
    native_digital(fn_ptr, receiver, input_handle, action_handle)
}

/// Read an analog action result from the native function at `fn_ptr`.
pub fn analog_action_data(
    fn_ptr: usize,
    receiver: usize,
    input_handle: u64,
    action_handle: u64,
) -> Result<AnalogActionData, FfiError> {
    if let Some(hook) = hooks::analog() {
        return Ok(hook(fn_ptr, receiver, input_handle, action_handle));
    }
    if fn_ptr == 0 || receiver == 0 {
        return Ok(AnalogActionData::default());
    }
    native_analog(fn_ptr, receiver, input_handle, action_handle)
}

/// Read a motion result from the native function at `fn_ptr`.
pub fn motion_data(
    fn_ptr: usize,
    receiver: usize,
    input_handle: u64,
) -> Result<MotionData, FfiError> {
    if let Some(hook) = hooks::motion() {
        return Ok(hook(fn_ptr, receiver, input_handle));
    }
    if fn_ptr == 0 || receiver == 0 {
        return Ok(MotionData::default());
    }
    native_motion(fn_ptr, receiver, input_handle)
}

#[cfg(all(target_arch = "x86_64", unix))]
fn native_digital(
    fn_ptr: usize,
    receiver: usize,
    input_handle: u64,
    action_handle: u64,
) -> Result<DigitalActionData, FfiError> {
    Ok(crate::fastpath::call_digital(
        fn_ptr,
        receiver,
        input_handle,
        action_handle,
    ))
}

#[cfg(all(target_arch = "x86_64", unix))]
fn native_analog(
    fn_ptr: usize,
    receiver: usize,
    input_handle: u64,
    action_handle: u64,
) -> Result<AnalogActionData, FfiError> {
    Ok(crate::fastpath::call_analog(
        fn_ptr,
        receiver,
        input_handle,
        action_handle,
    ))
}

#[cfg(all(target_arch = "x86_64", unix))]
fn native_motion(
    fn_ptr: usize,
    receiver: usize,
    input_handle: u64,
) -> Result<MotionData, FfiError> {
    Ok(crate::fastpath::call_motion(fn_ptr, receiver, input_handle))
}

#[cfg(all(any(unix, windows), not(all(target_arch = "x86_64", unix))))]
fn native_digital(
    fn_ptr: usize,
    receiver: usize,
    input_handle: u64,
    action_handle: u64,
) -> Result<DigitalActionData, FfiError> {
    let desc = DISPATCHER.descriptor(Shape::Digital)?;
    let lib = DISPATCHER.library()?;
    Ok(crate::invoke::call_digital(
        lib,
        desc,
        fn_ptr,
        receiver,
        input_handle,
        action_handle,
    ))
}

#[cfg(all(any(unix, windows), not(all(target_arch = "x86_64", unix))))]
fn native_analog(
    fn_ptr: usize,
    receiver: usize,
    input_handle: u64,
    action_handle: u64,
) -> Result<AnalogActionData, FfiError> {
    let desc = DISPATCHER.descriptor(Shape::Analog)?;
    let lib = DISPATCHER.library()?;
    Ok(crate::invoke::call_analog(
        lib,
        desc,
        fn_ptr,
        receiver,
        input_handle,
        action_handle,
    ))
}

#[cfg(all(any(unix, windows), not(all(target_arch = "x86_64", unix))))]
fn native_motion(
    fn_ptr: usize,
    receiver: usize,
    input_handle: u64,
) -> Result<MotionData, FfiError> {
    let desc = DISPATCHER.descriptor(Shape::Motion)?;
    let lib = DISPATCHER.library()?;
    Ok(crate::invoke::call_motion(
        lib, desc, fn_ptr, receiver, input_handle,
    ))
}

#[cfg(not(any(unix, windows)))]
fn native_digital(
    fn_ptr: usize,
    receiver: usize,
    input_handle: u64,
    action_handle: u64,
) -> Result<DigitalActionData, FfiError> {
    Ok(crate::stub::call_digital(
        fn_ptr,
        receiver,
        input_handle,
        action_handle,
    ))
}

#[cfg(not(any(unix, windows)))]
fn native_analog(
    fn_ptr: usize,
    receiver: usize,
    input_handle: u64,
    action_handle: u64,
) -> Result<AnalogActionData, FfiError> {
    Ok(crate::stub::call_analog(
        fn_ptr,
        receiver,
        input_handle,
        action_handle,
    ))
}

#[cfg(not(any(unix, windows)))]
fn native_motion(
    fn_ptr: usize,
    receiver: usize,
    input_handle: u64,
) -> Result<MotionData, FfiError> {
    Ok(crate::stub::call_motion(fn_ptr, receiver, input_handle))
}
