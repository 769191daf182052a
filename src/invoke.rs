//! Generic trampoline-driven invoker.
//!
//! Portable fallback for targets without a hand-written register-decode
//! routine. Each argument is marshaled into its own storage cell; a
//! contiguous array of cell pointers, in the descriptor's declared order,
//! is handed to the foreign library's generic call trampoline together
//! with an output buffer matching the aggregate result exactly.
//!
//! Invariant: every argument cell must outlive the trampoline call. All
//! cells are locals of the invoking function, which cannot return before
//! the call does.

use core::ffi::c_void;

use crate::cif::CallDescriptor;
use crate::library::ForeignLibrary;
use crate::payload::{
    AnalogActionData, DigitalActionData, MotionData, RawAnalog, RawDigital, RawMotion,
};

pub(crate) fn call_digital(
    lib: &ForeignLibrary,
    desc: &CallDescriptor,
    fn_ptr: usize,
    receiver: usize,
    input_handle: u64,
    action_handle: u64,
) -> DigitalActionData {
    let mut receiver_cell = receiver as *mut c_void;
    let mut input_cell = input_handle;
    let mut action_cell = action_handle;
    let mut argv: [*mut c_void; 3] = [
        (&mut receiver_cell as *mut *mut c_void).cast(),
        (&mut input_cell as *mut u64).cast(),
        (&mut action_cell as *mut u64).cast(),
    ];

    let mut out = RawDigital::default();
    unsafe {
        (lib.call)(
            desc.native_ptr(),
            fn_ptr as *mut c_void,
            (&mut out as *mut RawDigital).cast(),
            argv.as_mut_ptr(),
        );
    }
    out.into()
}

pub(crate) fn call_analog(
    lib: &ForeignLibrary,
    desc: &CallDescriptor,
    fn_ptr: usize,
    receiver: usize,
    input_handle: u64,
    action_handle: u64,
) -> AnalogActionData {
    let mut receiver_cell = receiver as *mut c_void;
    let mut input_cell = input_handle;
    let mut action_cell = action_handle;
    let mut argv: [*mut c_void; 3] = [
        (&mut receiver_cell as *mut *mut c_void).cast(),
        (&mut input_cell as *mut u64).cast(),
        (&mut action_cell as *mut u64).cast(),
    ];

    let mut out = RawAnalog::default();
    unsafe {
        (lib.call)(
            desc.native_ptr(),
            fn_ptr as *mut c_void,
            (&mut out as *mut RawAnalog).cast(),
            argv.as_mut_ptr(),
        );
    }
    out.into()
}

pub(crate) fn call_motion(
    lib: &ForeignLibrary,
    desc: &CallDescriptor,
    fn_ptr: usize,
    receiver: usize,
    input_handle: u64,
) -> MotionData {
    let mut receiver_cell = receiver as *mut c_void;
    let mut input_cell = input_handle;
    let mut argv: [*mut c_void; 2] = [
        (&mut receiver_cell as *mut *mut c_void).cast(),
        (&mut input_cell as *mut u64).cast(),
    ];

    let mut out = RawMotion::default();
    unsafe {
        (lib.call)(
            desc.native_ptr(),
            fn_ptr as *mut c_void,
            (&mut out as *mut RawMotion).cast(),
            argv.as_mut_ptr(),
        );
    }
    out.into()
}
