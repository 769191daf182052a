//! x86-64 System V register-decode invoker.
//!
//! On this convention the three aggregates classify predictably: the
//! digital and analog results come back in the first two integer return
//! registers, and the motion result is too large for registers, so the
//! callee writes it through a hidden pointer passed as a concealed first
//! argument.
//!
//! Decoding is table-driven over raw return words and kept in pure
//! functions, compiled on every target so the bit-level rules stay unit
//! tested even where the raw-call routines are not available. The rest of
//! the crate never reasons about registers directly.

use crate::payload::{AnalogActionData, DigitalActionData};
#[cfg(all(target_arch = "x86_64", unix))]
use crate::payload::{MotionData, RawMotion};

/// Decode a digital action out of the first return word.
///
/// Byte 0 carries the state flag, byte 1 the active flag.
#[inline]
pub(crate) fn decode_digital(r1: u64) -> DigitalActionData {
    DigitalActionData {
        state: (r1 & 0xFF) != 0,
        active: ((r1 >> 8) & 0xFF) != 0,
    }
}

/// Decode an analog action out of the first two return words.
///
/// r1 packs the mode (low half) and the x value's float bits (high half);
/// r2 packs the y value's float bits (low half) and the active flag
/// (byte 4).
#[inline]
pub(crate) fn decode_analog(r1: u64, r2: u64) -> AnalogActionData {
    AnalogActionData {
        mode: r1 as u32 as i32,
        x: f32::from_bits((r1 >> 32) as u32),
        y: f32::from_bits(r2 as u32),
        active: ((r2 >> 32) & 0xFF) != 0,
    }
}

#[cfg(all(target_arch = "x86_64", unix))]
pub(crate) fn call_digital(
    fn_ptr: usize,
    receiver: usize,
    input_handle: u64,
    action_handle: u64,
) -> DigitalActionData {
    if fn_ptr == 0 || receiver == 0 {
        return DigitalActionData::default();
    }
    let (r1, _) = unsafe { raw_call3(fn_ptr, receiver, input_handle, action_handle) };
    decode_digital(r1)
}

#[cfg(all(target_arch = "x86_64", unix))]
pub(crate) fn call_analog(
    fn_ptr: usize,
    receiver: usize,
    input_handle: u64,
    action_handle: u64,
) -> AnalogActionData {
    if fn_ptr == 0 || receiver == 0 {
        return AnalogActionData::default();
    }
    let (r1, r2) = unsafe { raw_call3(fn_ptr, receiver, input_handle, action_handle) };
    decode_analog(r1, r2)
}

#[cfg(all(target_arch = "x86_64", unix))]
pub(crate) fn call_motion(fn_ptr: usize, receiver: usize, input_handle: u64) -> MotionData {
    if fn_ptr == 0 || receiver == 0 {
        return MotionData::default();
    }
    // The motion aggregate exceeds the register return size, so the
    // callee fills a caller-supplied buffer through the hidden first
    // argument instead.
    let mut out = RawMotion::default();
    unsafe { raw_call_indirect(fn_ptr, &mut out, receiver, input_handle) };
    out.into()
}

/// Issue a raw three-argument call and capture both integer return words.
///
/// # Safety
///
/// `fn_ptr` must be a valid function taking (pointer, u64, u64) under the
/// System V convention and returning an aggregate classified entirely
/// into integer registers.
#[cfg(all(target_arch = "x86_64", unix))]
unsafe fn raw_call3(fn_ptr: usize, a: usize, b: u64, c: u64) -> (u64, u64) {
    let r1: u64;
    let r2: u64;
    core::arch::asm!(
        "call {f}",
        f = in(reg) fn_ptr,
        in("rdi") a,
        in("rsi") b,
        inlateout("rdx") c => r2,
        lateout("rax") r1,
        clobber_abi("C"),
    );
    (r1, r2)
}

/// Issue a raw call with a hidden output pointer as the first argument.
///
/// # Safety
///
/// `fn_ptr` must be a valid function taking (pointer, u64) under the
/// System V convention and returning the motion aggregate by indirect
/// return.
#[cfg(all(target_arch = "x86_64", unix))]
unsafe fn raw_call_indirect(fn_ptr: usize, out: *mut RawMotion, a: usize, b: u64) {
    core::arch::asm!(
        "call {f}",
        f = in(reg) fn_ptr,
        in("rdi") out,
        in("rsi") a,
        inlateout("rdx") b => _,
        lateout("rax") _,
        clobber_abi("C"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_digital_both_flags_set() {
        let d = decode_digital(0x0000_0000_0000_0101);
        assert_eq!(
            d,
            DigitalActionData {
                state: true,
                active: true
            }
        );
    }

    #[test]
    fn test_decode_digital_zero_word() {
        let d = decode_digital(0);
        assert_eq!(
            d,
            DigitalActionData {
                state: false,
                active: false
            }
        );
    }

    #[test]
    fn test_decode_digital_ignores_high_bytes() {
        let d = decode_digital(0xFFFF_FFFF_FFFF_0001);
        assert!(d.state);
        assert!(!d.active);
    }

    #[test]
    fn test_decode_analog_reference_words() {
        // mode = 4 in the low half of r1, x = 1.0 (0x3F800000) in the
        // high half; y = 2.0 (0x40000000) in the low half of r2, active
        // flag in byte 4.
        let a = decode_analog(0x3F80_0000_0000_0004, 0x0000_0001_4000_0000);
        assert_eq!(a.mode, 4);
        assert_eq!(a.x, 1.0);
        assert_eq!(a.y, 2.0);
        assert!(a.active);
    }

    #[test]
    fn test_decode_analog_zero_words() {
        let a = decode_analog(0, 0);
        assert_eq!(a, AnalogActionData::default());
    }

    #[test]
    fn test_decode_analog_negative_mode() {
        let a = decode_analog(0xFFFF_FFFFu64, 0);
        assert_eq!(a.mode, -1);
    }

    proptest! {
        // Pack arbitrary field values into return words the way the
        // convention does and check the decoder recovers every field.
        #[test]
        fn decode_analog_recovers_packed_fields(
            mode: i32,
            x: f32,
            y: f32,
            active_byte: u8,
        ) {
            let r1 = u64::from(mode as u32) | (u64::from(x.to_bits()) << 32);
            let r2 = u64::from(y.to_bits()) | (u64::from(active_byte) << 32);
            let a = decode_analog(r1, r2);
            prop_assert_eq!(a.mode, mode);
            prop_assert_eq!(a.x.to_bits(), x.to_bits());
            prop_assert_eq!(a.y.to_bits(), y.to_bits());
            prop_assert_eq!(a.active, active_byte != 0);
        }
    }
}
