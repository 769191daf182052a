//! Structcall - struct-returning foreign-call dispatcher
//!
//! Lets calling code invoke native functions whose return value is a
//! small fixed-layout aggregate passed by value, when the generic
//! invocation mechanism available only guarantees correct behavior for
//! scalar or pointer returns. Emulates just enough of the platform
//! calling convention: type descriptors, convention-identifier
//! negotiation, memoized per-signature call descriptors, and, on x86-64
//! System V targets, decoding aggregate fields straight out of return
//! registers.
//!
//! Exactly three aggregate shapes are supported, fixed by the upstream
//! SDK: digital action, analog action and motion.
//!
//! Architecture:
//! - `payload.rs` - the three aggregate shapes and their C layouts
//! - `types.rs` - foreign type descriptors and aggregate assembly
//! - `abi.rs` - calling-convention identifier negotiation
//! - `cif.rs` - per-signature call descriptor cache
//! - `invoke.rs` - generic trampoline-driven invoker
//! - `fastpath.rs` - x86-64 System V register-decode invoker
//! - `stub.rs` - inert fallback for unsupported targets
//! - `hooks.rs` - per-shape override seam for tests
//! - `dispatch.rs` - public entry points
//! - `library.rs` - binding to the foreign invocation library

// Every platform path is compiled everywhere so the whole dispatcher
// stays unit-testable from one host; paths that are not the production
// route on the current target are exercised through the test suite only.
#[cfg_attr(
    any(all(target_arch = "x86_64", unix), not(any(unix, windows))),
    allow(dead_code)
)]
mod abi;
#[cfg_attr(
    any(all(target_arch = "x86_64", unix), not(any(unix, windows))),
    allow(dead_code)
)]
mod cif;
mod dispatch;
mod error;
#[cfg_attr(not(all(target_arch = "x86_64", unix)), allow(dead_code))]
mod fastpath;
pub mod hooks;
#[cfg_attr(
    any(all(target_arch = "x86_64", unix), not(any(unix, windows))),
    allow(dead_code)
)]
mod invoke;
#[cfg_attr(
    any(all(target_arch = "x86_64", unix), not(any(unix, windows))),
    allow(dead_code)
)]
mod library;
pub mod logging;
mod payload;
#[cfg_attr(any(unix, windows), allow(dead_code))]
mod stub;
#[cfg_attr(
    any(all(target_arch = "x86_64", unix), not(any(unix, windows))),
    allow(dead_code)
)]
mod types;

pub use dispatch::{analog_action_data, digital_action_data, motion_data};
pub use error::FfiError;
pub use hooks::{
    clear_analog_action_override, clear_digital_action_override, clear_motion_override,
    set_analog_action_override, set_digital_action_override, set_motion_override,
};
pub use logging::init_logging;
pub use payload::{AnalogActionData, DigitalActionData, MotionData, Shape};
