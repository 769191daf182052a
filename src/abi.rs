//! Calling-convention identifier negotiation.
//!
//! The foreign library selects argument and return placement rules from a
//! small integer whose concrete value differs across platform families
//! and library builds. Rather than hard-coding one, probe candidates in
//! increasing order with a trivial zero-argument void signature; the
//! first accepted identifier is the platform's convention.

use core::ptr;

use crate::error::FfiError;
use crate::library::ForeignLibrary;
use crate::logging::{debug, trace};
use crate::types::{status, CifBlob};

/// Highest candidate identifier probed, inclusive.
///
/// Convention identifiers form a small closed enumeration per platform
/// family; every known build falls well inside this ceiling.
pub(crate) const MAX_CANDIDATE: u32 = 16;

/// Probe candidates in increasing order and return the first accepted.
///
/// Deterministic: for a fixed set of accepted identifiers this always
/// selects the smallest. The caller caches the outcome, success or
/// failure, for the process lifetime.
pub(crate) fn negotiate(lib: &ForeignLibrary) -> Result<u32, FfiError> {
    for candidate in 0..=MAX_CANDIDATE {
        let mut blob = CifBlob::new();
        // Zero-argument void signature: the cheapest preparation that
        // still validates the convention identifier.
        let st = unsafe {
            (lib.prep)(blob.as_mut_ptr(), candidate, 0, lib.type_void, ptr::null_mut())
        };
        if st == status::OK {
            debug!(abi = candidate, "calling convention negotiated");
            return Ok(candidate);
        }
        trace!(abi = candidate, status = st, "calling convention rejected");
    }
    Err(FfiError::AbiUnsupported)
}
