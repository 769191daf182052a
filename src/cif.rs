//! Per-signature call descriptors and their process-wide cache.
//!
//! A `CallDescriptor` is built exactly once per shape and immutable
//! thereafter; any number of concurrent invocations read it without
//! locking. The cache is three independent compute-once cells, so a
//! broken descriptor for one shape never blocks the others.

use once_cell::sync::OnceCell;

use crate::abi;
use crate::error::FfiError;
use crate::library::ForeignLibrary;
use crate::logging::{debug, error};
use crate::payload::Shape;
use crate::types::{self, status, CifBlob, RawType};

/// A prepared, immutable description of one call signature.
///
/// The blob and argument array are boxed so their addresses survive moves
/// of the descriptor itself: preparation stores pointers into both.
pub(crate) struct CallDescriptor {
    blob: Box<CifBlob>,
    abi: u32,
    // Owned so the pointers stored inside the prepared blob stay valid.
    #[allow(dead_code)]
    args: Box<[*mut RawType]>,
    #[allow(dead_code)]
    ret: *mut RawType,
}

// Read-only after construction; the raw pointers reference leaked or
// library-owned descriptors valid from any thread.
unsafe impl Send for CallDescriptor {}
unsafe impl Sync for CallDescriptor {}

impl CallDescriptor {
    /// Prepare the descriptor for one shape with the negotiated convention.
    ///
    /// # Panics
    ///
    /// Panics if preparation reports a malformed type description. The
    /// three signatures are fixed at compile time, so that status is a
    /// defect in this crate, and continuing would silently corrupt
    /// results.
    pub(crate) fn prepare(
        lib: &ForeignLibrary,
        abi: u32,
        shape: Shape,
    ) -> Result<Self, FfiError> {
        let ret = types::build_aggregate(&types::aggregate_fields(lib, shape));
        let mut args = types::argument_types(lib, shape).into_boxed_slice();
        debug_assert_eq!(args.len(), shape.arg_count());

        let mut blob = Box::new(CifBlob::new());
        let st = unsafe {
            (lib.prep)(
                blob.as_mut_ptr(),
                abi,
                args.len() as u32,
                ret,
                args.as_mut_ptr(),
            )
        };

        match st {
            status::OK => {
                debug!(%shape, abi, "call descriptor prepared");
                Ok(Self { blob, abi, args, ret })
            }
            status::BAD_ABI => {
                error!(%shape, abi, "negotiated calling convention rejected");
                Err(FfiError::CallDescriptorRejected { shape, abi })
            }
            status::BAD_TYPEDEF => {
                error!(%shape, abi, "type description rejected");
                panic!("malformed type description for the {} signature", shape);
            }
            other => {
                error!(%shape, status = other, "descriptor preparation failed");
                panic!(
                    "unexpected preparation status {} for the {} signature",
                    other, shape
                );
            }
        }
    }

    /// Address of the prepared native descriptor.
    #[inline]
    pub(crate) fn native_ptr(&self) -> *mut core::ffi::c_void {
        // Stable: the blob is boxed and never reallocated.
        self.blob.as_ref() as *const CifBlob as *mut core::ffi::c_void
    }

    /// Convention identifier this descriptor was prepared with.
    #[inline]
    pub(crate) fn abi(&self) -> u32 {
        self.abi
    }
}

/// Process-wide dispatcher state: the library binding, the negotiated
/// convention, and one descriptor cell per shape.
///
/// Every cell follows the same discipline: compute once, cache the
/// outcome (success or failure) forever, block concurrent first-time
/// callers on the single computation.
pub(crate) struct Dispatcher {
    library: OnceCell<Result<ForeignLibrary, FfiError>>,
    abi: OnceCell<Result<u32, FfiError>>,
    digital: OnceCell<Result<CallDescriptor, FfiError>>,
    analog: OnceCell<Result<CallDescriptor, FfiError>>,
    motion: OnceCell<Result<CallDescriptor, FfiError>>,
}

impl Dispatcher {
    pub(crate) const fn new() -> Self {
        Self {
            library: OnceCell::new(),
            abi: OnceCell::new(),
            digital: OnceCell::new(),
            analog: OnceCell::new(),
            motion: OnceCell::new(),
        }
    }

    /// Build a dispatcher over a caller-supplied binding (tests).
    #[cfg(test)]
    pub(crate) fn with_library(lib: ForeignLibrary) -> Self {
        let dispatcher = Self::new();
        dispatcher
            .library
            .set(Ok(lib))
            .unwrap_or_else(|_| unreachable!("fresh cell"));
        dispatcher
    }

    pub(crate) fn library(&self) -> Result<&ForeignLibrary, FfiError> {
        self.library
            .get_or_init(ForeignLibrary::load)
            .as_ref()
            .map_err(Clone::clone)
    }

    pub(crate) fn abi(&self) -> Result<u32, FfiError> {
        if let Some(cached) = self.abi.get() {
            return cached.clone();
        }
        let lib = self.library()?;
        self.abi.get_or_init(|| abi::negotiate(lib)).clone()
    }

    /// The prepared descriptor for a shape, building it on first request.
    pub(crate) fn descriptor(&self, shape: Shape) -> Result<&CallDescriptor, FfiError> {
        let cell = match shape {
            Shape::Digital => &self.digital,
            Shape::Analog => &self.analog,
            Shape::Motion => &self.motion,
        };
        cell.get_or_init(|| {
            let lib = self.library()?;
            let abi = self.abi()?;
            CallDescriptor::prepare(lib, abi, shape)
        })
        .as_ref()
        .map_err(Clone::clone)
    }
}
