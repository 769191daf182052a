//! Foreign type descriptors and aggregate assembly.
//!
//! Primitive descriptors are owned by the foreign invocation library and
//! are never copied or mutated. Aggregate descriptors are assembled here
//! once per shape and intentionally leaked: descriptor preparation stores
//! pointers into them, so they must stay pointer-stable for the process
//! lifetime.

use core::ptr;

use crate::library::ForeignLibrary;
use crate::payload::Shape;

/// Mirror of the foreign library's type descriptor.
///
/// For aggregates, `size` and `alignment` are left zero; the library
/// computes them during call-descriptor preparation.
#[repr(C)]
#[derive(Debug)]
pub(crate) struct RawType {
    pub size: usize,
    pub alignment: u16,
    pub kind: u16,
    /// Null-terminated list of element descriptors, or null for primitives.
    pub elements: *mut *mut RawType,
}

/// Type tag the foreign library uses for aggregates.
pub(crate) const KIND_AGGREGATE: u16 = 13;

/// Status codes reported by the descriptor-preparation operation.
pub(crate) mod status {
    pub const OK: i32 = 0;
    pub const BAD_TYPEDEF: i32 = 1;
    pub const BAD_ABI: i32 = 2;
}

/// Opaque storage for a prepared native call descriptor.
///
/// The descriptor's true layout is private to the foreign library and
/// varies per architecture; this buffer is oversized for all of them.
#[repr(C, align(16))]
pub(crate) struct CifBlob([u8; 256]);

impl CifBlob {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self([0; 256])
    }

    #[inline]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut core::ffi::c_void {
        self.0.as_mut_ptr().cast()
    }
}

/// Assemble an aggregate descriptor from an ordered field list.
///
/// The element list is null-terminated and, like the descriptor header,
/// leaked: both are referenced by prepared call descriptors until process
/// exit.
pub(crate) fn build_aggregate(fields: &[*mut RawType]) -> *mut RawType {
    let mut elements: Vec<*mut RawType> = fields.to_vec();
    elements.push(ptr::null_mut());
    let elements: &'static mut [*mut RawType] = Box::leak(elements.into_boxed_slice());

    Box::leak(Box::new(RawType {
        size: 0,
        alignment: 0,
        kind: KIND_AGGREGATE,
        elements: elements.as_mut_ptr(),
    }))
}

/// Ordered field descriptors for a shape's return aggregate.
pub(crate) fn aggregate_fields(lib: &ForeignLibrary, shape: Shape) -> Vec<*mut RawType> {
    match shape {
        Shape::Digital => vec![lib.type_u8, lib.type_u8],
        Shape::Analog => vec![lib.type_i32, lib.type_f32, lib.type_f32, lib.type_u8],
        Shape::Motion => vec![lib.type_f32; 10],
    }
}

/// Ordered argument descriptors for a shape's call signature.
pub(crate) fn argument_types(lib: &ForeignLibrary, shape: Shape) -> Vec<*mut RawType> {
    match shape {
        Shape::Digital | Shape::Analog => vec![lib.type_pointer, lib.type_u64, lib.type_u64],
        Shape::Motion => vec![lib.type_pointer, lib.type_u64],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_is_null_terminated() {
        let mut a = RawType {
            size: 1,
            alignment: 1,
            kind: 5,
            elements: ptr::null_mut(),
        };
        let pa: *mut RawType = &mut a;
        let fields = [pa, pa];
        let agg = build_aggregate(&fields);

        unsafe {
            assert_eq!((*agg).kind, KIND_AGGREGATE);
            assert_eq!((*agg).size, 0);
            assert_eq!(*(*agg).elements.add(0), fields[0]);
            assert_eq!(*(*agg).elements.add(1), fields[1]);
            assert!((*(*agg).elements.add(2)).is_null());
        }
    }
}
