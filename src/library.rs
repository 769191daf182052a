//! Binding to the foreign invocation library.
//!
//! Resolves the two operations this dispatcher drives (descriptor
//! preparation and the generic call trampoline) and the six primitive
//! type descriptors, all by name. Any missing symbol fails the whole
//! subsystem; there is no partial-capability mode.
//!
//! Handles are never closed: resolved function pointers and type
//! descriptors are referenced for the process lifetime.

use core::ffi::c_void;

use crate::error::FfiError;
use crate::logging::{debug, info};
use crate::types::RawType;

/// Descriptor-preparation operation: (descriptor slot, convention id,
/// argument count, return type, argument type array) -> status.
pub(crate) type PrepFn =
    unsafe extern "C" fn(*mut c_void, u32, u32, *mut RawType, *mut *mut RawType) -> i32;

/// Generic call trampoline: (prepared descriptor, target address,
/// output buffer, argument-pointer array). Results land in the buffer.
pub(crate) type CallFn = unsafe extern "C" fn(*mut c_void, *mut c_void, *mut c_void, *mut *mut c_void);

const SYM_PREP: &str = "ffi_prep_cif";
const SYM_CALL: &str = "ffi_call";
const SYM_TYPE_VOID: &str = "ffi_type_void";
const SYM_TYPE_U8: &str = "ffi_type_uint8";
const SYM_TYPE_I32: &str = "ffi_type_sint32";
const SYM_TYPE_U64: &str = "ffi_type_uint64";
const SYM_TYPE_F32: &str = "ffi_type_float";
const SYM_TYPE_POINTER: &str = "ffi_type_pointer";

#[cfg(target_os = "macos")]
const CANDIDATES: &[&str] = &["libffi.8.dylib", "libffi.dylib", "/usr/lib/libffi.dylib"];
#[cfg(all(unix, not(target_os = "macos")))]
const CANDIDATES: &[&str] = &["libffi.so.8", "libffi.so.7", "libffi.so.6", "libffi.so"];
#[cfg(windows)]
const CANDIDATES: &[&str] = &["libffi-8.dll", "libffi-7.dll", "libffi.dll"];
#[cfg(not(any(unix, windows)))]
const CANDIDATES: &[&str] = &[];

/// Resolved entry points and primitive type descriptors.
///
/// The descriptor pointers are externally owned, read-only and stable for
/// the process lifetime.
pub(crate) struct ForeignLibrary {
    pub(crate) prep: PrepFn,
    pub(crate) call: CallFn,
    pub(crate) type_void: *mut RawType,
    pub(crate) type_u8: *mut RawType,
    pub(crate) type_i32: *mut RawType,
    pub(crate) type_u64: *mut RawType,
    pub(crate) type_f32: *mut RawType,
    pub(crate) type_pointer: *mut RawType,
}

// Function pointers and library-owned type descriptors are valid from any
// thread; nothing here is ever mutated after resolution.
unsafe impl Send for ForeignLibrary {}
unsafe impl Sync for ForeignLibrary {}

impl ForeignLibrary {
    /// Resolve the binding, preferring symbols already present in the
    /// process image over opening a shared object by name.
    pub(crate) fn load() -> Result<Self, FfiError> {
        if let Some(handle) = open_self() {
            if let Ok(lib) = Self::resolve_all(handle) {
                info!("foreign invocation library resolved from process image");
                return Ok(lib);
            }
        }

        let mut missing: Option<&'static str> = None;
        for &name in CANDIDATES {
            let Some(handle) = open(name) else {
                debug!(candidate = name, "library candidate not loadable");
                continue;
            };
            match Self::resolve_all(handle) {
                Ok(lib) => {
                    info!(library = name, "foreign invocation library resolved");
                    return Ok(lib);
                }
                Err(sym) => {
                    debug!(library = name, symbol = sym, "symbol missing in candidate");
                    missing = Some(sym);
                }
            }
        }

        match missing {
            Some(sym) => Err(FfiError::SymbolMissing(sym)),
            None if CANDIDATES.is_empty() => Err(FfiError::LibraryUnavailable(
                "dynamic loading unsupported on this target".to_string(),
            )),
            None => Err(FfiError::LibraryUnavailable(CANDIDATES.join(", "))),
        }
    }

    fn resolve_all(handle: *mut c_void) -> Result<Self, &'static str> {
        // SAFETY: symbol names match the foreign library's exported
        // signatures; the transmutes only reinterpret resolved addresses.
        unsafe {
            Ok(Self {
                prep: core::mem::transmute::<*mut c_void, PrepFn>(sym(handle, SYM_PREP)?),
                call: core::mem::transmute::<*mut c_void, CallFn>(sym(handle, SYM_CALL)?),
                type_void: sym(handle, SYM_TYPE_VOID)?.cast(),
                type_u8: sym(handle, SYM_TYPE_U8)?.cast(),
                type_i32: sym(handle, SYM_TYPE_I32)?.cast(),
                type_u64: sym(handle, SYM_TYPE_U64)?.cast(),
                type_f32: sym(handle, SYM_TYPE_F32)?.cast(),
                type_pointer: sym(handle, SYM_TYPE_POINTER)?.cast(),
            })
        }
    }

    /// Build a binding from caller-supplied entry points and descriptors.
    ///
    /// Used by tests to count native calls and simulate preparation
    /// outcomes without a real foreign library.
    #[cfg(test)]
    pub(crate) fn from_parts(
        prep: PrepFn,
        call: CallFn,
        types: [*mut RawType; 6],
    ) -> Self {
        let [type_void, type_u8, type_i32, type_u64, type_f32, type_pointer] = types;
        Self {
            prep,
            call,
            type_void,
            type_u8,
            type_i32,
            type_u64,
            type_f32,
            type_pointer,
        }
    }
}

#[cfg(unix)]
fn open_self() -> Option<*mut c_void> {
    use std::os::raw::c_char;

    extern "C" {
        fn dlopen(filename: *const c_char, flag: i32) -> *mut c_void;
    }

    const RTLD_NOW: i32 = 2;

    // Null filename yields a handle to the process image itself.
    let handle = unsafe { dlopen(core::ptr::null(), RTLD_NOW) };
    (!handle.is_null()).then_some(handle)
}

#[cfg(unix)]
fn open(name: &str) -> Option<*mut c_void> {
    use std::ffi::CString;
    use std::os::raw::c_char;

    extern "C" {
        fn dlopen(filename: *const c_char, flag: i32) -> *mut c_void;
    }

    const RTLD_NOW: i32 = 2;

    let cname = CString::new(name).ok()?;
    let handle = unsafe { dlopen(cname.as_ptr(), RTLD_NOW) };
    (!handle.is_null()).then_some(handle)
}

#[cfg(unix)]
fn sym(handle: *mut c_void, name: &'static str) -> Result<*mut c_void, &'static str> {
    use std::ffi::CString;
    use std::os::raw::c_char;

    extern "C" {
        fn dlsym(handle: *mut c_void, symbol: *const c_char) -> *mut c_void;
    }

    let cname = CString::new(name).map_err(|_| name)?;
    let ptr = unsafe { dlsym(handle, cname.as_ptr()) };
    if ptr.is_null() {
        Err(name)
    } else {
        Ok(ptr)
    }
}

#[cfg(windows)]
fn open_self() -> Option<*mut c_void> {
    extern "system" {
        fn GetModuleHandleW(name: *const u16) -> *mut c_void;
    }

    let handle = unsafe { GetModuleHandleW(core::ptr::null()) };
    (!handle.is_null()).then_some(handle)
}

#[cfg(windows)]
fn open(name: &str) -> Option<*mut c_void> {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;

    extern "system" {
        fn LoadLibraryW(filename: *const u16) -> *mut c_void;
    }

    let wide: Vec<u16> = OsStr::new(name).encode_wide().chain(Some(0)).collect();
    let handle = unsafe { LoadLibraryW(wide.as_ptr()) };
    (!handle.is_null()).then_some(handle)
}

#[cfg(windows)]
fn sym(handle: *mut c_void, name: &'static str) -> Result<*mut c_void, &'static str> {
    use std::ffi::CString;

    extern "system" {
        fn GetProcAddress(module: *mut c_void, name: *const u8) -> *mut c_void;
    }

    let cname = CString::new(name).map_err(|_| name)?;
    let ptr = unsafe { GetProcAddress(handle, cname.as_ptr().cast()) };
    if ptr.is_null() {
        Err(name)
    } else {
        Ok(ptr)
    }
}

#[cfg(not(any(unix, windows)))]
fn open_self() -> Option<*mut c_void> {
    None
}

#[cfg(not(any(unix, windows)))]
fn open(_name: &str) -> Option<*mut c_void> {
    None
}

#[cfg(not(any(unix, windows)))]
fn sym(_handle: *mut c_void, name: &'static str) -> Result<*mut c_void, &'static str> {
    Err(name)
}
