//! Error taxonomy for dispatcher initialization.
//!
//! Only initialization can fail. Once a call descriptor is prepared,
//! individual invocations either succeed or short-circuit to a zero
//! payload for null inputs. Failures are cached for the process lifetime
//! and handed unchanged to every subsequent caller, so the error type is
//! `Clone`.

use crate::payload::Shape;

/// Initialization failure of the foreign-call dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FfiError {
    /// The foreign invocation library could not be located or loaded.
    LibraryUnavailable(String),
    /// A required operation or primitive type descriptor is missing from
    /// the foreign invocation library.
    SymbolMissing(&'static str),
    /// No candidate calling-convention identifier was accepted during
    /// negotiation.
    AbiUnsupported,
    /// Descriptor preparation rejected the negotiated calling convention
    /// for one specific signature.
    CallDescriptorRejected { shape: Shape, abi: u32 },
}

impl core::fmt::Display for FfiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LibraryUnavailable(tried) => {
                write!(f, "foreign invocation library unavailable (tried: {})", tried)
            }
            Self::SymbolMissing(name) => {
                write!(f, "symbol '{}' missing from foreign invocation library", name)
            }
            Self::AbiUnsupported => {
                write!(f, "no calling-convention identifier accepted by this platform")
            }
            Self::CallDescriptorRejected { shape, abi } => {
                write!(
                    f,
                    "calling convention {} rejected for the {} signature",
                    abi, shape
                )
            }
        }
    }
}

impl std::error::Error for FfiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FfiError::SymbolMissing("ffi_prep_cif");
        assert!(err.to_string().contains("ffi_prep_cif"));

        let err = FfiError::CallDescriptorRejected {
            shape: Shape::Analog,
            abi: 2,
        };
        assert!(err.to_string().contains("analog action"));
        assert!(err.to_string().contains('2'));
    }

    #[test]
    fn test_errors_are_cloneable() {
        let err = FfiError::AbiUnsupported;
        assert_eq!(err.clone(), err);
    }
}
