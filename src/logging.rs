//! Logging utilities for the dispatcher.
//!
//! Uses `tracing` for structured logging with minimal overhead. Native
//! call paths never log on the per-invocation hot path; only the
//! once-per-process initialization steps (library resolution, convention
//! negotiation, descriptor preparation) emit events.

// Re-export tracing macros for use throughout the crate
pub use tracing::{debug, error, info, trace, warn};

/// Initialize logging with sensible defaults.
///
/// Call once early in the host process. Honors `RUST_LOG`; without it,
/// debug builds log at DEBUG and release builds at INFO for this crate.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        #[cfg(debug_assertions)]
        {
            EnvFilter::new("structcall=debug")
        }
        #[cfg(not(debug_assertions))]
        {
            EnvFilter::new("structcall=info")
        }
    });

    fmt()
        .with_env_filter(filter)
        .compact()
        .try_init()
        .ok(); // Ignore error if already initialized
}
