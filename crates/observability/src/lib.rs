//! Shared observability setup for stockbook binaries.

/// Initialize process-wide tracing/logging.
///
/// Idempotent: calling it again is a no-op.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filter, format).
pub mod tracing;
