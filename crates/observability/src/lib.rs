//! Tracing/logging setup shared by the storefront binaries.

/// Initialize process-wide tracing with the format from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Subscriber configuration (filters, output format).
pub mod tracing;
