//! Process-wide tracing/logging setup.

pub mod tracing;

pub use crate::tracing::LogFormat;

/// Initialize tracing with `RUST_LOG` filtering and the given output format.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}
