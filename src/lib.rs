//! # Photo Stacker
//!
//! Groups files that belong to one logical shot (burst frames, RAW+JPEG
//! pairs, motion-photo sidecars) into stacks with a single cover, so a
//! catalog can show one item instead of a pile of near-duplicates.
//!
//! ## Architecture
//! - `core` - The stacking engine and the scanning / dating layers around it
//! - `events` - Channel-based progress reporting
//! - `error` - Error types
//!
//! Nothing here moves, renames or deletes files.

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{Result, StackerError};

/// Initialize tracing for the library
///
/// Logs go to stderr and are filtered by `RUST_LOG`. Called by the CLI;
/// calling it again is a no-op.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
