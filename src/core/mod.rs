//! # Core Module
//!
//! The front-end-agnostic stacking engine.
//!
//! ## Modules
//! - `stacking` - Burst matchers, grouping keys, stack building
//! - `media` - Image / video classification by extension
//! - `dates` - Capture-date acceptance ranges
//! - `scanner` - Discovers media files in directories
//! - `metadata` - Resolves capture dates (EXIF, file name, mtime)
//! - `pipeline` - Orchestrates the full workflow

pub mod dates;
pub mod media;
pub mod metadata;
pub mod pipeline;
pub mod scanner;
pub mod stacking;

// Re-export commonly used types
pub use dates::{DateFilter, DateRange};
pub use media::{ExtensionClassifier, MediaClassifier, MediaType};
pub use metadata::{CaptureDate, DateSource};
pub use scanner::MediaFile;
pub use stacking::{Stack, StackBuilder, StackKind};
