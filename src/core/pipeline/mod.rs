//! # Pipeline Module
//!
//! Orchestrates the full stacking workflow.
//!
//! ## Pipeline Stages
//! 1. **Scan** - Discover media files in the given directories
//! 2. **Date** - Resolve each file's capture date (in parallel, via rayon)
//! 3. **Stack** - Feed files in path order into the stack builder and
//!    finalize

mod executor;

pub use executor::{Pipeline, PipelineBuilder, PipelineConfig, PipelineResult};
