//! # photo-stack CLI
//!
//! Command-line interface for the photo stacker.
//!
//! ## Usage
//! ```bash
//! photo-stack scan ~/Pictures/Camera
//! photo-stack scan /Volumes/SD/DCIM --date-range 2023-06,2023-08 --output json
//! ```

mod cli;

use photo_stacker::Result;

fn main() -> Result<()> {
    photo_stacker::init_tracing();
    cli::run()
}
