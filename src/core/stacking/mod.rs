//! # Stacking Module
//!
//! Groups files that represent one logical shot into stacks.
//!
//! ## How It Works
//! 1. Each file name runs through the burst matchers (first match wins):
//!    Nexus, Huawei, Pixel, Samsung
//! 2. Unmatched names fall back to their stem, minus any `.MP` marker
//! 3. Stem + capture time rounded to the nearest minute form the key
//! 4. Files sharing a key are folded into one [`Stack`]
//! 5. [`StackBuilder::finalize`] drops singletons and live photos, strips
//!    the cover from the member list and sorts the result
//!
//! ## Cover Selection
//! | Condition                          | Effect                  |
//! |------------------------------------|-------------------------|
//! | burst name marked as cover         | becomes the cover       |
//! | not a burst frame, JPEG extension  | becomes the cover       |
//! | anything else                      | cover unchanged         |
//!
//! ## Example
//! ```rust
//! use photo_stacker::core::stacking::StackBuilder;
//! use chrono::{TimeZone, Utc};
//!
//! let t = Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap();
//! let mut builder = StackBuilder::new();
//! builder.insert("1", "photo.dng", t);
//! builder.insert("2", "photo.jpg", t);
//!
//! let stacks = builder.finalize();
//! assert_eq!(stacks[0].cover_id, "2");
//! ```

mod builder;
mod key;
mod matchers;
mod stack;

pub use builder::StackBuilder;
pub use key::{round_to_minute, GroupingKey};
pub use matchers::{
    classify_name, extension_of, strip_extension, BurstMatch, BurstMatcher, HuaweiBurst,
    NameClass, NexusBurst, PixelBurst, SamsungBurst, DEFAULT_MATCHERS,
};
pub use stack::{fold, AssetRef, Stack, StackKind};
