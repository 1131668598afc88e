//! # Media Module
//!
//! Classifies files as image, video or other from their extension.
//!
//! The stacking finalizer consults a [`MediaClassifier`] to recognise live
//! photos (one still plus one short clip). The scanner uses the same
//! classifier to decide which files are worth looking at.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Broad media category of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Image,
    Video,
    Other,
}

impl MediaType {
    /// Whether the stacker should consider files of this type at all
    pub fn is_media(&self) -> bool {
        !matches!(self, MediaType::Other)
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Image => write!(f, "image"),
            MediaType::Video => write!(f, "video"),
            MediaType::Other => write!(f, "other"),
        }
    }
}

/// Maps a file extension to a media type.
///
/// Implement this to plug in a different notion of "image" and "video",
/// e.g. one backed by a server's list of supported formats.
pub trait MediaClassifier: Send + Sync {
    /// Classify an extension. Implementations should accept it with or
    /// without the leading dot and ignore case.
    fn type_from_extension(&self, ext: &str) -> MediaType;

    /// Classify a path by its extension
    fn type_of_path(&self, path: &Path) -> MediaType {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.type_from_extension(e))
            .unwrap_or(MediaType::Other)
    }
}

impl<C: MediaClassifier + ?Sized> MediaClassifier for Arc<C> {
    fn type_from_extension(&self, ext: &str) -> MediaType {
        (**self).type_from_extension(ext)
    }
}

const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg", "jpe"];

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "jpe", "png", "webp", "heic", "heif", "avif", "gif", "bmp", "tif", "tiff",
];

const RAW_EXTENSIONS: &[&str] = &[
    "dng", "cr2", "cr3", "crw", "nef", "nrw", "arw", "srf", "sr2", "orf", "raf", "rw2", "pef",
    "srw", "x3f", "3fr", "iiq", "raw", "rwl", "erf", "mrw",
];

const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "mov", "avi", "mkv", "webm", "3gp", "mts", "m2ts", "mpg", "mpeg", "wmv",
];

fn normalize(ext: &str) -> String {
    ext.trim_start_matches('.').to_ascii_lowercase()
}

/// Whether an extension belongs to the JPEG family (`jpg`, `jpeg`, `jpe`)
pub fn is_jpeg_extension(ext: &str) -> bool {
    JPEG_EXTENSIONS.contains(&normalize(ext).as_str())
}

/// Extension-table classifier covering common still, RAW and video formats
#[derive(Debug, Clone)]
pub struct ExtensionClassifier {
    images: HashSet<String>,
    raws: HashSet<String>,
    videos: HashSet<String>,
}

impl ExtensionClassifier {
    /// Create a classifier with the built-in extension tables
    pub fn new() -> Self {
        let owned = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<HashSet<_>>();
        Self {
            images: owned(IMAGE_EXTENSIONS),
            raws: owned(RAW_EXTENSIONS),
            videos: owned(VIDEO_EXTENSIONS),
        }
    }

    /// Replace the still-image extensions (RAW extensions are kept)
    pub fn with_image_extensions(mut self, extensions: Vec<String>) -> Self {
        self.images = extensions.iter().map(|e| normalize(e)).collect();
        self
    }

    /// Replace the video extensions
    pub fn with_video_extensions(mut self, extensions: Vec<String>) -> Self {
        self.videos = extensions.iter().map(|e| normalize(e)).collect();
        self
    }

    /// Whether the extension is a camera RAW format
    pub fn is_raw(&self, ext: &str) -> bool {
        self.raws.contains(&normalize(ext))
    }
}

impl Default for ExtensionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaClassifier for ExtensionClassifier {
    fn type_from_extension(&self, ext: &str) -> MediaType {
        let ext = normalize(ext);
        if self.images.contains(&ext) || self.raws.contains(&ext) {
            MediaType::Image
        } else if self.videos.contains(&ext) {
            MediaType::Video
        } else {
            MediaType::Other
        }
    }
}
