//! Decides which discovered files the stacker looks at.

use crate::core::media::{ExtensionClassifier, MediaClassifier, MediaType};
use std::path::Path;
use std::sync::Arc;

/// Accepts files the classifier recognises as image or video
pub struct MediaFilter {
    classifier: Arc<dyn MediaClassifier>,
    include_hidden: bool,
}

impl MediaFilter {
    /// Create a filter backed by the built-in extension table
    pub fn new() -> Self {
        Self {
            classifier: Arc::new(ExtensionClassifier::new()),
            include_hidden: false,
        }
    }

    /// Include hidden files (starting with .)
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Classify with a custom classifier
    pub fn with_classifier(mut self, classifier: Arc<dyn MediaClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Check if a file should be included
    pub fn should_include(&self, path: &Path) -> bool {
        if !self.include_hidden && is_hidden(path) {
            return false;
        }
        self.media_type(path).is_media()
    }

    pub fn media_type(&self, path: &Path) -> MediaType {
        self.classifier.type_of_path(path)
    }
}

impl Default for MediaFilter {
    fn default() -> Self {
        Self::new()
    }
}

pub(super) fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_stills_raws_and_videos() {
        let filter = MediaFilter::new();
        assert!(filter.should_include(Path::new("/photos/image.JPG")));
        assert!(filter.should_include(Path::new("/photos/image.dng")));
        assert!(filter.should_include(Path::new("/photos/IMG_1234.MOV")));
    }

    #[test]
    fn excludes_non_media() {
        let filter = MediaFilter::new();
        assert!(!filter.should_include(Path::new("/photos/document.pdf")));
        assert!(!filter.should_include(Path::new("/photos/IMG_1234.xmp")));
        assert!(!filter.should_include(Path::new("/photos/no_extension")));
    }

    #[test]
    fn excludes_hidden_by_default() {
        let filter = MediaFilter::new();
        assert!(!filter.should_include(Path::new("/photos/.hidden.jpg")));
        assert!(MediaFilter::new()
            .with_hidden(true)
            .should_include(Path::new("/photos/.hidden.jpg")));
    }

    #[test]
    fn reports_media_type() {
        let filter = MediaFilter::new();
        assert_eq!(filter.media_type(Path::new("a.mp4")), MediaType::Video);
        assert_eq!(filter.media_type(Path::new("a.heic")), MediaType::Image);
    }

    #[test]
    fn custom_classifier_is_used() {
        let classifier = ExtensionClassifier::new().with_video_extensions(Vec::new());
        let filter = MediaFilter::new().with_classifier(Arc::new(classifier));
        assert!(!filter.should_include(Path::new("clip.mov")));
    }
}
