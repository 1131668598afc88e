//! Accumulates assets into stacks and finalizes them.

use super::key::GroupingKey;
use super::matchers::{classify_name, extension_of, BurstMatcher, DEFAULT_MATCHERS};
use super::stack::{fold, AssetRef, Stack};
use crate::core::dates::{DateFilter, DateRange};
use crate::core::media::{ExtensionClassifier, MediaClassifier, MediaType};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::Path;

/// Groups assets by [`GroupingKey`] as they are inserted.
///
/// Insert every asset, then call [`StackBuilder::finalize`]. Not meant to
/// be shared between threads while inserting.
pub struct StackBuilder {
    stacks: BTreeMap<GroupingKey, Stack>,
    date_filter: Box<dyn DateFilter>,
    classifier: Box<dyn MediaClassifier>,
    matchers: Vec<&'static dyn BurstMatcher>,
    rejected: usize,
}

impl StackBuilder {
    /// Unbounded date range, built-in media table, all burst matchers
    pub fn new() -> Self {
        Self {
            stacks: BTreeMap::new(),
            date_filter: Box::new(DateRange::unbounded()),
            classifier: Box::new(ExtensionClassifier::new()),
            matchers: DEFAULT_MATCHERS.to_vec(),
            rejected: 0,
        }
    }

    /// Only accept assets captured within `filter`
    pub fn with_date_filter(mut self, filter: Box<dyn DateFilter>) -> Self {
        self.date_filter = filter;
        self
    }

    /// Use a custom media classifier for live-photo detection
    pub fn with_classifier(mut self, classifier: Box<dyn MediaClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Replace the burst matcher chain (tried in the given order)
    pub fn with_matchers(mut self, matchers: Vec<&'static dyn BurstMatcher>) -> Self {
        self.matchers = matchers;
        self
    }

    /// Add one asset. `file_name` may carry a directory; only the last
    /// component is used.
    pub fn insert(&mut self, id: &str, file_name: &str, captured: DateTime<Utc>) {
        if !self.date_filter.in_range(&captured) {
            tracing::debug!(id, file_name, %captured, "capture date out of range, skipping");
            self.rejected += 1;
            return;
        }

        let name = Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(file_name);

        let class = classify_name(name, &self.matchers);
        let key = GroupingKey::new(class.base.clone(), &captured);

        let existing = self.stacks.remove(&key);
        if existing.is_none() {
            tracing::trace!(base = %key.base, minute = %key.minute, "new stack key");
        }
        let previous_cover = existing.as_ref().map(|s| s.cover_id.clone());

        let stack = fold(
            existing,
            AssetRef {
                id,
                file_name: name,
                captured: &captured,
            },
            &class,
        );

        if previous_cover.is_some_and(|prev| prev != stack.cover_id) {
            tracing::trace!(base = %key.base, cover = %stack.cover_id, "cover reassigned");
        }

        self.stacks.insert(key, stack);
    }

    /// Number of assets dropped by the date filter
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Number of distinct keys seen so far, singletons included
    pub fn pending_groups(&self) -> usize {
        self.stacks.len()
    }

    /// Produce the final stacks.
    ///
    /// Drops single-member groups and live photos (exactly one image and
    /// one video), removes the cover from `member_ids` and sorts by date,
    /// then by first file name. `file_names` keeps every inserted name,
    /// cover included, so it is not aligned with `member_ids` afterwards.
    /// The accumulated state is left untouched.
    pub fn finalize(&self) -> Vec<Stack> {
        let mut result: Vec<Stack> = self
            .stacks
            .iter()
            .filter(|(_, stack)| stack.member_ids.len() > 1)
            .filter(|(key, stack)| {
                if self.is_live_photo(stack) {
                    tracing::debug!(base = %key.base, "dropping live photo pair");
                    false
                } else {
                    true
                }
            })
            .map(|(_, stack)| {
                let mut stack = stack.clone();
                let cover = stack.cover_id.clone();
                stack.member_ids.retain(|id| *id != cover);
                stack
            })
            .collect();

        result.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.file_names.first().cmp(&b.file_names.first()))
        });

        tracing::debug!(
            groups = self.stacks.len(),
            stacks = result.len(),
            "finalized stacks"
        );

        result
    }

    fn is_live_photo(&self, stack: &Stack) -> bool {
        let (mut images, mut videos) = (0usize, 0usize);
        for name in &stack.file_names {
            match self.classifier.type_from_extension(extension_of(name)) {
                MediaType::Image => images += 1,
                MediaType::Video => videos += 1,
                MediaType::Other => {}
            }
        }
        images == 1 && videos == 1
    }
}

impl Default for StackBuilder {
    fn default() -> Self {
        Self::new()
    }
}
