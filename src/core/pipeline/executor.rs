//! Pipeline execution implementation.

use crate::core::dates::DateRange;
use crate::core::media::{ExtensionClassifier, MediaClassifier};
use crate::core::metadata::{capture_date, CaptureDate, DateSource};
use crate::core::scanner::{MediaFile, MediaScanner, ScanConfig, WalkDirScanner};
use crate::core::stacking::{Stack, StackBuilder};
use crate::error::StackerError;
use crate::events::{
    null_sender, DateEvent, Event, EventSender, PipelineEvent, PipelinePhase, PipelineSummary,
    StackEvent,
};
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Result of pipeline execution
#[derive(Debug)]
pub struct PipelineResult {
    /// Final stacks, ordered by date then first file name
    pub stacks: Vec<Stack>,
    /// Media files discovered
    pub total_files: usize,
    /// Files that passed the date filter
    pub accepted: usize,
    pub rejected_by_date: usize,
    /// Non-fatal errors, already formatted for display
    pub errors: Vec<String>,
    pub duration_ms: u64,
}

impl PipelineResult {
    /// Files that ended up in a stack, covers included
    pub fn stacked_files(&self) -> usize {
        self.stacks.iter().map(|s| s.non_cover_count() + 1).sum()
    }
}

/// Configuration for the pipeline
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Directories to scan
    pub paths: Vec<PathBuf>,
    /// Accepted capture dates
    pub date_range: DateRange,
    pub scan_config: ScanConfig,
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    config: PipelineConfig,
    classifier: Option<Arc<dyn MediaClassifier>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            classifier: None,
        }
    }

    /// Add directories to scan
    pub fn paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.config.paths = paths;
        self
    }

    /// Only stack files captured within `range`
    pub fn date_range(mut self, range: DateRange) -> Self {
        self.config.date_range = range;
        self
    }

    /// Set scanner configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.config.scan_config = config;
        self
    }

    /// Include hidden files
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.config.scan_config.include_hidden = include;
        self
    }

    /// Media classifier used both for scanning and live-photo detection
    pub fn classifier(mut self, classifier: Arc<dyn MediaClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            config: self.config,
            classifier: self
                .classifier
                .unwrap_or_else(|| Arc::new(ExtensionClassifier::new())),
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan, date and stack a set of directories
pub struct Pipeline {
    config: PipelineConfig,
    classifier: Arc<dyn MediaClassifier>,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline without events
    pub fn run(&self) -> Result<PipelineResult, StackerError> {
        self.run_with_events(&null_sender())
    }

    /// Run the pipeline with event reporting
    pub fn run_with_events(&self, events: &EventSender) -> Result<PipelineResult, StackerError> {
        let start_time = Instant::now();
        let mut errors = Vec::new();

        events.send(Event::Pipeline(PipelineEvent::Started));

        // Phase 1: Scanning
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Scanning,
        }));

        let scanner = WalkDirScanner::new(self.config.scan_config.clone())
            .with_classifier(Arc::clone(&self.classifier));
        let scan_result = scanner.scan_with_events(&self.config.paths, events)?;
        errors.extend(scan_result.errors.iter().map(|e| e.to_string()));

        let mut files = scan_result.files;
        let total_files = files.len();
        tracing::info!(files = total_files, "scan complete");

        // Phase 2: Capture dates
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::ReadingDates,
        }));
        events.send(Event::Dates(DateEvent::Started { total_files }));

        files.sort_by(|a, b| a.path.cmp(&b.path));
        let dated = resolve_dates(&files, events);

        // Phase 3: Stacking. Sequential, in path order.
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Stacking,
        }));
        events.send(Event::Stack(StackEvent::Started {
            total_assets: dated.len(),
        }));

        let mut builder = StackBuilder::new()
            .with_date_filter(Box::new(self.config.date_range))
            .with_classifier(Box::new(Arc::clone(&self.classifier)));

        for (file, date) in &dated {
            let rejected_before = builder.rejected();
            let id = file.path.to_string_lossy();
            builder.insert(&id, &file.file_name(), date.taken);
            if builder.rejected() > rejected_before {
                events.send(Event::Stack(StackEvent::Rejected {
                    path: file.path.clone(),
                }));
            }
        }

        let rejected_by_date = builder.rejected();
        tracing::debug!(
            groups = builder.pending_groups(),
            rejected = rejected_by_date,
            "finalizing stacks"
        );
        let stacks = builder.finalize();
        let duration_ms = start_time.elapsed().as_millis() as u64;

        let result = PipelineResult {
            stacks,
            total_files,
            accepted: total_files - rejected_by_date,
            rejected_by_date,
            errors,
            duration_ms,
        };

        tracing::info!(
            stacks = result.stacks.len(),
            rejected = rejected_by_date,
            duration_ms,
            "stacking complete"
        );

        events.send(Event::Stack(StackEvent::Completed {
            total_stacks: result.stacks.len(),
            stacked_files: result.stacked_files(),
        }));
        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: PipelineSummary {
                total_files,
                accepted: result.accepted,
                rejected_by_date,
                stacks: result.stacks.len(),
                stacked_files: result.stacked_files(),
                duration_ms,
            },
        }));

        Ok(result)
    }
}

/// Read capture dates in parallel, keeping the input order
fn resolve_dates<'a>(
    files: &'a [MediaFile],
    events: &EventSender,
) -> Vec<(&'a MediaFile, CaptureDate)> {
    let total = files.len();
    let completed = AtomicUsize::new(0);

    let dated: Vec<(&MediaFile, CaptureDate)> = files
        .par_iter()
        .map(|file| {
            let date = capture_date(&file.path, file.modified);
            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
            events.send(Event::Dates(DateEvent::Progress {
                completed: done,
                total,
            }));
            (file, date)
        })
        .collect();

    let count = |wanted: &[DateSource]| {
        dated
            .iter()
            .filter(|(_, d)| wanted.contains(&d.source))
            .count()
    };
    events.send(Event::Dates(DateEvent::Completed {
        from_exif: count(&[DateSource::ExifOriginal, DateSource::ExifModified]),
        from_file_name: count(&[DateSource::FileName]),
        from_modified_time: count(&[DateSource::FileModified]),
    }));

    dated
}
