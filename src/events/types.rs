//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the stacking pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Scanning phase events
    Scan(ScanEvent),
    /// Capture-date phase events
    Dates(DateEvent),
    /// Stacking phase events
    Stack(StackEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events during the scanning phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    Started { paths: Vec<PathBuf> },
    Progress(ScanProgress),
    /// A media file was found
    FileFound { path: PathBuf },
    /// An error occurred but scanning continues
    Error { path: PathBuf, message: String },
    Completed { total_files: usize },
}

/// Progress information during scanning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanProgress {
    pub directories_scanned: usize,
    pub files_found: usize,
    /// Directory currently being walked
    pub current_path: PathBuf,
}

/// Events while resolving capture dates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DateEvent {
    Started { total_files: usize },
    Progress { completed: usize, total: usize },
    Completed {
        from_exif: usize,
        from_file_name: usize,
        from_modified_time: usize,
    },
}

/// Events during the stacking phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StackEvent {
    Started { total_assets: usize },
    /// Asset dropped because its capture date is outside the range
    Rejected { path: PathBuf },
    Completed {
        total_stacks: usize,
        stacked_files: usize,
    },
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    Started,
    PhaseChanged { phase: PipelinePhase },
    Completed { summary: PipelineSummary },
}

/// Phases of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Scanning,
    ReadingDates,
    Stacking,
}

/// Summary of pipeline results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub total_files: usize,
    /// Files that passed the date filter
    pub accepted: usize,
    pub rejected_by_date: usize,
    pub stacks: usize,
    /// Files that are part of a stack, covers included
    pub stacked_files: usize,
    pub duration_ms: u64,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::Scanning => write!(f, "Scanning"),
            PipelinePhase::ReadingDates => write!(f, "Reading capture dates"),
            PipelinePhase::Stacking => write!(f, "Stacking"),
        }
    }
}
