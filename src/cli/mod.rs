//! # CLI Module
//!
//! Command-line interface for the photo stacker.
//!
//! ## Usage
//! ```bash
//! # Find stacks in a camera folder
//! photo-stack scan ~/Pictures/Camera
//!
//! # Only files captured in summer 2023
//! photo-stack scan ~/Pictures --date-range 2023-06,2023-08
//!
//! # JSON output
//! photo-stack scan ~/Pictures --output json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photo_stacker::core::dates::DateRange;
use photo_stacker::core::media::ExtensionClassifier;
use photo_stacker::core::pipeline::{Pipeline, PipelineResult};
use photo_stacker::core::scanner::ScanConfig;
use photo_stacker::core::stacking::{extension_of, Stack};
use photo_stacker::error::{Result, StackerError};
use photo_stacker::events::{DateEvent, Event, EventChannel, PipelineEvent, ScanEvent};
use std::path::{Path, PathBuf};
use std::thread;

/// Photo Stacker - one cover per burst or RAW+JPEG pair
#[derive(Parser, Debug)]
#[command(name = "photo-stack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan directories and list the stacks found
    Scan {
        /// Directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Capture dates to accept: YYYY, YYYY-MM, YYYY-MM-DD or FROM,TO
        #[arg(short, long)]
        date_range: Option<DateRange>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,

        /// Follow symbolic links
        #[arg(long)]
        follow_symlinks: bool,

        /// Maximum directory depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// One tab-separated line per stack, cover first
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            paths,
            date_range,
            output,
            include_hidden,
            follow_symlinks,
            max_depth,
            verbose,
        } => {
            let scan_config = ScanConfig {
                follow_symlinks,
                include_hidden,
                max_depth,
            };
            run_scan(paths, date_range.unwrap_or_default(), scan_config, output, verbose)
        }
    }
}

fn run_scan(
    paths: Vec<PathBuf>,
    date_range: DateRange,
    scan_config: ScanConfig,
    output: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let term = Term::stderr();

    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Photo Stacker").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        if !date_range.is_unbounded() {
            term.write_line(&format!("  capture dates: {}", style(date_range).dim()))
                .ok();
        }
        term.write_line("").ok();
    }

    let pipeline = Pipeline::builder()
        .paths(paths)
        .date_range(date_range)
        .scan_config(scan_config)
        .build();

    let (sender, receiver) = EventChannel::new();

    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new(0);
        if let Ok(bar_style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(bar_style.progress_chars("█▓░"));
        }
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = progress_clone else {
                continue;
            };
            match event {
                Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
                    pb.set_message(format!("{}", phase));
                }
                Event::Scan(ScanEvent::Completed { total_files }) => {
                    pb.set_length(total_files as u64);
                }
                Event::Dates(DateEvent::Progress { completed, .. }) => {
                    pb.set_position(completed as u64);
                }
                Event::Pipeline(PipelineEvent::Completed { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let result = pipeline.run_with_events(&sender)?;

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    match output {
        OutputFormat::Pretty => print_pretty_results(&term, &result, verbose),
        OutputFormat::Json => print_json_results(&result)?,
        OutputFormat::Minimal => print_minimal_results(&result),
    }

    Ok(())
}

fn print_pretty_results(term: &Term, result: &PipelineResult, verbose: bool) {
    term.write_line(&format!("{} Scan Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} media files scanned in {:.1}s",
        style(result.total_files).cyan(),
        result.duration_ms as f64 / 1000.0
    ))
    .ok();
    if result.rejected_by_date > 0 {
        term.write_line(&format!(
            "  {} outside the date range",
            style(result.rejected_by_date).yellow()
        ))
        .ok();
    }
    term.write_line(&format!(
        "  {} stacks covering {} files",
        style(result.stacks.len()).cyan(),
        style(result.stacked_files()).cyan()
    ))
    .ok();

    if verbose {
        for error in &result.errors {
            term.write_line(&format!("  {} {}", style("!").red(), error))
                .ok();
        }
    }

    term.write_line("").ok();

    if result.stacks.is_empty() {
        term.write_line("  No stacks found.").ok();
        return;
    }

    let classifier = ExtensionClassifier::new();
    for (i, stack) in result.stacks.iter().enumerate() {
        term.write_line(&format!(
            "  {} {} ({} files, {})",
            style(format!("Stack {}:", i + 1)).bold(),
            style(stack.kind).yellow(),
            stack.non_cover_count() + 1,
            stack.date.format("%Y-%m-%d %H:%M")
        ))
        .ok();

        term.write_line(&format!(
            "    {} {}",
            style("★").green(),
            display_path(&stack.cover_id)
        ))
        .ok();
        for member in &stack.member_ids {
            let mut line = format!("    {} {}", style("○").dim(), display_path(member));
            if let Some(tag) = raw_tag(&classifier, member) {
                line.push_str(&format!(" {}", style(tag).dim()));
            }
            term.write_line(&line).ok();
        }
        term.write_line("").ok();
    }
}

fn print_json_results(result: &PipelineResult) -> Result<()> {
    let output = serde_json::json!({
        "total_files": result.total_files,
        "accepted": result.accepted,
        "rejected_by_date": result.rejected_by_date,
        "stack_count": result.stacks.len(),
        "stacked_files": result.stacked_files(),
        "duration_ms": result.duration_ms,
        "errors": result.errors,
        "stacks": result.stacks,
    });

    let text = serde_json::to_string_pretty(&output)
        .map_err(|e| StackerError::Output(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn print_minimal_results(result: &PipelineResult) {
    for stack in &result.stacks {
        println!("{}", minimal_line(stack));
    }
}

fn minimal_line(stack: &Stack) -> String {
    std::iter::once(stack.cover_id.as_str())
        .chain(stack.member_ids.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("\t")
}

/// `[RAW]` label for camera RAW members
fn raw_tag(classifier: &ExtensionClassifier, id: &str) -> Option<&'static str> {
    let name = Path::new(id)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(id);
    classifier.is_raw(extension_of(name)).then_some("[RAW]")
}

/// Shorten paths under the home directory to `~/...`
fn display_path(id: &str) -> String {
    let path = Path::new(id);
    match dirs::home_dir().and_then(|home| path.strip_prefix(home).ok().map(Path::to_path_buf)) {
        Some(relative) => format!("~/{}", relative.display()),
        None => id.to_string(),
    }
}
