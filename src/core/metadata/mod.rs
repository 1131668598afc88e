//! # Metadata Module
//!
//! Works out when a file was captured.
//!
//! ## Resolution Order
//! 1. EXIF `DateTimeOriginal`
//! 2. EXIF `DateTime`
//! 3. A date-time embedded in the file name (`IMG_20231014_183246.jpg`,
//!    `2023-10-14 18.32.46.jpg`, `PXL_20230330_184138390.jpg`)
//! 4. The file's modification time
//!
//! EXIF timestamps carry no zone and are read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use exif::{In, Reader, Tag, Value};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::OnceLock;
use std::time::SystemTime;

/// Where a capture date came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    ExifOriginal,
    ExifModified,
    FileName,
    FileModified,
}

impl std::fmt::Display for DateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateSource::ExifOriginal => write!(f, "EXIF DateTimeOriginal"),
            DateSource::ExifModified => write!(f, "EXIF DateTime"),
            DateSource::FileName => write!(f, "file name"),
            DateSource::FileModified => write!(f, "file modification time"),
        }
    }
}

/// Resolved capture date of one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureDate {
    pub taken: DateTime<Utc>,
    pub source: DateSource,
}

/// Date fields read from a file's EXIF block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExifDates {
    pub date_time_original: Option<DateTime<Utc>>,
    pub date_time: Option<DateTime<Utc>>,
}

/// Resolve the capture date of `path`, falling back to `modified`.
pub fn capture_date(path: &Path, modified: SystemTime) -> CaptureDate {
    let exif = read_exif(path);
    if let Some(taken) = exif.date_time_original {
        return CaptureDate {
            taken,
            source: DateSource::ExifOriginal,
        };
    }
    if let Some(taken) = exif.date_time {
        return CaptureDate {
            taken,
            source: DateSource::ExifModified,
        };
    }

    let from_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(date_from_file_name);
    if let Some(taken) = from_name {
        return CaptureDate {
            taken,
            source: DateSource::FileName,
        };
    }

    CaptureDate {
        taken: DateTime::<Utc>::from(modified),
        source: DateSource::FileModified,
    }
}

/// Read the EXIF date fields. Missing or unreadable EXIF yields an empty
/// result.
pub fn read_exif(path: &Path) -> ExifDates {
    let mut dates = ExifDates::default();

    let file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return dates,
    };

    let mut bufreader = BufReader::new(&file);
    let exif_reader = match Reader::new().read_from_container(&mut bufreader) {
        Ok(r) => r,
        Err(e) => {
            tracing::trace!(path = %path.display(), error = %e, "no EXIF block");
            return dates;
        }
    };

    if let Some(field) = exif_reader.get_field(Tag::DateTimeOriginal, In::PRIMARY) {
        dates.date_time_original = get_string_value(&field.value).and_then(|s| parse_exif_date(&s));
    }
    if let Some(field) = exif_reader.get_field(Tag::DateTime, In::PRIMARY) {
        dates.date_time = get_string_value(&field.value).and_then(|s| parse_exif_date(&s));
    }

    dates
}

/// EXIF date format: "YYYY:MM:DD HH:MM:SS"
fn parse_exif_date(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s.trim(), "%Y:%m:%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Extract a date-time embedded in a file name, if any.
pub fn date_from_file_name(name: &str) -> Option<DateTime<Utc>> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(
            r"(?x)
            (?:^|[^0-9])
            ((?:19|20)\d{2}) -? (\d{2}) -? (\d{2})
            [\ _T-]?
            (\d{2}) [.:-]? (\d{2}) [.:-]? (\d{2})
            (?:[^0-9]|$|\d{3}(?:[^0-9]|$))
            ",
        )
        .unwrap()
    });

    let caps = re.captures(name)?;
    let field = |i: usize| caps[i].parse::<u32>().ok();
    let date = NaiveDate::from_ymd_opt(caps[1].parse().ok()?, field(2)?, field(3)?)?;
    let time = date.and_hms_opt(field(4)?, field(5)?, field(6)?)?;
    Some(time.and_utc())
}

/// Helper to extract string from EXIF ASCII value
fn get_string_value(value: &Value) -> Option<String> {
    if let Value::Ascii(ref vec) = value {
        if let Some(bytes) = vec.first() {
            if let Ok(s) = std::str::from_utf8(bytes) {
                let trimmed = s.trim_end_matches('\0').trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
    }
    None
}
