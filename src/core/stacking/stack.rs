//! Stack data type and the per-asset fold that grows it.

use super::matchers::{extension_of, NameClass};
use crate::core::media::is_jpeg_extension;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why a group of files was stacked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackKind {
    /// Same shot saved in several formats (RAW + JPEG, motion photo sidecar)
    RawJpegPair,
    /// Frames of a camera burst
    Burst,
}

impl std::fmt::Display for StackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StackKind::RawJpegPair => write!(f, "RAW/JPEG"),
            StackKind::Burst => write!(f, "Burst"),
        }
    }
}

/// A group of assets shown as one item with a single cover
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    /// Asset shown for the whole group
    pub cover_id: String,
    pub kind: StackKind,
    /// Asset ids in insertion order. Includes the cover until finalized.
    pub member_ids: Vec<String>,
    /// Capture time of the first asset inserted
    pub date: DateTime<Utc>,
    /// File names in insertion order, one per inserted asset (cover included)
    pub file_names: Vec<String>,
}

impl Stack {
    /// Members other than the cover
    pub fn non_cover_count(&self) -> usize {
        self.member_ids.iter().filter(|id| **id != self.cover_id).count()
    }
}

/// One asset as the accumulator sees it
#[derive(Debug, Clone, Copy)]
pub struct AssetRef<'a> {
    pub id: &'a str,
    pub file_name: &'a str,
    pub captured: &'a DateTime<Utc>,
}

/// Fold one asset into the stack for its key.
///
/// Order matters: the last asset satisfying the strongest cover rule wins,
/// and a single burst frame turns the whole stack into a burst.
pub fn fold(stack: Option<Stack>, asset: AssetRef<'_>, class: &NameClass) -> Stack {
    let mut stack = stack.unwrap_or_else(|| Stack {
        cover_id: asset.id.to_string(),
        kind: StackKind::RawJpegPair,
        member_ids: Vec::new(),
        date: *asset.captured,
        file_names: Vec::new(),
    });

    stack.member_ids.push(asset.id.to_string());
    stack.file_names.push(asset.file_name.to_string());

    if class.is_burst {
        stack.kind = StackKind::Burst;
    }

    if class.is_cover {
        stack.cover_id = asset.id.to_string();
    } else if !class.is_burst && is_jpeg_extension(extension_of(asset.file_name)) {
        stack.cover_id = asset.id.to_string();
    }

    stack
}
