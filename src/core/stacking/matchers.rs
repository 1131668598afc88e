//! Manufacturer burst-naming conventions.
//!
//! Each matcher looks at a bare file name and either declines or returns the
//! stem shared by every frame of the burst plus whether this frame is the
//! one the camera marked as cover.

use regex::Regex;
use std::sync::OnceLock;

/// Outcome of running a matcher against a file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BurstMatch {
    NoMatch,
    Match { base: String, is_cover: bool },
}

impl BurstMatch {
    pub fn is_match(&self) -> bool {
        matches!(self, BurstMatch::Match { .. })
    }
}

/// A single burst-naming convention
pub trait BurstMatcher: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Try to recognise `file_name` (no directory component)
    fn match_name(&self, file_name: &str) -> BurstMatch;
}

macro_rules! cached_regex {
    ($pattern:expr) => {{
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new($pattern).unwrap())
    }};
}

/// Nexus and older stock-Android bursts:
/// `00001IMG_00001_BURST20171111030039_COVER.jpg`
#[derive(Debug, Clone, Copy, Default)]
pub struct NexusBurst;

impl BurstMatcher for NexusBurst {
    fn name(&self) -> &'static str {
        "nexus"
    }

    fn match_name(&self, file_name: &str) -> BurstMatch {
        let re = cached_regex!(r"^\d{5}IMG_\d{5}_(BURST\d{14})(_COVER)?\..+$");
        match re.captures(file_name) {
            Some(caps) => BurstMatch::Match {
                base: caps[1].to_string(),
                is_cover: caps.get(2).is_some(),
            },
            None => BurstMatch::NoMatch,
        }
    }
}

/// Huawei bursts: `IMG_20231014_183246_BURST001_COVER.jpg`
#[derive(Debug, Clone, Copy, Default)]
pub struct HuaweiBurst;

impl BurstMatcher for HuaweiBurst {
    fn name(&self) -> &'static str {
        "huawei"
    }

    fn match_name(&self, file_name: &str) -> BurstMatch {
        let re = cached_regex!(r"^(.*)_BURST\d+(_COVER)?\..+$");
        match re.captures(file_name) {
            Some(caps) => BurstMatch::Match {
                base: caps[1].to_string(),
                is_cover: caps.get(2).is_some(),
            },
            None => BurstMatch::NoMatch,
        }
    }
}

/// Pixel bursts: `PXL_20230330_184138390.RAW-01.MP.COVER.jpg`
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelBurst;

impl BurstMatcher for PixelBurst {
    fn name(&self) -> &'static str {
        "pixel"
    }

    fn match_name(&self, file_name: &str) -> BurstMatch {
        let re = cached_regex!(r"^(.*)\.RAW-\d+(\.MP)?(\.COVER)?\..+$");
        match re.captures(file_name) {
            Some(caps) => BurstMatch::Match {
                base: caps[1].to_string(),
                is_cover: caps.get(3).is_some(),
            },
            None => BurstMatch::NoMatch,
        }
    }
}

/// Samsung bursts: `20231207_101605_001.jpg`, `002`, ... The first frame
/// of the sequence is the cover.
#[derive(Debug, Clone, Copy, Default)]
pub struct SamsungBurst;

impl BurstMatcher for SamsungBurst {
    fn name(&self) -> &'static str {
        "samsung"
    }

    fn match_name(&self, file_name: &str) -> BurstMatch {
        let re = cached_regex!(r"(\d{8}_\d{6})_(\d{3})\.[^.]{3}$");
        match re.captures(file_name) {
            Some(caps) => BurstMatch::Match {
                base: caps[1].to_string(),
                is_cover: &caps[2] == "001",
            },
            None => BurstMatch::NoMatch,
        }
    }
}

/// Matchers in priority order. The first one that fires wins.
pub static DEFAULT_MATCHERS: [&dyn BurstMatcher; 4] =
    [&NexusBurst, &HuaweiBurst, &PixelBurst, &SamsungBurst];

/// How a file name relates to its stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameClass {
    /// Normalized stem used in the grouping key
    pub base: String,
    /// Whether a burst convention recognised the name
    pub is_burst: bool,
    /// Whether the name marks the burst cover
    pub is_cover: bool,
}

/// Run the matcher chain over `file_name` and fall back to plain stem
/// extraction when nothing fires.
///
/// The fallback strips the extension and then a trailing `.MP` motion-photo
/// marker, so `PXL_1.MP.jpg` pairs with `PXL_1.dng`. The marker is matched
/// exactly as cameras write it; `clip.mp.jpg` keeps the base `clip.mp`.
pub fn classify_name(file_name: &str, matchers: &[&dyn BurstMatcher]) -> NameClass {
    for matcher in matchers {
        if let BurstMatch::Match { base, is_cover } = matcher.match_name(file_name) {
            tracing::trace!(matcher = matcher.name(), file_name, %base, is_cover, "burst match");
            return NameClass {
                base,
                is_burst: true,
                is_cover,
            };
        }
    }

    let stem = strip_extension(file_name);
    let base = stem.strip_suffix(".MP").unwrap_or(stem);

    NameClass {
        base: base.to_string(),
        is_burst: false,
        is_cover: false,
    }
}

/// Everything before the last `.`; a leading dot does not start an extension
pub fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    }
}

/// Everything after the last `.`, or "" when there is none
pub fn extension_of(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[idx + 1..],
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(base: &str, is_cover: bool) -> BurstMatch {
        BurstMatch::Match {
            base: base.to_string(),
            is_cover,
        }
    }

    #[test]
    fn nexus_extracts_burst_stem() {
        assert_eq!(
            NexusBurst.match_name("00001IMG_00001_BURST20171111030039.jpg"),
            matched("BURST20171111030039", false)
        );
        assert_eq!(
            NexusBurst.match_name("00015IMG_00015_BURST20171111030039_COVER.jpg"),
            matched("BURST20171111030039", true)
        );
    }

    #[test]
    fn nexus_needs_exact_digit_counts() {
        assert_eq!(
            NexusBurst.match_name("0001IMG_00001_BURST20171111030039.jpg"),
            BurstMatch::NoMatch
        );
        assert_eq!(
            NexusBurst.match_name("00001IMG_00001_BURST2017111103003.jpg"),
            BurstMatch::NoMatch
        );
    }

    #[test]
    fn huawei_extracts_prefix() {
        assert_eq!(
            HuaweiBurst.match_name("IMG_20231014_183246_BURST001_COVER.jpg"),
            matched("IMG_20231014_183246", true)
        );
        assert_eq!(
            HuaweiBurst.match_name("IMG_20231014_183246_BURST002.jpg"),
            matched("IMG_20231014_183246", false)
        );
    }

    #[test]
    fn huawei_declines_plain_names() {
        assert_eq!(HuaweiBurst.match_name("IMG_1234.jpg"), BurstMatch::NoMatch);
        assert_eq!(HuaweiBurst.match_name("IMG_BURST.jpg"), BurstMatch::NoMatch);
    }

    #[test]
    fn huawei_accepts_motion_photo_extension() {
        assert_eq!(
            HuaweiBurst.match_name("IMG_1_BURST001_COVER.MP.jpg"),
            matched("IMG_1", true)
        );
        assert_eq!(
            HuaweiBurst.match_name("IMG_1_BURST002.MP.jpg"),
            matched("IMG_1", false)
        );
        let class = classify_name("IMG_1_BURST001_COVER.MP.jpg", &DEFAULT_MATCHERS);
        assert_eq!(class.base, "IMG_1");
        assert!(class.is_burst);
        assert!(class.is_cover);
    }

    #[test]
    fn nexus_accepts_motion_photo_extension() {
        assert_eq!(
            NexusBurst.match_name("00001IMG_00001_BURST20171111030039_COVER.MP.jpg"),
            matched("BURST20171111030039", true)
        );
    }

    #[test]
    fn pixel_extracts_prefix_and_cover() {
        assert_eq!(
            PixelBurst.match_name("PXL_20230330_184138390.RAW-01.MP.COVER.jpg"),
            matched("PXL_20230330_184138390", true)
        );
        assert_eq!(
            PixelBurst.match_name("PXL_20230330_184138390.RAW-02.ORIGINAL.dng"),
            matched("PXL_20230330_184138390", false)
        );
        assert_eq!(
            PixelBurst.match_name("PXL_20230330_184138390.RAW-02.dng"),
            matched("PXL_20230330_184138390", false)
        );
    }

    #[test]
    fn samsung_first_frame_is_cover() {
        assert_eq!(
            SamsungBurst.match_name("20231207_101605_001.jpg"),
            matched("20231207_101605", true)
        );
        assert_eq!(
            SamsungBurst.match_name("20231207_101605_007.jpg"),
            matched("20231207_101605", false)
        );
        assert_eq!(
            SamsungBurst.match_name("IMG_20200101_120000_002.jpg"),
            matched("20200101_120000", false)
        );
    }

    #[test]
    fn samsung_requires_three_char_extension() {
        assert_eq!(
            SamsungBurst.match_name("20231207_101605_001.jpeg"),
            BurstMatch::NoMatch
        );
    }

    #[test]
    fn nexus_takes_priority_over_huawei() {
        let class = classify_name(
            "00001IMG_00001_BURST20171111030039_COVER.jpg",
            &DEFAULT_MATCHERS,
        );
        assert_eq!(class.base, "BURST20171111030039");
        assert!(class.is_burst);
        assert!(class.is_cover);
    }

    #[test]
    fn fallback_strips_extension() {
        let class = classify_name("photo.dng", &DEFAULT_MATCHERS);
        assert_eq!(
            class,
            NameClass {
                base: "photo".to_string(),
                is_burst: false,
                is_cover: false
            }
        );
    }

    #[test]
    fn fallback_strips_motion_photo_marker() {
        let class = classify_name("PXL_20230330_184138390.MP.jpg", &DEFAULT_MATCHERS);
        assert_eq!(class.base, "PXL_20230330_184138390");
        assert!(!class.is_burst);
        assert!(!class.is_cover);
    }

    #[test]
    fn fallback_motion_photo_marker_is_case_sensitive() {
        let class = classify_name("clip.mp.jpg", &DEFAULT_MATCHERS);
        assert_eq!(class.base, "clip.mp");
        let class = classify_name("clip.Mp.jpg", &DEFAULT_MATCHERS);
        assert_eq!(class.base, "clip.Mp");
    }

    #[test]
    fn fallback_keeps_other_inner_dots() {
        let class = classify_name("holiday.v2.jpg", &DEFAULT_MATCHERS);
        assert_eq!(class.base, "holiday.v2");
    }

    #[test]
    fn empty_matcher_list_always_falls_back() {
        let class = classify_name("IMG_0001_BURST20200101120000_COVER.jpg", &[]);
        assert_eq!(class.base, "IMG_0001_BURST20200101120000_COVER");
        assert!(!class.is_burst);
    }

    #[test]
    fn extension_helpers() {
        assert_eq!(strip_extension("a.b.jpg"), "a.b");
        assert_eq!(extension_of("a.b.jpg"), "jpg");
        assert_eq!(strip_extension(".hidden"), ".hidden");
        assert_eq!(extension_of(".hidden"), "");
        assert_eq!(extension_of("noext"), "");
    }
}
