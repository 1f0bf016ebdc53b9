use crate::errors::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single timed subtitle entry. Immutable once parsed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub start_ms: i64,
    pub end_ms: i64,
    /// Display text, may carry `<b>`, `<i>`, `<u>` emphasis tags
    pub text: String,
}

impl Cue {
    pub fn new(start_ms: i64, end_ms: i64, text: impl Into<String>) -> Self {
        Self {
            start_ms,
            end_ms,
            text: text.into(),
        }
    }

    /// Half-open containment: `[start_ms, end_ms)`
    pub fn contains(&self, time_ms: i64) -> bool {
        self.start_ms <= time_ms && time_ms < self.end_ms
    }
}

/// Declared format of a subtitle track
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    Srt,
    Vtt,
    Ass,
}

impl SubtitleFormat {
    pub fn name(&self) -> &'static str {
        match self {
            SubtitleFormat::Srt => "srt",
            SubtitleFormat::Vtt => "vtt",
            SubtitleFormat::Ass => "ass",
        }
    }

    /// Resolve a format tag such as `"srt"`, `"WebVTT"` or `"ssa"`.
    pub fn from_tag(tag: &str) -> Result<Self, ParseError> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "srt" | "subrip" => Ok(SubtitleFormat::Srt),
            "vtt" | "webvtt" => Ok(SubtitleFormat::Vtt),
            "ass" | "ssa" => Ok(SubtitleFormat::Ass),
            other => Err(ParseError::new(format!(
                "unrecognized subtitle format: {:?}",
                other
            ))),
        }
    }

    /// Guess the format from a file extension, used by the probe binary.
    pub fn from_extension(path: &str) -> Result<Self, ParseError> {
        let ext = path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        Self::from_tag(ext)
    }
}

impl FromStr for SubtitleFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The active subtitle track as supplied by the subtitle source
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubtitleTrack {
    pub content: String,
    pub format: SubtitleFormat,
}

impl SubtitleTrack {
    pub fn new(content: impl Into<String>, format: SubtitleFormat) -> Self {
        Self {
            content: content.into(),
            format,
        }
    }
}

/// Parse result with recovery statistics
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedTrack {
    pub cues: Vec<Cue>,
    /// Number of malformed cue blocks that were skipped
    pub skipped_blocks: usize,
}
