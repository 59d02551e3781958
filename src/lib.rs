pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod select;
pub mod summarize;
pub mod youtube;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub use error::{Error, Result};

static URL_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)").expect("valid regex"),
        Regex::new(r"youtube\.com/watch\?.*v=([^&\n?#]+)").expect("valid regex"),
    ]
});

/// Length of a bare video identifier
const BARE_ID_LEN: usize = 11;

/// Video identifier as extracted from user input
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single captioned segment
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Flattened transcript of the selected caption track
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub video_id: VideoId,
    pub language: String,
    pub text: String,
}

/// Extract video ID from various YouTube URL formats or a bare ID
pub fn extract_video_id(input: &str) -> Result<VideoId> {
    let input = input.trim();

    for re in URL_PATTERNS.iter() {
        if let Some(caps) = re.captures(input) {
            return Ok(VideoId(caps[1].to_string()));
        }
    }

    if input.chars().count() == BARE_ID_LEN && !input.contains('/') {
        return Ok(VideoId(input.to_string()));
    }

    Err(Error::InvalidInput {
        input: input.to_string(),
    })
}

/// Join segment texts with single spaces, flattening line breaks
pub fn join_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .replace(['\r', '\n'], " ")
        .trim()
        .to_string()
}
