use async_trait::async_trait;
use log::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::{Segment, Transcript, VideoId, join_segments};

/// A caption track advertised for a video
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionTrack {
    pub language_code: String,
    pub name: String,
    pub base_url: String,
    pub is_generated: bool,
}

/// Why fetching a single track failed
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Only this track is affected; other tracks may still work
    Track(String),
    /// The backend itself is unusable; every other track would fail the same way
    Backend(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Track(msg) => write!(f, "{msg}"),
            FetchError::Backend(msg) => write!(f, "backend: {msg}"),
        }
    }
}

/// Source of caption tracks for a video
#[async_trait]
pub trait CaptionBackend: Send + Sync {
    async fn list_tracks(&self, video_id: &VideoId) -> eyre::Result<Vec<CaptionTrack>>;

    async fn fetch_track(&self, track: &CaptionTrack) -> std::result::Result<Vec<Segment>, FetchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Priority,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Empty,
    Failed(String),
}

/// Record of a candidate track that did not produce a transcript
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub language: String,
    pub phase: Phase,
    pub outcome: Outcome,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Priority => write!(f, "priority"),
            Phase::Fallback => write!(f, "fallback"),
        }
    }
}

impl std::fmt::Display for Attempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.outcome {
            Outcome::Empty => write!(f, "{} [{}]: empty", self.language, self.phase),
            Outcome::Failed(msg) => write!(f, "{} [{}]: {msg}", self.language, self.phase),
        }
    }
}

/// Picks one caption track per video by language priority
pub struct TranscriptSelector<B> {
    backend: B,
    languages: Vec<String>,
}

impl<B: CaptionBackend> TranscriptSelector<B> {
    pub fn new(backend: B, config: &Config) -> Self {
        Self::with_languages(backend, config.languages())
    }

    pub fn with_languages(backend: B, languages: Vec<String>) -> Self {
        Self { backend, languages }
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub async fn select(&self, video_id: &VideoId) -> Result<Transcript> {
        let tracks = self
            .backend
            .list_tracks(video_id)
            .await
            .map_err(|e| Error::Backend(format!("{e:#}")))?;

        debug!("Video {video_id} has {} caption track(s)", tracks.len());

        let candidates = candidates(&tracks, &self.languages);
        let mut attempts = Vec::new();

        for (track, phase) in candidates {
            debug!("Trying {} track ({phase})", track.language_code);
            let outcome = match self.backend.fetch_track(track).await {
                Ok(segments) => {
                    let text = join_segments(&segments);
                    if !text.is_empty() {
                        info!(
                            "Selected {} track for {video_id} ({} segments)",
                            track.language_code,
                            segments.len()
                        );
                        return Ok(Transcript {
                            video_id: video_id.clone(),
                            language: track.language_code.clone(),
                            text,
                        });
                    }
                    Outcome::Empty
                }
                Err(FetchError::Backend(msg)) => {
                    warn!("Backend failure while fetching {} track: {msg}", track.language_code);
                    return Err(Error::Backend(msg));
                }
                Err(FetchError::Track(msg)) => Outcome::Failed(msg),
            };

            let attempt = Attempt {
                language: track.language_code.clone(),
                phase,
                outcome,
            };
            warn!("Skipping caption track for {video_id}: {attempt}");
            attempts.push(attempt);
        }

        Err(Error::NoTranscript {
            video_id: video_id.to_string(),
            attempts,
        })
    }
}

/// Ordered candidate list: the first match for each priority language, then
/// every remaining track in backend order
fn candidates<'a>(tracks: &'a [CaptionTrack], languages: &[String]) -> Vec<(&'a CaptionTrack, Phase)> {
    let mut picked: Vec<usize> = Vec::new();

    for lang in languages {
        if let Some(idx) = tracks
            .iter()
            .position(|t| t.language_code.eq_ignore_ascii_case(lang))
            .filter(|idx| !picked.contains(idx))
        {
            picked.push(idx);
        }
    }

    let priority = picked.iter().map(|&idx| (&tracks[idx], Phase::Priority));
    let fallback = tracks
        .iter()
        .enumerate()
        .filter(|(idx, _)| !picked.contains(idx))
        .map(|(_, t)| (t, Phase::Fallback));

    priority.chain(fallback).collect()
}
