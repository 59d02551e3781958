use thiserror::Error;

use crate::select::Attempt;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not extract a video ID from: {input}")]
    InvalidInput { input: String },

    #[error("no usable transcript for video {video_id}{}", describe_attempts(.attempts))]
    NoTranscript { video_id: String, attempts: Vec<Attempt> },

    #[error("transcript backend failed: {0}")]
    Backend(String),

    #[error("missing API key: set the {env_var} environment variable or api_key in the config file")]
    MissingApiKey { env_var: String },

    #[error("summarization API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid summarization API response")]
    InvalidResponse,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

fn describe_attempts(attempts: &[Attempt]) -> String {
    if attempts.is_empty() {
        return " (no caption tracks)".to_string();
    }
    let tried = attempts.iter().map(|a| a.to_string()).collect::<Vec<_>>().join("; ");
    format!(" (tried: {tried})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::{Outcome, Phase};

    #[test]
    fn test_no_transcript_without_tracks() {
        let err = Error::NoTranscript {
            video_id: "dQw4w9WgXcQ".to_string(),
            attempts: vec![],
        };
        assert_eq!(
            err.to_string(),
            "no usable transcript for video dQw4w9WgXcQ (no caption tracks)"
        );
    }

    #[test]
    fn test_no_transcript_lists_attempts() {
        let err = Error::NoTranscript {
            video_id: "dQw4w9WgXcQ".to_string(),
            attempts: vec![
                Attempt {
                    language: "fr".to_string(),
                    phase: Phase::Priority,
                    outcome: Outcome::Empty,
                },
                Attempt {
                    language: "de".to_string(),
                    phase: Phase::Fallback,
                    outcome: Outcome::Failed("HTTP 404".to_string()),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "no usable transcript for video dQw4w9WgXcQ (tried: fr [priority]: empty; de [fallback]: HTTP 404)"
        );
    }
}
