use clap::Parser;
use std::path::PathBuf;

use ytsum::models::Model;

#[derive(Parser)]
#[command(
    name = "ytsum",
    about = "Summarize a YouTube video from its captions",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// YouTube video URL or video ID (reads from stdin if omitted)
    pub url: Option<String>,

    /// LLM model for summarization [default: mistral-large]
    #[arg(short, long, value_enum)]
    pub model: Option<Model>,

    /// Save the summary report to a file in DIR (current directory if omitted)
    #[arg(short, long, value_name = "DIR", num_args = 0..=1, default_missing_value = ".")]
    pub download: Option<PathBuf>,

    /// Print a WhatsApp share link for the summary
    #[arg(short, long)]
    pub share: bool,

    /// List available models and exit
    #[arg(long)]
    pub list_models: bool,

    /// Show caption language, statistics and config details
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["ytsum", "dQw4w9WgXcQ"]).unwrap();
        assert_eq!(cli.url.as_deref(), Some("dQw4w9WgXcQ"));
        assert!(cli.model.is_none());
        assert!(cli.download.is_none());
        assert!(!cli.share);
    }

    #[test]
    fn test_parse_model_and_download() {
        let cli = Cli::try_parse_from(["ytsum", "--model", "claude-3.5-sonnet", "--download", "/tmp/out", "x"]).unwrap();
        assert_eq!(cli.model, Some(Model::Claude35Sonnet));
        assert_eq!(cli.download, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn test_download_without_dir() {
        let cli = Cli::try_parse_from(["ytsum", "x", "--download"]).unwrap();
        assert_eq!(cli.download, Some(PathBuf::from(".")));
    }

    #[test]
    fn test_unknown_model_rejected() {
        assert!(Cli::try_parse_from(["ytsum", "--model", "gpt-4o", "x"]).is_err());
    }
}
