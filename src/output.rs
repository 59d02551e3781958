use chrono::NaiveDateTime;

use crate::VideoId;
use crate::models::Model;

const RULE_WIDTH: usize = 70;

/// File name for a downloaded summary report
pub fn report_filename(video_id: &VideoId, at: NaiveDateTime) -> String {
    format!("resume_{video_id}_{}.txt", at.format("%Y%m%d_%H%M%S"))
}

/// Render the downloadable summary report
pub fn render_report(video_id: &VideoId, model: &Model, summary: &str, at: NaiveDateTime) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "YOUTUBE VIDEO SUMMARY\n\
         {rule}\n\
         \n\
         Video ID: {video_id}\n\
         URL: {url}\n\
         Model: {label}\n\
         Date: {date}\n\
         \n\
         {rule}\n\
         SUMMARY\n\
         {rule}\n\
         \n\
         {summary}\n\
         \n\
         {rule}\n",
        url = video_id.watch_url(),
        label = model.label(),
        date = at.format("%Y-%m-%d %H:%M:%S"),
    )
}

/// WhatsApp share link carrying the summary and the source URL
pub fn share_link(summary: &str, source_url: &str) -> String {
    let text = format!("*YouTube summary*\n\n{summary}\n\n🔗 {source_url}");
    format!("https://wa.me/?text={}", urlencoding::encode(&text))
}

/// Size of the summary relative to the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub transcript_chars: usize,
    pub summary_chars: usize,
}

impl Stats {
    pub fn new(transcript: &str, summary: &str) -> Self {
        Self {
            transcript_chars: transcript.chars().count(),
            summary_chars: summary.chars().count(),
        }
    }

    /// Percentage of the transcript removed by summarizing
    pub fn compression(&self) -> f64 {
        if self.transcript_chars == 0 {
            return 0.0;
        }
        100.0 - (self.summary_chars as f64 / self.transcript_chars as f64 * 100.0)
    }
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} chars → {} chars (compression {:.1}%)",
            self.transcript_chars,
            self.summary_chars,
            self.compression()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap()
    }

    fn video() -> VideoId {
        crate::extract_video_id("dQw4w9WgXcQ").unwrap()
    }

    #[test]
    fn test_report_filename() {
        assert_eq!(report_filename(&video(), at()), "resume_dQw4w9WgXcQ_20240309_140507.txt");
    }

    #[test]
    fn test_render_report() {
        let report = render_report(&video(), &Model::MistralLarge, "• Point", at());
        let rule = "=".repeat(70);
        let expected = format!(
            "YOUTUBE VIDEO SUMMARY\n{rule}\n\nVideo ID: dQw4w9WgXcQ\n\
             URL: https://www.youtube.com/watch?v=dQw4w9WgXcQ\n\
             Model: Mistral Large (French)\nDate: 2024-03-09 14:05:07\n\n\
             {rule}\nSUMMARY\n{rule}\n\n• Point\n\n{rule}\n"
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_share_link() {
        let link = share_link("A & B", "https://youtu.be/x");
        assert_eq!(
            link,
            "https://wa.me/?text=%2AYouTube%20summary%2A%0A%0AA%20%26%20B%0A%0A%F0%9F%94%97%20https%3A%2F%2Fyoutu.be%2Fx"
        );
    }

    #[test]
    fn test_stats() {
        let stats = Stats::new(&"a".repeat(200), &"b".repeat(50));
        assert!((stats.compression() - 75.0).abs() < f64::EPSILON);
        assert_eq!(stats.to_string(), "200 chars → 50 chars (compression 75.0%)");
    }

    #[test]
    fn test_stats_counts_chars_not_bytes() {
        let stats = Stats::new("été", "é");
        assert_eq!(stats.transcript_chars, 3);
        assert_eq!(stats.summary_chars, 1);
    }

    #[test]
    fn test_stats_empty_transcript() {
        assert_eq!(Stats::new("", "").compression(), 0.0);
    }
}
