use async_trait::async_trait;
use eyre::{Result, bail};
use log::debug;
use regex::Regex;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::Segment;
use crate::VideoId;
use crate::select::{CaptionBackend, CaptionTrack, FetchError};

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

#[derive(Debug, Deserialize)]
struct InnerTubePlayerResponse {
    captions: Option<CaptionsData>,
}

#[derive(Debug, Deserialize)]
struct CaptionsData {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    player_captions_tracklist_renderer: Option<CaptionTracklistRenderer>,
}

#[derive(Debug, Deserialize)]
struct CaptionTracklistRenderer {
    #[serde(rename = "captionTracks")]
    caption_tracks: Option<Vec<RawCaptionTrack>>,
}

#[derive(Debug, Deserialize)]
struct RawCaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode")]
    language_code: String,
    name: Option<TrackName>,
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TrackName {
    #[serde(rename = "simpleText")]
    simple_text: Option<String>,
}

impl From<RawCaptionTrack> for CaptionTrack {
    fn from(raw: RawCaptionTrack) -> Self {
        CaptionTrack {
            name: raw
                .name
                .and_then(|n| n.simple_text)
                .unwrap_or_else(|| raw.language_code.clone()),
            is_generated: raw.kind.as_deref() == Some("asr"),
            language_code: raw.language_code,
            base_url: raw.base_url,
        }
    }
}

/// Caption backend built on YouTube's InnerTube player API
pub struct InnerTube {
    client: reqwest::Client,
}

impl InnerTube {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CaptionBackend for InnerTube {
    async fn list_tracks(&self, video_id: &VideoId) -> Result<Vec<CaptionTrack>> {
        // Step 1: Fetch the watch page to get the InnerTube API key
        let watch_url = video_id.watch_url();
        debug!("Fetching watch page: {watch_url}");

        let page_html = self
            .client
            .get(&watch_url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let api_key = extract_api_key(&page_html)?;
        debug!("Extracted InnerTube API key: {api_key}");

        // Step 2: Call InnerTube player endpoint
        let player_url = format!("https://www.youtube.com/youtubei/v1/player?key={api_key}&prettyPrint=false");

        let body = serde_json::json!({
            "context": {
                "client": {
                    "hl": "en",
                    "gl": "US",
                    "clientName": "WEB",
                    "clientVersion": "2.20241126.01.00"
                }
            },
            "videoId": video_id.as_str()
        });

        let resp: InnerTubePlayerResponse = self
            .client
            .post(&player_url)
            .header("User-Agent", USER_AGENT)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(tracks_from_response(resp))
    }

    async fn fetch_track(&self, track: &CaptionTrack) -> std::result::Result<Vec<Segment>, FetchError> {
        debug!("Fetching caption track: lang={}", track.language_code);

        let resp = self
            .client
            .get(&track.base_url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| FetchError::Backend(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(classify_status(status));
        }

        let caption_xml = resp.text().await.map_err(|e| FetchError::Backend(e.to_string()))?;
        parse_caption_xml(&caption_xml).map_err(|e| FetchError::Track(e.to_string()))
    }
}

fn tracks_from_response(resp: InnerTubePlayerResponse) -> Vec<CaptionTrack> {
    resp.captions
        .and_then(|c| c.player_captions_tracklist_renderer)
        .and_then(|r| r.caption_tracks)
        .unwrap_or_default()
        .into_iter()
        .map(CaptionTrack::from)
        .collect()
}

/// Auth and rate-limit rejections affect every track, anything else only this one
fn classify_status(status: StatusCode) -> FetchError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            FetchError::Backend(format!("caption request rejected with HTTP {status}"))
        }
        _ => FetchError::Track(format!("caption request returned HTTP {status}")),
    }
}

fn extract_api_key(html: &str) -> Result<String> {
    let re = Regex::new(r#""INNERTUBE_API_KEY"\s*:\s*"([^"]+)""#)?;
    if let Some(caps) = re.captures(html) {
        return Ok(caps[1].to_string());
    }

    // Fallback: try the newer pattern
    let re2 = Regex::new(r#"innertubeApiKey\s*[=:]\s*"([^"]+)""#)?;
    if let Some(caps) = re2.captures(html) {
        return Ok(caps[1].to_string());
    }

    bail!("could not extract InnerTube API key from watch page");
}

fn parse_caption_xml(xml: &str) -> Result<Vec<Segment>> {
    use quick_xml::Reader;
    use quick_xml::events::Event;

    let mut reader = Reader::from_str(xml);
    let mut segments = Vec::new();
    let mut current: Option<(f64, f64)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"text" => {
                let mut start = None;
                let mut dur = None;
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"start" => start = String::from_utf8_lossy(&attr.value).parse::<f64>().ok(),
                        b"dur" => dur = String::from_utf8_lossy(&attr.value).parse::<f64>().ok(),
                        _ => {}
                    }
                }
                // Some tracks omit dur on the final cue
                current = start.map(|s| (s, dur.unwrap_or(0.0)));
            }
            Ok(Event::Text(ref e)) => {
                if let Some((start, duration)) = current.take() {
                    let raw_text = e.unescape().unwrap_or_default().to_string();
                    let text = html_escape::decode_html_entities(&raw_text).trim().to_string();
                    if !text.is_empty() {
                        segments.push(Segment { text, start, duration });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => bail!("error parsing caption XML: {e}"),
            _ => {}
        }
    }

    Ok(segments)
}
