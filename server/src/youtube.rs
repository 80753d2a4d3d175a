//! Candidate videos for a query, from the YouTube Data API, and their spoken words, from the captions YouTube shows on the watch page.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::Deserialize;
use thiserror::Error;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
const WATCH_URL: &str = "https://www.youtube.com/watch";

/// A video before it has been scored against the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    /// Empty until filled in from `VideoSource::transcript`.
    pub transcript: String,
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("YOUTUBE_API_KEY not found. Please set it as an environment variable.")]
    MissingApiKey,
    #[error("video API responded with status {0}")]
    Status(u16),
    #[error("video API request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("video has no captions")]
    NoCaptions,
    #[error("caption track list: {0}")]
    CaptionTracks(#[from] serde_json::Error),
}

#[async_trait]
pub trait VideoSource: Send + Sync {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Candidate>, SourceError>;

    /// Everything said in the video, as one line of text.
    async fn transcript(&self, video_id: &str) -> Result<String, SourceError>;
}

pub struct YouTube {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl YouTube {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl VideoSource for YouTube {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Candidate>, SourceError> {
        let key = self.api_key.as_deref().ok_or(SourceError::MissingApiKey)?;
        let max_results = max_results.to_string();
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("q", query),
                ("part", "id,snippet"),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("key", key),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }
        let list: SearchList = response.json().await?;
        Ok(list.into_candidates())
    }

    async fn transcript(&self, video_id: &str) -> Result<String, SourceError> {
        let page = self
            .get_text(self.client.get(WATCH_URL).query(&[("v", video_id)]))
            .await?;
        let url = caption_track_url(&page)?;
        let xml = self.get_text(self.client.get(&url)).await?;
        Ok(transcript_text(&xml))
    }
}

impl YouTube {
    async fn get_text(&self, request: reqwest::RequestBuilder) -> Result<String, SourceError> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }
        Ok(response.text().await?)
    }
}

#[derive(Deserialize, Debug)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode", default)]
    language_code: String,
}

/// Finds the caption download URL in a watch page, preferring English.
fn caption_track_url(page: &str) -> Result<String, SourceError> {
    const MARKER: &str = "\"captionTracks\":";
    let start = page.find(MARKER).ok_or(SourceError::NoCaptions)? + MARKER.len();
    // the list is embedded in a much larger JSON blob, read just the one value
    let tracks = serde_json::Deserializer::from_str(&page[start..])
        .into_iter::<Vec<CaptionTrack>>()
        .next()
        .ok_or(SourceError::NoCaptions)??;
    let english = tracks
        .iter()
        .position(|track| track.language_code.starts_with("en"))
        .unwrap_or(0);
    tracks
        .into_iter()
        .nth(english)
        .map(|track| track.base_url)
        .ok_or(SourceError::NoCaptions)
}

lazy_static! {
    static ref CAPTION_TEXT: Regex =
        Regex::new(r"<text[^>]*>([^<]*)</text>").expect("programmer error: hardcoded regex is invalid");
    static ref NUMERIC_ENTITY: Regex =
        Regex::new(r"&#(\d+);").expect("programmer error: hardcoded regex is invalid");
}

fn unescape_once(text: &str) -> String {
    let text = NUMERIC_ENTITY.replace_all(text, |caps: &Captures| {
        caps[1]
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

// Captions come escaped twice, `&amp;#39;` for an apostrophe.
fn unescape(text: &str) -> String {
    unescape_once(&unescape_once(text))
}

/// Joins the lines of a timed-text caption document with spaces.
fn transcript_text(xml: &str) -> String {
    CAPTION_TEXT
        .captures_iter(xml)
        .map(|caps| unescape(&caps[1]).split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Deserialize, Debug)]
struct SearchList {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Deserialize, Debug)]
struct Item {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Deserialize, Debug)]
struct ItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Deserialize, Debug, Default)]
struct Thumbnails {
    high: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Deserialize, Debug)]
struct Thumbnail {
    url: String,
}

impl SearchList {
    fn into_candidates(self) -> Vec<Candidate> {
        self.items
            .into_iter()
            .filter_map(|item| {
                // type=video should make this always present, but channels have been seen
                let video_id = item.id.video_id?;
                let Snippet {
                    title,
                    description,
                    thumbnails,
                } = item.snippet;
                let thumbnail = thumbnails
                    .high
                    .or(thumbnails.default)
                    .map(|t| t.url)
                    .unwrap_or_default();
                Some(Candidate {
                    video_id,
                    title,
                    description,
                    thumbnail,
                    transcript: String::new(),
                })
            })
            .collect()
    }
}
