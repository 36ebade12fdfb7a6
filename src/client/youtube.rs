use crate::{Error, Result};
use reqwest::Client;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Default YouTube Data API v3 endpoint.
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// URL template for a watch page, completed with a video id.
const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// One mapped search result. Every field is plain text; sub-fields the
/// provider omits become empty strings, never nulls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Video title.
    pub title: String,
    /// Watch page URL synthesized from the video id.
    pub url: String,
    /// Channel that published the video.
    pub channel_title: String,
    /// Publication timestamp as returned by the provider.
    pub published_at: String,
}

// Wire types for the search.list response. Only the fields the adapter
// reads are decoded.
#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: ResourceId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    published_at: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

/// YouTube Data API v3 search client.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    /// Create a client authenticated with an API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a specific API endpoint (tests point this at
    /// a local stub).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("youtube-sheets-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Service(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    /// Build the search.list URL: snippet part, video type only, bounded
    /// result count.
    fn build_search_url(&self, query: &str, max_results: u32) -> Result<String> {
        let mut url = Url::parse(&format!("{}/search", self.base_url))
            .map_err(|e| Error::Service(format!("Invalid base URL: {e}")))?;

        url.query_pairs_mut()
            .append_pair("part", "snippet")
            .append_pair("q", query)
            .append_pair("maxResults", &max_results.to_string())
            .append_pair("type", "video")
            .append_pair("key", &self.api_key);

        Ok(url.to_string())
    }

    /// Search for videos matching `query`, limited to `max_results`.
    ///
    /// Items without a video id cannot yield a watch URL and are skipped
    /// with a warning rather than emitting a placeholder.
    pub async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Video>> {
        info!("Searching YouTube: query='{query}', max_results={max_results}");

        let url = self.build_search_url(query, max_results)?;
        debug!("YouTube search URL: {url}");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::provider("YouTube", format!("request timed out: {e}"))
            } else if e.is_connect() {
                Error::provider("YouTube", format!("connection failed: {e}"))
            } else {
                Error::provider("YouTube", format!("request failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(Error::provider(
                "YouTube",
                format!("HTTP {status}: {message}"),
            ));
        }

        let listing: SearchListResponse = response
            .json()
            .await
            .map_err(|e| Error::provider("YouTube", format!("invalid response body: {e}")))?;

        let videos = Self::map_items(listing.items);
        info!("YouTube search returned {} videos", videos.len());
        Ok(videos)
    }

    fn map_items(items: Vec<SearchItem>) -> Vec<Video> {
        items
            .into_iter()
            .filter_map(|item| match item.id.video_id {
                Some(video_id) => Some(Video {
                    title: item.snippet.title,
                    url: format!("{WATCH_URL_PREFIX}{video_id}"),
                    channel_title: item.snippet.channel_title,
                    published_at: item.snippet.published_at,
                }),
                None => {
                    warn!("Skipping search result without a video id");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(video_id: Option<&str>, title: &str) -> SearchItem {
        SearchItem {
            id: ResourceId {
                video_id: video_id.map(String::from),
            },
            snippet: Snippet {
                title: title.to_string(),
                channel_title: "Channel".to_string(),
                published_at: "2024-01-01T00:00:00Z".to_string(),
            },
        }
    }

    #[test]
    fn test_search_url_building() {
        let client = YouTubeClient::new("secret-key").unwrap();
        let url = client.build_search_url("rust async", 25).unwrap();
        assert!(url.starts_with("https://www.googleapis.com/youtube/v3/search?"));
        assert!(url.contains("part=snippet"));
        assert!(url.contains("q=rust+async") || url.contains("q=rust%20async"));
        assert!(url.contains("maxResults=25"));
        assert!(url.contains("type=video"));
        assert!(url.contains("key=secret-key"));
    }

    #[test]
    fn test_map_items_builds_watch_urls() {
        let videos = YouTubeClient::map_items(vec![item(Some("abc"), "Cat 1")]);
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].url, "https://www.youtube.com/watch?v=abc");
        assert_eq!(videos[0].title, "Cat 1");
    }

    #[test]
    fn test_map_items_skips_results_without_id() {
        let videos =
            YouTubeClient::map_items(vec![item(None, "no id"), item(Some("def"), "Cat 2")]);
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].url, "https://www.youtube.com/watch?v=def");
    }

    #[test]
    fn test_missing_snippet_fields_become_empty_strings() {
        let raw = r#"{"items": [{"id": {"videoId": "xyz"}}]}"#;
        let listing: SearchListResponse = serde_json::from_str(raw).unwrap();
        let videos = YouTubeClient::map_items(listing.items);
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].title, "");
        assert_eq!(videos[0].channel_title, "");
        assert_eq!(videos[0].published_at, "");
    }

    #[test]
    fn test_video_serializes_camel_case() {
        let video = Video {
            title: "Cat 1".to_string(),
            url: "https://www.youtube.com/watch?v=abc".to_string(),
            channel_title: "CatsChannel".to_string(),
            published_at: "2024-01-01T00:00:00Z".to_string(),
        };
        let value = serde_json::to_value(&video).unwrap();
        assert_eq!(value["channelTitle"], "CatsChannel");
        assert_eq!(value["publishedAt"], "2024-01-01T00:00:00Z");
    }
}
