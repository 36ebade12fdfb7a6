use crate::client::{SheetsClient, Video, YouTubeClient, HEADER_ROW};
use crate::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// Success message returned to the caller after both remote calls land.
const SUCCESS_MESSAGE: &str = "Successfully saved search results to Google Sheets";

/// Input parameters for the search-and-save tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchAndSaveInput {
    /// Search query for YouTube videos
    pub query: String,
    /// Maximum number of results to return (1-50)
    #[serde(default = "default_max_results")]
    #[schemars(range(min = 1, max = 50))]
    pub max_results: u32,
}

/// Structured success payload: confirmation message plus every mapped
/// video, in provider order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchAndSaveResult {
    pub message: String,
    pub videos: Vec<Video>,
}

/// The one tool this server exposes: search YouTube, append the results
/// to the configured spreadsheet.
///
/// Nothing is cached and nothing is retried; an identical call re-runs
/// both remote calls and appends a second header + rows block.
#[derive(Debug, Clone)]
pub struct SearchAndSaveTool {
    youtube: Arc<YouTubeClient>,
    sheets: Arc<SheetsClient>,
}

impl SearchAndSaveTool {
    /// Create the tool from its two injected clients.
    pub fn new(youtube: Arc<YouTubeClient>, sheets: Arc<SheetsClient>) -> Self {
        info!("Initializing search_and_save tool");
        Self { youtube, sheets }
    }

    /// Execute the pipeline: validate, search, map, append.
    ///
    /// A search failure short-circuits before any spreadsheet write; either
    /// downstream failure surfaces with the provider's own description.
    #[instrument(skip(self), fields(query = %input.query, max_results = input.max_results))]
    pub async fn execute(&self, input: SearchAndSaveInput) -> Result<SearchAndSaveResult> {
        Self::validate_input(&input)?;

        let videos = self.youtube.search(&input.query, input.max_results).await?;

        self.sheets.append(Self::build_rows(&videos)).await?;

        info!("Saved {} videos to the spreadsheet", videos.len());
        Ok(SearchAndSaveResult {
            message: SUCCESS_MESSAGE.to_string(),
            videos,
        })
    }

    /// Validate input before any provider call is issued.
    fn validate_input(input: &SearchAndSaveInput) -> Result<()> {
        if input.query.trim().is_empty() {
            return Err(crate::Error::InvalidInput {
                field: "query".to_string(),
                reason: "Query cannot be empty".to_string(),
            });
        }

        if input.max_results == 0 || input.max_results > 50 {
            return Err(crate::Error::InvalidInput {
                field: "maxResults".to_string(),
                reason: "maxResults must be between 1 and 50".to_string(),
            });
        }

        Ok(())
    }

    /// Header row followed by one row per video, column order
    /// [title, url, channel name, published timestamp].
    fn build_rows(videos: &[Video]) -> Vec<Vec<String>> {
        let header = HEADER_ROW.iter().map(ToString::to_string).collect();
        std::iter::once(header)
            .chain(videos.iter().map(|video| {
                vec![
                    video.title.clone(),
                    video.url.clone(),
                    video.channel_title.clone(),
                    video.published_at.clone(),
                ]
            }))
            .collect()
    }
}

/// Default number of results when the caller omits `maxResults`.
const fn default_max_results() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, title: &str) -> Video {
        Video {
            title: title.to_string(),
            url: format!("https://www.youtube.com/watch?v={id}"),
            channel_title: "CatsChannel".to_string(),
            published_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_input_validation() {
        // Empty query should fail
        let empty_query = SearchAndSaveInput {
            query: "   ".to_string(),
            max_results: 10,
        };
        assert!(SearchAndSaveTool::validate_input(&empty_query).is_err());

        // Zero results should fail
        let zero = SearchAndSaveInput {
            query: "cats".to_string(),
            max_results: 0,
        };
        assert!(SearchAndSaveTool::validate_input(&zero).is_err());

        // Above the documented bound should fail
        let too_many = SearchAndSaveInput {
            query: "cats".to_string(),
            max_results: 51,
        };
        assert!(SearchAndSaveTool::validate_input(&too_many).is_err());

        // Boundary values should pass
        for max_results in [1, 50] {
            let valid = SearchAndSaveInput {
                query: "cats".to_string(),
                max_results,
            };
            assert!(SearchAndSaveTool::validate_input(&valid).is_ok());
        }
    }

    #[test]
    fn test_max_results_defaults_to_ten() {
        let input: SearchAndSaveInput = serde_json::from_str(r#"{"query": "cats"}"#).unwrap();
        assert_eq!(input.max_results, 10);
    }

    #[test]
    fn test_input_accepts_camel_case_max_results() {
        let input: SearchAndSaveInput =
            serde_json::from_str(r#"{"query": "cats", "maxResults": 2}"#).unwrap();
        assert_eq!(input.max_results, 2);
    }

    #[test]
    fn test_build_rows_prepends_header() {
        let rows = SearchAndSaveTool::build_rows(&[video("abc", "Cat 1"), video("def", "Cat 2")]);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["タイトル", "URL", "チャンネル名", "公開日時"]);
        assert_eq!(
            rows[1],
            vec![
                "Cat 1",
                "https://www.youtube.com/watch?v=abc",
                "CatsChannel",
                "2024-01-01T00:00:00Z",
            ]
        );
        assert_eq!(
            rows[2],
            vec![
                "Cat 2",
                "https://www.youtube.com/watch?v=def",
                "CatsChannel",
                "2024-01-01T00:00:00Z",
            ]
        );
    }

    #[test]
    fn test_build_rows_with_no_videos_is_header_only() {
        let rows = SearchAndSaveTool::build_rows(&[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], vec!["タイトル", "URL", "チャンネル名", "公開日時"]);
    }
}
