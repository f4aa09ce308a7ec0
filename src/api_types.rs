use serde::{Deserialize, Serialize};

/* search.list */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSearchResponse {
    #[serde(default)]
    pub items: Vec<ApiSearchItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSearchItem {
    pub id: ApiSearchId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSearchId {
    #[serde(rename = "videoId", default)]
    pub video_id: Option<String>, // absent for channel/playlist hits
}

/* videos.list */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiVideoListResponse {
    #[serde(default)]
    pub items: Vec<ApiVideo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiVideo {
    pub id: String,
    pub snippet: ApiSnippet,
    #[serde(default)]
    pub statistics: ApiStatistics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSnippet {
    pub title: String,
    #[serde(rename = "publishedAt", default)]
    pub published_at: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub thumbnails: ApiThumbnails,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiThumbnails {
    pub default: Option<ApiThumbnail>,
    pub medium: Option<ApiThumbnail>,
    pub high: Option<ApiThumbnail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiThumbnail {
    pub url: String,
}

/// Counters are decimal strings on the wire; any of them may be hidden.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
}

/* error envelope */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}
