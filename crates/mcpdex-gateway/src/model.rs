//! Request and response bodies of the HTTP API.

use mcpdex_core::{ServerId, ServerRecord, ServerView};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Missing fields read as empty and are rejected by the directory.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub github_url: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(rename = "serverId")]
    pub server_id: ServerId,
    pub data: ServerRecord,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<ServerView>,
}

/// `count` stays a string so a malformed value falls back to the default
/// instead of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct TrendingParams {
    pub count: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrendingResponse {
    pub servers: Vec<ServerView>,
}

#[derive(Debug, Deserialize)]
pub struct FetchParams {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FetchResponse {
    pub server: ServerView,
}

#[derive(Debug, Deserialize)]
pub struct DescriptionRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub github_url: String,
    #[serde(rename = "serverId", default)]
    pub server_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DescriptionResponse {
    pub success: bool,
    pub description: String,
    pub short_description: String,
    pub message: &'static str,
}
