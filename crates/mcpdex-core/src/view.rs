use crate::id::ServerId;
use crate::record::{RecordStatus, ServerRecord};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Engagement numbers shown next to a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub stars: u64,
    pub forks: u64,
    pub views: u64,
}

/// Values substituted for fields a record does not carry.
///
/// Substitution happens on the way out only; defaults are never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationDefaults {
    pub metrics: Metrics,
    pub tags: Vec<String>,
    pub language: String,
}

/// A record as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerView {
    pub id: ServerId,
    pub name: String,
    #[serde(rename = "github_url")]
    pub repository_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    pub stars: u64,
    pub forks: u64,
    pub views: u64,
    pub tags: Vec<String>,
    pub language: String,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    #[serde(rename = "matchScore", skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u8>,
    #[serde(rename = "trendingScore", skip_serializing_if = "Option::is_none")]
    pub trending_score: Option<f64>,
}

impl ServerView {
    /// Builds a view of a stored record, filling absent fields from `defaults`.
    pub fn from_record(record: ServerRecord, defaults: PresentationDefaults) -> Self {
        let last_updated = record.updated_at.unwrap_or(record.created_at).to_string();

        Self {
            id: record.id,
            name: record.name,
            repository_url: record.repository_url,
            description: record.description,
            short_description: record.short_description,
            status: Some(record.status),
            error: record.error,
            created_at: Some(record.created_at),
            updated_at: record.updated_at,
            stars: record.stars.unwrap_or(defaults.metrics.stars),
            forks: record.forks.unwrap_or(defaults.metrics.forks),
            views: record.views.unwrap_or(defaults.metrics.views),
            tags: record.tags.unwrap_or(defaults.tags),
            language: record.language.unwrap_or(defaults.language),
            last_updated,
            match_score: None,
            trending_score: None,
        }
    }

    pub fn with_match_score(mut self, score: u8) -> Self {
        self.match_score = Some(score);
        self
    }

    pub fn with_trending_score(mut self, score: f64) -> Self {
        self.trending_score = Some(score);
        self
    }
}
