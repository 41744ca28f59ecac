use crate::error::Result;
use crate::id::ServerId;
use crate::record::{Enrichment, ServerRecord};
use crate::view::ServerView;
use async_trait::async_trait;

/// Parameters for submitting a server to the directory.
#[derive(Debug, Clone)]
pub struct SubmitParams {
    /// Display name chosen by the submitter.
    pub name: String,
    /// Link to the server's source repository.
    pub repository_url: String,
}

/// Parameters for (re)generating a server's descriptions.
#[derive(Debug, Clone)]
pub struct DescribeParams {
    pub name: String,
    pub repository_url: String,
    /// Record to write the outcome onto. Without an id the text is only returned.
    pub id: Option<ServerId>,
}

#[async_trait]
pub trait Directory: Send + Sync + 'static {
    /// Stores a new record, ranks it and schedules its enrichment.
    ///
    /// Returns as soon as the record is stored; enrichment runs detached.
    async fn submit(&self, params: SubmitParams) -> Result<ServerRecord>;

    /// Scores every record against `query`, best match first.
    async fn search(&self, query: &str) -> Result<Vec<ServerView>>;

    /// Returns the `count` most trending servers, padded with fallback entries.
    ///
    /// Never fails; storage problems degrade to the fallback list.
    async fn top_trending(&self, count: usize) -> Vec<ServerView>;

    /// Finds the record whose name equals `name` exactly.
    async fn fetch_by_name(&self, name: &str) -> Result<ServerView>;

    /// Generates descriptions, writing the outcome onto `params.id` if given.
    async fn describe(&self, params: DescribeParams) -> Result<Enrichment>;
}
