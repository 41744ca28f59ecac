use async_trait::async_trait;
use mcpdex_core::{Enricher, Enrichment, EnrichmentError};

/// Offline enricher that derives descriptions from the submission itself.
///
/// Output depends only on the name and repository URL, so repeated
/// generation for the same server yields the same text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateEnricher;

impl TemplateEnricher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Enricher for TemplateEnricher {
    async fn generate(
        &self,
        name: &str,
        repository_url: &str,
    ) -> Result<Enrichment, EnrichmentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EnrichmentError::MalformedOutput(
                "cannot describe a server without a name".to_string(),
            ));
        }

        let owner = repository_owner(repository_url);
        let description = match owner {
            Some(owner) => format!(
                "{name} is an MCP (Model Context Protocol) server maintained by {owner}. \
                 It exposes its capabilities to MCP-compatible AI clients through the standard \
                 protocol, so assistants can call its tools and read its resources.\n\n\
                 The source code, setup instructions and issue tracker live at {repository_url}."
            ),
            None => format!(
                "{name} is an MCP (Model Context Protocol) server. It exposes its capabilities \
                 to MCP-compatible AI clients through the standard protocol, so assistants can \
                 call its tools and read its resources.\n\n\
                 The source code and setup instructions live at {repository_url}."
            ),
        };
        let short_description = format!("{name}: an MCP server for AI assistants");

        Ok(Enrichment::new(description, short_description))
    }
}

/// Owner segment of a `https://github.com/<owner>/<repo>` style URL.
fn repository_owner(url: &str) -> Option<&str> {
    let path = url
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let mut segments = path.split('/').skip(1).filter(|s| !s.is_empty());
    let owner = segments.next()?;
    segments.next().map(|_| owner)
}
