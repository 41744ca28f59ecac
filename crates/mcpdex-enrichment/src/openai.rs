use async_trait::async_trait;
use mcpdex_core::{Enricher, Enrichment, EnrichmentError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Longest provider error body kept in an error message.
const MAX_ERROR_BODY: usize = 200;

/// Connection settings for an OpenAI-compatible provider.
#[derive(Clone, TypedBuilder)]
pub struct OpenAiSettings {
    #[builder(setter(into))]
    pub api_key: String,
    #[builder(default = DEFAULT_BASE_URL.to_string(), setter(into))]
    pub base_url: String,
    #[builder(default = DEFAULT_MODEL.to_string(), setter(into))]
    pub model: String,
    /// Upper bound for one completion request.
    #[builder(default = Duration::from_secs(60))]
    pub timeout: Duration,
}

impl std::fmt::Debug for OpenAiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSettings")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Enricher backed by a chat-completions endpoint.
///
/// Generation takes two completions: a long description of the repository,
/// then a one-sentence summary of that description.
#[derive(Debug, Clone)]
pub struct OpenAiEnricher {
    client: Client,
    settings: OpenAiSettings,
}

impl OpenAiEnricher {
    pub fn new(settings: OpenAiSettings) -> Result<Self, EnrichmentError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| EnrichmentError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, settings })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    async fn complete(&self, prompt: &str) -> Result<String, EnrichmentError> {
        let request = ChatRequest {
            model: &self.settings.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        trace!(model = %self.settings.model, "Requesting completion");
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Provider rejected completion request");
            return Err(EnrichmentError::Provider {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let body: ChatResponse = response.json().await.map_err(map_reqwest_error)?;
        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_owned())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(EnrichmentError::MalformedOutput(
                "completion contained no text".to_string(),
            ));
        }

        Ok(text)
    }
}

#[async_trait]
impl Enricher for OpenAiEnricher {
    async fn generate(
        &self,
        name: &str,
        repository_url: &str,
    ) -> Result<Enrichment, EnrichmentError> {
        let description = self
            .complete(&description_prompt(name, repository_url))
            .await?;
        debug!(name, length = description.len(), "Generated description");

        let short_description = self.complete(&summary_prompt(&description)).await?;
        debug!(name, "Generated short description");

        Ok(Enrichment::new(description, short_description))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> EnrichmentError {
    if err.is_timeout() {
        EnrichmentError::Timeout(err.to_string())
    } else if err.is_decode() {
        EnrichmentError::MalformedOutput(err.to_string())
    } else {
        EnrichmentError::Transport(err.to_string())
    }
}

fn description_prompt(name: &str, repository_url: &str) -> String {
    format!(
        "Look at the GitHub repository {repository_url}, published as \"{name}\", and describe it \
         as an MCP (Model Context Protocol) server.\n\
         Cover what the server does, its main features, how it plugs into the Model Context \
         Protocol, and which AI tools or data sources it connects to.\n\
         Write two to three informative, concise paragraphs focused on the MCP functionality."
    )
}

fn summary_prompt(description: &str) -> String {
    format!(
        "Here is the description of an MCP server: \"{description}\"\n\
         Summarise it in one short sentence of at most 80 characters, suitable as a one-line \
         summary on a listing page. Reply with the sentence only."
    )
}
