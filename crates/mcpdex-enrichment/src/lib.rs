//! Enrichment providers.
//!
//! [`OpenAiEnricher`] asks an OpenAI-compatible chat-completions endpoint
//! for the descriptions; [`TemplateEnricher`] derives them locally so the
//! directory runs without provider credentials.

pub mod openai;
pub mod template;

pub use openai::{OpenAiEnricher, OpenAiSettings};
pub use template::TemplateEnricher;
