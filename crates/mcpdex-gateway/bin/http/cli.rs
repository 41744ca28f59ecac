use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "MCPDEX_GATEWAY_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "MCPDEX_GATEWAY_STORAGE_BACKEND";
pub const REDIS_URL_ENV: &str = "MCPDEX_GATEWAY_REDIS_URL";
pub const REDIS_KEY_PREFIX_ENV: &str = "MCPDEX_GATEWAY_REDIS_KEY_PREFIX";
pub const ENRICHER_ENV: &str = "MCPDEX_GATEWAY_ENRICHER";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const OPENAI_BASE_URL_ENV: &str = "MCPDEX_GATEWAY_OPENAI_BASE_URL";
pub const OPENAI_MODEL_ENV: &str = "MCPDEX_GATEWAY_OPENAI_MODEL";
pub const ENRICHMENT_TIMEOUT_ENV: &str = "MCPDEX_GATEWAY_ENRICHMENT_TIMEOUT_SECS";
pub const LOG_FORMAT_ENV: &str = "MCPDEX_GATEWAY_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_REDIS_KEY_PREFIX: &str = "";
pub const DEFAULT_ENRICHMENT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "redis")]
    Redis,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnricherArg {
    #[value(name = "template")]
    Template,
    #[value(name = "openai")]
    OpenAi,
}

impl Display for EnricherArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EnricherArg::Template => write!(f, "template"),
            EnricherArg::OpenAi => write!(f, "openai"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "pretty")]
    Pretty,
    #[value(name = "json")]
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "mcpdex-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = REDIS_URL_ENV, required_if_eq("storage", "redis"))]
    pub redis_url: Option<String>,

    #[arg(long, env = REDIS_KEY_PREFIX_ENV, default_value = DEFAULT_REDIS_KEY_PREFIX)]
    pub redis_key_prefix: String,

    #[arg(
        long,
        env = ENRICHER_ENV,
        value_enum,
        default_value_t = EnricherArg::Template
    )]
    pub enricher: EnricherArg,

    #[arg(
        long,
        env = OPENAI_API_KEY_ENV,
        hide_env_values = true,
        required_if_eq("enricher", "openai")
    )]
    pub openai_api_key: Option<String>,

    #[arg(
        long,
        env = OPENAI_BASE_URL_ENV,
        default_value = mcpdex_enrichment::openai::DEFAULT_BASE_URL
    )]
    pub openai_base_url: String,

    #[arg(
        long,
        env = OPENAI_MODEL_ENV,
        default_value = mcpdex_enrichment::openai::DEFAULT_MODEL
    )]
    pub openai_model: String,

    #[arg(
        long,
        env = ENRICHMENT_TIMEOUT_ENV,
        default_value_t = DEFAULT_ENRICHMENT_TIMEOUT_SECS
    )]
    pub enrichment_timeout_secs: u64,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Pretty)]
    pub log_format: LogFormatArg,
}
