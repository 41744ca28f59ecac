use mcpdex_core::{Metrics, PresentationDefaults, ServerId, ServerView};
use rand::Rng;

/// Source of the built-in entries used when real data is missing.
///
/// One provider feeds both the trending padding and the placeholder values
/// substituted for absent record fields.
pub trait FallbackProvider: Send + Sync + 'static {
    /// Showcase servers, in padding order.
    fn servers(&self) -> Vec<ServerView>;

    /// Placeholder values for one read of one record.
    fn presentation_defaults(&self) -> PresentationDefaults;
}

const DEFAULT_TAGS: [&str; 2] = ["mcp", "server"];
const DEFAULT_LANGUAGE: &str = "Unknown";

const MAX_PLACEHOLDER_STARS: u64 = 5_000;
const MAX_PLACEHOLDER_FORKS: u64 = 500;
const MAX_PLACEHOLDER_VIEWS: u64 = 10_000;

struct Showcase {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    short_description: &'static str,
    repository_url: &'static str,
    metrics: Metrics,
    tags: &'static [&'static str],
    language: &'static str,
    last_updated: &'static str,
    trending_score: f64,
}

const SHOWCASE: [Showcase; 6] = [
    Showcase {
        id: "server-1",
        name: "anthropic-mcp-server",
        description: "Official reference implementation of the Model Context Protocol server by Anthropic",
        short_description: "Official MCP server by Anthropic",
        repository_url: "https://github.com/anthropics/mcp-server",
        metrics: Metrics { stars: 4250, forks: 320, views: 25000 },
        tags: &["mcp", "llm", "anthropic", "claude"],
        language: "Python",
        last_updated: "2 days ago",
        trending_score: 100.0,
    },
    Showcase {
        id: "server-2",
        name: "mcp-toolkit",
        description: "A comprehensive toolkit for building and deploying MCP servers with various integrations",
        short_description: "Comprehensive MCP toolkit",
        repository_url: "https://github.com/ai-community/mcp-toolkit",
        metrics: Metrics { stars: 2800, forks: 410, views: 18000 },
        tags: &["mcp", "toolkit", "integrations", "ai"],
        language: "TypeScript",
        last_updated: "5 days ago",
        trending_score: 95.0,
    },
    Showcase {
        id: "server-3",
        name: "pdf-mcp-server",
        description: "MCP server specialized in PDF document processing, analysis, and data extraction",
        short_description: "PDF processing MCP server",
        repository_url: "https://github.com/pdf-ai/pdf-mcp-server",
        metrics: Metrics { stars: 1950, forks: 280, views: 12000 },
        tags: &["mcp", "pdf", "document-processing", "ai"],
        language: "Python",
        last_updated: "1 week ago",
        trending_score: 90.0,
    },
    Showcase {
        id: "server-4",
        name: "mcp-connect",
        description: "Lightweight MCP server implementation with focus on performance and scalability",
        short_description: "High-performance MCP server",
        repository_url: "https://github.com/mcp-project/mcp-connect",
        metrics: Metrics { stars: 3100, forks: 520, views: 22000 },
        tags: &["mcp", "performance", "scalable", "enterprise"],
        language: "Rust",
        last_updated: "3 days ago",
        trending_score: 92.0,
    },
    Showcase {
        id: "server-5",
        name: "data-analysis-mcp",
        description: "MCP server for data analysis and visualization with multiple data source connectors",
        short_description: "Data analysis MCP server",
        repository_url: "https://github.com/data-tools/data-analysis-mcp",
        metrics: Metrics { stars: 2100, forks: 310, views: 15000 },
        tags: &["mcp", "data-analysis", "visualization", "connectors"],
        language: "Python",
        last_updated: "4 days ago",
        trending_score: 88.0,
    },
    Showcase {
        id: "server-6",
        name: "mcp-js",
        description: "JavaScript implementation of MCP server for web applications and browser environments",
        short_description: "JavaScript MCP server for the web",
        repository_url: "https://github.com/web-ai/mcp-js",
        metrics: Metrics { stars: 1800, forks: 240, views: 9500 },
        tags: &["mcp", "javascript", "web", "browser"],
        language: "JavaScript",
        last_updated: "1 week ago",
        trending_score: 85.0,
    },
];

impl Showcase {
    fn to_view(&self) -> ServerView {
        ServerView {
            id: ServerId::new_unchecked(self.id),
            name: self.name.to_string(),
            repository_url: self.repository_url.to_string(),
            description: Some(self.description.to_string()),
            short_description: Some(self.short_description.to_string()),
            status: None,
            error: None,
            created_at: None,
            updated_at: None,
            stars: self.metrics.stars,
            forks: self.metrics.forks,
            views: self.metrics.views,
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            language: self.language.to_string(),
            last_updated: self.last_updated.to_string(),
            match_score: None,
            trending_score: Some(self.trending_score),
        }
    }
}

/// The built-in showcase catalog with random placeholder metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFallbacks;

impl FallbackProvider for BuiltinFallbacks {
    fn servers(&self) -> Vec<ServerView> {
        SHOWCASE.iter().map(Showcase::to_view).collect()
    }

    fn presentation_defaults(&self) -> PresentationDefaults {
        let mut rng = rand::thread_rng();
        PresentationDefaults {
            metrics: Metrics {
                stars: rng.gen_range(0..MAX_PLACEHOLDER_STARS),
                forks: rng.gen_range(0..MAX_PLACEHOLDER_FORKS),
                views: rng.gen_range(0..MAX_PLACEHOLDER_VIEWS),
            },
            tags: DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}
