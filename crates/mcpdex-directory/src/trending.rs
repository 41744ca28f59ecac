use mcpdex_core::ServerView;
use std::collections::HashSet;

/// Largest trending list served at once.
pub const MAX_TRENDING_COUNT: usize = 100;

pub const DEFAULT_TRENDING_COUNT: usize = 5;

/// Fills `servers` up to `count` entries from `fallbacks`, skipping ids
/// already present.
pub fn pad(mut servers: Vec<ServerView>, fallbacks: Vec<ServerView>, count: usize) -> Vec<ServerView> {
    servers.truncate(count);
    if servers.len() < count {
        let mut seen: HashSet<_> = servers.iter().map(|s| s.id.clone()).collect();
        let needed = count - servers.len();
        servers.extend(
            fallbacks
                .into_iter()
                .filter(|s| seen.insert(s.id.clone()))
                .take(needed),
        );
    }
    servers
}
