//! Substring search over the full registry.
//!
//! There is no index: every search reads every record, keeps the ones whose
//! name, repository URL or description contains the query, and ranks them by
//! [`match_score`].

use mcpdex_core::ServerRecord;

pub const MAX_MATCH_SCORE: u32 = 100;

const EXACT_NAME: u32 = 100;
const NAME_CONTAINS: u32 = 80;
const DESCRIPTION_CONTAINS: u32 = 60;
const WORD_IN_NAME: u32 = 20;
const WORD_IN_DESCRIPTION: u32 = 10;

/// A search query, normalized once for all records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
    words: Vec<String>,
}

impl Query {
    /// Returns `None` for a blank query.
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim().to_lowercase();
        if text.is_empty() {
            return None;
        }
        let words = text.split_whitespace().map(str::to_owned).collect();
        Some(Self { text, words })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether `record` passes the inclusion filter.
    pub fn matches(&self, record: &ServerRecord) -> bool {
        record.name.to_lowercase().contains(&self.text)
            || record.repository_url.to_lowercase().contains(&self.text)
            || record
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&self.text))
    }

    /// Relevance of a record, from 0 to 100.
    ///
    /// The repository URL takes part in the inclusion filter but not in the
    /// score, so a URL-only match scores 0.
    pub fn score(&self, record: &ServerRecord) -> u8 {
        match_score(self, &record.name, record.description.as_deref().unwrap_or(""))
    }
}

/// Scores `name` and `description` against `query`.
pub fn match_score(query: &Query, name: &str, description: &str) -> u8 {
    let name = name.to_lowercase();
    let description = description.to_lowercase();
    let mut score = 0;

    if name == query.text {
        score += EXACT_NAME;
    } else if name.contains(&query.text) {
        score += NAME_CONTAINS;
    }

    if description.contains(&query.text) {
        score += DESCRIPTION_CONTAINS;
    }

    for word in &query.words {
        if name.contains(word.as_str()) {
            score += WORD_IN_NAME;
        }
        if description.contains(word.as_str()) {
            score += WORD_IN_DESCRIPTION;
        }
    }

    score.min(MAX_MATCH_SCORE) as u8
}

/// Keeps matching records and orders them by score, best first.
///
/// Equal scores keep their input order.
pub fn rank(query: &Query, records: Vec<ServerRecord>) -> Vec<(ServerRecord, u8)> {
    let mut scored: Vec<(ServerRecord, u8)> = records
        .into_iter()
        .filter(|record| query.matches(record))
        .map(|record| {
            let score = query.score(&record);
            (record, score)
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|(_, a), (_, b)| b.cmp(a));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use mcpdex_core::ServerId;

    fn record(id: &str, name: &str, url: &str, description: Option<&str>) -> ServerRecord {
        let mut record = ServerRecord::new(
            ServerId::new_unchecked(id),
            name,
            url,
            Timestamp::UNIX_EPOCH,
        );
        record.description = description.map(str::to_owned);
        record
    }

    fn score(query: &str, name: &str, description: &str) -> u8 {
        match_score(&Query::parse(query).unwrap(), name, description)
    }

    #[test]
    fn blank_query_is_rejected() {
        assert!(Query::parse("").is_none());
        assert!(Query::parse("  \t ").is_none());
    }

    #[test]
    fn query_is_lowercased_and_split() {
        let query = Query::parse("  PDF  Tools ").unwrap();
        assert_eq!(query.as_str(), "pdf  tools");
        assert_eq!(query.words, vec!["pdf", "tools"]);
    }

    #[test]
    fn substring_in_name_and_description_clamps_to_max() {
        // 80 + 60 + 20 + 10
        let s = score(
            "pdf",
            "pdf-mcp-server",
            "MCP server specialized in PDF document processing",
        );
        assert_eq!(s, 100);
    }

    #[test]
    fn exact_name_match() {
        assert_eq!(score("mcp-toolkit", "mcp-toolkit", ""), 100);
        assert_eq!(score("MCP-Toolkit", "mcp-toolkit", ""), 100);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(score("  pdf tools ", "pdf tools", ""), 100);
    }

    #[test]
    fn description_only_match() {
        // 60 + 10
        assert_eq!(score("document", "pdf-mcp-server", "PDF document processing"), 70);
    }

    #[test]
    fn words_score_independently() {
        // no full-query match; "data" in name and description, "rust" nowhere
        assert_eq!(score("data rust", "data-analysis-mcp", "data connectors"), 30);
    }

    #[test]
    fn unrelated_query_scores_zero() {
        assert_eq!(score("xyz123", "mcp-js", "JavaScript implementation"), 0);
    }

    #[test]
    fn url_only_match_is_kept_with_zero_score() {
        let query = Query::parse("web-ai").unwrap();
        let records = vec![record("server-a", "mcp-js", "https://github.com/web-ai/mcp-js", None)];

        let ranked = rank(&query, records);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].1, 0);
    }

    #[test]
    fn non_matching_records_are_excluded() {
        let query = Query::parse("xyz123").unwrap();
        let records = vec![
            record("server-a", "mcp-js", "https://github.com/web-ai/mcp-js", Some("web")),
            record("server-b", "pdf-mcp-server", "https://github.com/pdf-ai/pdf", None),
        ];

        assert!(rank(&query, records).is_empty());
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let query = Query::parse("mcp").unwrap();
        let records = vec![
            record("server-a", "alpha", "https://github.com/x/mcp-alpha", None),
            record("server-b", "mcp", "https://github.com/x/b", None),
            record("server-c", "beta", "https://github.com/x/mcp-beta", None),
            record("server-d", "mcp-js", "https://github.com/x/d", None),
        ];

        let ids: Vec<_> = rank(&query, records)
            .into_iter()
            .map(|(r, s)| (r.id.as_str().to_owned(), s))
            .collect();

        assert_eq!(
            ids,
            vec![
                ("server-b".to_owned(), 100),
                ("server-d".to_owned(), 100),
                ("server-a".to_owned(), 0),
                ("server-c".to_owned(), 0),
            ]
        );
    }
}
