//! Web discovery of candidate investors via the hosted search tool.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::Rng;
use tracing::{info, warn};

use ai_client::{Claude, DEFAULT_MODEL};
use prospect_common::SearchResult;

/// Output budget for the search response.
const SEARCH_MAX_TOKENS: u32 = 4000;

/// Max attempts for the search call; it is the flakiest network hop in a run.
const SEARCH_MAX_ATTEMPTS: u32 = 3;
/// Base backoff duration. Actual delay is base * 3^attempt plus 0-1s jitter.
const SEARCH_RETRY_BASE: Duration = Duration::from_secs(3);

#[async_trait]
pub trait InvestorSearcher: Send + Sync {
    /// Run one search and return the raw result text paired with the query.
    async fn search(&self, query: &str) -> Result<SearchResult>;
    fn name(&self) -> &str;
}

/// Searcher backed by Claude with the server-side web search tool.
pub struct ClaudeSearcher {
    claude: Claude,
    target_industry: String,
}

impl ClaudeSearcher {
    pub fn new(api_key: &str, target_industry: &str) -> Self {
        Self {
            claude: Claude::new(api_key, DEFAULT_MODEL).with_max_tokens(SEARCH_MAX_TOKENS),
            target_industry: target_industry.to_string(),
        }
    }

    fn prompt(&self) -> String {
        format!(
            r#"Search for UAE investors, VCs, and angel investors in: {}

Find at least 10-15 specific investors in the UAE (Dubai, Abu Dhabi, Sharjah).

For each investor, extract:
1. Full name (person or firm)
2. Title/role
3. Company/Fund name
4. LinkedIn profile URL (search for it)
5. Email (if publicly available)
6. Investment focus/sectors
7. Notable portfolio companies
8. Location in UAE

Provide detailed results with real names and companies. Format as structured data."#,
            self.target_industry
        )
    }
}

#[async_trait]
impl InvestorSearcher for ClaudeSearcher {
    async fn search(&self, query: &str) -> Result<SearchResult> {
        let prompt = self.prompt();
        let mut attempt = 0;
        loop {
            match self.claude.search(&prompt).await {
                Ok(results) => {
                    info!(query, chars = results.len(), "Search completed");
                    return Ok(SearchResult {
                        query: query.to_string(),
                        results,
                    });
                }
                Err(e) => {
                    attempt += 1;
                    if attempt >= SEARCH_MAX_ATTEMPTS {
                        return Err(e).context("search request failed");
                    }
                    let backoff = SEARCH_RETRY_BASE * 3u32.pow(attempt - 1);
                    let jitter = Duration::from_millis(rand::rng().random_range(0..1000));
                    warn!(
                        attempt,
                        backoff_secs = backoff.as_secs(),
                        error = %e,
                        "Search call failed, retrying after backoff"
                    );
                    tokio::time::sleep(backoff + jitter).await;
                }
            }
        }
    }

    fn name(&self) -> &str {
        "claude-web-search"
    }
}

/// The single combined query issued per run.
pub fn combined_query(target_industry: &str) -> String {
    format!(
        "UAE Dubai Abu Dhabi venture capital investors angel investors family offices {target_industry}"
    )
}
