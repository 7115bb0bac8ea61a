//! Deterministic fakes for pipeline tests: canned generators, canned
//! searchers, and a limiter that counts instead of sleeping.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use ai_client::TextGenerator;
use prospect_common::SearchResult;

use crate::limiter::RateLimiter;
use crate::searcher::InvestorSearcher;

/// Generator that returns the same canned response for every prompt.
pub struct FixedGenerator {
    response: String,
}

impl FixedGenerator {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for FixedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.response.clone())
    }
}

/// Generator that always fails, for exercising fallback paths.
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(anyhow!("simulated generation failure"))
    }
}

/// Searcher that returns canned result text.
pub struct FixedSearcher {
    results: String,
}

impl FixedSearcher {
    pub fn new(results: &str) -> Self {
        Self {
            results: results.to_string(),
        }
    }
}

#[async_trait]
impl InvestorSearcher for FixedSearcher {
    async fn search(&self, query: &str) -> Result<SearchResult> {
        Ok(SearchResult {
            query: query.to_string(),
            results: self.results.clone(),
        })
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Searcher that always fails.
pub struct FailingSearcher;

#[async_trait]
impl InvestorSearcher for FailingSearcher {
    async fn search(&self, _query: &str) -> Result<SearchResult> {
        Err(anyhow!("simulated search failure"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Limiter that counts pauses instead of sleeping. Clone the counter handle
/// before boxing to assert on it afterwards.
#[derive(Default)]
pub struct CountingLimiter {
    pub pauses: Arc<AtomicUsize>,
}

#[async_trait]
impl RateLimiter for CountingLimiter {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}
