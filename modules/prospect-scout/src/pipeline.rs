//! Sequences the research stages and reports the run outcome.

use std::fmt;

use anyhow::Result;
use tracing::{info, warn};

use prospect_common::store::CsvStore;
use prospect_common::InvestorRecord;

use crate::enricher::MessageEnricher;
use crate::extractor::RecordExtractor;
use crate::searcher::{combined_query, InvestorSearcher};

pub struct ResearchPipeline {
    searcher: Box<dyn InvestorSearcher>,
    extractor: RecordExtractor,
    enricher: MessageEnricher,
    store: CsvStore,
    target_industry: String,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub total: usize,
    pub with_linkedin: usize,
    pub with_email: usize,
}

impl RunStats {
    pub fn from_records(records: &[InvestorRecord]) -> Self {
        Self {
            total: records.len(),
            with_linkedin: records.iter().filter(|r| r.has_linkedin()).count(),
            with_email: records.iter().filter(|r| r.has_email()).count(),
        }
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} investors found, {} with LinkedIn, {} with email",
            self.total, self.with_linkedin, self.with_email
        )
    }
}

impl ResearchPipeline {
    pub fn new(
        searcher: Box<dyn InvestorSearcher>,
        extractor: RecordExtractor,
        enricher: MessageEnricher,
        store: CsvStore,
        target_industry: &str,
    ) -> Self {
        Self {
            searcher,
            extractor,
            enricher,
            store,
            target_industry: target_industry.to_string(),
        }
    }

    /// Run search → extract → enrich → save. Returns `None` when extraction
    /// produced nothing: the run halts before any store write or enrichment
    /// call.
    pub async fn run(&self) -> Result<Option<RunStats>> {
        let query = combined_query(&self.target_industry);
        info!(searcher = self.searcher.name(), query, "Searching for investors");

        // A failed search degrades to an empty raw set; the run then halts
        // through the zero-records path without prompting the extractor.
        let raw = match self.searcher.search(&query).await {
            Ok(result) => vec![result],
            Err(e) => {
                warn!(error = %e, "Search failed");
                Vec::new()
            }
        };

        let records = if raw.is_empty() {
            Vec::new()
        } else {
            self.extractor.extract(&raw).await?
        };

        if records.is_empty() {
            warn!("No investors found. Try adjusting search parameters.");
            return Ok(None);
        }

        let enriched = self.enricher.enrich(records).await;
        self.store.save(&enriched)?;

        log_preview(&enriched);
        Ok(Some(RunStats::from_records(&enriched)))
    }
}

fn log_preview(records: &[InvestorRecord]) {
    for record in records.iter().take(3) {
        let message_preview: String = record.personalized_message.chars().take(80).collect();
        info!(
            investor = record.full_name.as_str(),
            company = record.company.as_str(),
            location = record.location.as_str(),
            message = message_preview.as_str(),
            "Sample result"
        );
    }
}
