//! End-to-end pipeline tests with deterministic fakes: canned search text →
//! extraction → enrichment → CSV, no network and no sleeping.

use prospect_common::store::CsvStore;
use prospect_common::NOT_FOUND;
use prospect_scout::enricher::MessageEnricher;
use prospect_scout::extractor::RecordExtractor;
use prospect_scout::pipeline::{ResearchPipeline, RunStats};
use prospect_scout::testing::{
    CountingLimiter, FailingGenerator, FailingSearcher, FixedGenerator, FixedSearcher,
};

const EXTRACTION_RESPONSE: &str = r#"```json
[
  {
    "full_name": "Jane Doe",
    "title": "Partner",
    "company": "Acme Capital",
    "linkedin_url": "https://linkedin.com/in/janedoe",
    "email": "jane@acme.vc",
    "location": "Dubai",
    "investment_focus": "SaaS",
    "portfolio_companies": "X, Y",
    "source_url": "http://x"
  },
  {
    "full_name": "Omar Haddad",
    "title": "Angel Investor",
    "company": "Not found",
    "linkedin_url": "Not found",
    "email": "Not found",
    "location": "Abu Dhabi",
    "investment_focus": "Marketplaces",
    "portfolio_companies": "Not found",
    "source_url": "https://example.com/list"
  }
]
```"#;

fn pipeline_with(
    searcher: Box<dyn prospect_scout::searcher::InvestorSearcher>,
    extraction_response: &str,
    store: CsvStore,
) -> ResearchPipeline {
    let extractor = RecordExtractor::new(Box::new(FixedGenerator::new(extraction_response)));
    let enricher = MessageEnricher::new(
        Box::new(FailingGenerator),
        Box::new(CountingLimiter::default()),
        "creator economy",
    );
    ResearchPipeline::new(searcher, extractor, enricher, store, "creator economy")
}

#[tokio::test]
async fn full_run_writes_enriched_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("investors.csv");
    let pipeline = pipeline_with(
        Box::new(FixedSearcher::new("raw investor notes")),
        EXTRACTION_RESPONSE,
        CsvStore::new(&path),
    );

    let stats = pipeline.run().await.unwrap().expect("run should produce records");
    assert_eq!(
        stats,
        RunStats {
            total: 2,
            with_linkedin: 1,
            with_email: 1,
        }
    );

    let table = CsvStore::new(&path).load().unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(0, "full_name"), Some("Jane Doe"));
    assert_eq!(table.get(1, "full_name"), Some("Omar Haddad"));
    assert_eq!(table.get(1, "company"), Some(NOT_FOUND));
    // Enrichment fell back to the deterministic template.
    assert_eq!(
        table.get(0, "personalized_message"),
        Some("Hi Jane, interested in discussing opportunities in creator economy. Would love to connect.")
    );
    assert_eq!(table.get(0, "outreach_status"), Some("Not contacted"));
    assert_ne!(table.get(0, "date_added"), Some(""));
}

#[tokio::test]
async fn unparseable_extraction_halts_without_store_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("investors.csv");
    let pipeline = pipeline_with(
        Box::new(FixedSearcher::new("raw investor notes")),
        "no structured data here",
        CsvStore::new(&path),
    );

    let stats = pipeline.run().await.unwrap();
    assert!(stats.is_none());
    assert!(!path.exists());
}

#[tokio::test]
async fn failed_search_halts_without_store_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("investors.csv");
    let pipeline = pipeline_with(
        Box::new(FailingSearcher),
        EXTRACTION_RESPONSE,
        CsvStore::new(&path),
    );

    let stats = pipeline.run().await.unwrap();
    assert!(stats.is_none());
    assert!(!path.exists());
}
