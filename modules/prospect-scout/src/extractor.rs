//! Converts raw search output into validated investor records.
//!
//! The model is asked for a bare JSON array but routinely wraps it in a
//! fenced code block, so normalization (fence stripping) is kept separate
//! from decoding and each is testable with literal inputs.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use ai_client::TextGenerator;
use prospect_common::{
    normalize_email, normalize_linkedin_url, InvestorRecord, OutreachStatus, SearchResult,
    NOT_FOUND,
};

const EXTRACTION_CONTRACT: &str = r#"Please analyze these results and extract a structured list of individual investors and firms.

For each investor, provide:
- full_name: Person or firm name
- title: Their role/title
- company: Company/Fund name
- linkedin_url: LinkedIn profile URL (if found, otherwise "Not found")
- email: Email address (if found, otherwise "Not found")
- location: City in UAE
- investment_focus: What sectors/stages they focus on
- portfolio_companies: Notable companies they've invested in (if mentioned)
- source_url: Where this info came from

Use the literal string "Not found" for any value that is missing.
Return ONLY a valid JSON array of objects. No other text.
Example format:
[
  {
    "full_name": "John Smith",
    "title": "Managing Partner",
    "company": "ABC Ventures",
    "linkedin_url": "https://linkedin.com/in/johnsmith",
    "email": "john@abcventures.com",
    "location": "Dubai",
    "investment_focus": "Early-stage SaaS, fintech",
    "portfolio_companies": "Company A, Company B",
    "source_url": "https://example.com"
  }
]"#;

/// What the model returns for each investor. Every field is optional;
/// missing keys become the sentinel during validation rather than failing
/// the record.
#[derive(Debug, Deserialize)]
struct RawInvestor {
    full_name: Option<String>,
    title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    linkedin_url: Option<String>,
    email: Option<String>,
    investment_focus: Option<String>,
    portfolio_companies: Option<String>,
    source_url: Option<String>,
}

pub struct RecordExtractor {
    generator: Box<dyn TextGenerator>,
}

impl RecordExtractor {
    pub fn new(generator: Box<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Turn raw search results into structured records. A malformed model
    /// response yields an empty list, never an error: the orchestrator
    /// treats that as "no investors found" and halts the run.
    pub async fn extract(&self, raw_results: &[SearchResult]) -> Result<Vec<InvestorRecord>> {
        let prompt = build_extraction_prompt(raw_results)?;
        let response = self.generator.generate(&prompt).await?;
        let records = parse_investors(&response);
        info!(count = records.len(), "Extracted investor records");
        Ok(records)
    }
}

fn build_extraction_prompt(raw_results: &[SearchResult]) -> Result<String> {
    let raw_json =
        serde_json::to_string_pretty(raw_results).context("serialize raw search results")?;
    Ok(format!(
        "Here are the search results about UAE investors:\n\n{raw_json}\n\n{EXTRACTION_CONTRACT}"
    ))
}

/// Parse the model response into records.
fn parse_investors(response: &str) -> Vec<InvestorRecord> {
    let cleaned = strip_code_fences(response);
    let raw: Vec<RawInvestor> = match serde_json::from_str(&cleaned) {
        Ok(raw) => raw,
        Err(e) => {
            let preview: String = response.chars().take(500).collect();
            warn!(error = %e, response = preview.as_str(), "Investor JSON failed to parse");
            return Vec::new();
        }
    };
    raw.into_iter().filter_map(validate_record).collect()
}

/// Strip a wrapping fenced code block, with or without a language tag.
fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }
    let mut lines: Vec<&str> = trimmed.lines().collect();
    lines.remove(0);
    if let Some(last) = lines.last() {
        if last.trim_start().starts_with("```") {
            lines.pop();
        }
    }
    lines.join("\n").trim().to_string()
}

/// Apply the record invariants. A record without a usable name is dropped;
/// every other problem is repaired field by field.
fn validate_record(raw: RawInvestor) -> Option<InvestorRecord> {
    let full_name = raw
        .full_name
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())?;

    Some(InvestorRecord {
        full_name,
        title: field_or_sentinel(raw.title),
        company: field_or_sentinel(raw.company),
        location: field_or_sentinel(raw.location),
        linkedin_url: normalize_linkedin_url(field_or_sentinel(raw.linkedin_url)),
        email: normalize_email(field_or_sentinel(raw.email)),
        investment_focus: field_or_sentinel(raw.investment_focus),
        portfolio_companies: field_or_sentinel(raw.portfolio_companies),
        personalized_message: String::new(),
        outreach_status: OutreachStatus::default(),
        date_added: None,
        source_url: field_or_sentinel(raw.source_url),
    })
}

fn field_or_sentinel(value: Option<String>) -> String {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| NOT_FOUND.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedGenerator;

    const ONE_INVESTOR: &str = r#"[{"full_name":"Jane Doe","title":"Partner","company":"Acme Capital","linkedin_url":"Not found","email":"jane@acme.vc","location":"Dubai","investment_focus":"SaaS","portfolio_companies":"X, Y","source_url":"http://x"}]"#;

    fn extractor_with(response: &str) -> RecordExtractor {
        RecordExtractor::new(Box::new(FixedGenerator::new(response)))
    }

    fn raw_input() -> Vec<SearchResult> {
        vec![SearchResult {
            query: "UAE investors".into(),
            results: "…".into(),
        }]
    }

    #[test]
    fn strips_fences_with_language_tag() {
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]");
    }

    #[test]
    fn strips_fences_without_language_tag() {
        assert_eq!(strip_code_fences("```\n[1]\n```"), "[1]");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fences("  [1]  "), "[1]");
    }

    #[tokio::test]
    async fn extracts_exact_field_values() {
        let records = extractor_with(ONE_INVESTOR)
            .extract(&raw_input())
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.full_name, "Jane Doe");
        assert_eq!(record.title, "Partner");
        assert_eq!(record.company, "Acme Capital");
        assert_eq!(record.linkedin_url, NOT_FOUND);
        assert_eq!(record.email, "jane@acme.vc");
        assert_eq!(record.location, "Dubai");
        assert_eq!(record.investment_focus, "SaaS");
        assert_eq!(record.portfolio_companies, "X, Y");
        assert_eq!(record.source_url, "http://x");
        assert_eq!(record.personalized_message, "");
        assert_eq!(record.outreach_status, OutreachStatus::NotContacted);
        assert_eq!(record.date_added, None);
    }

    #[tokio::test]
    async fn fenced_and_unfenced_responses_parse_identically() {
        let plain = extractor_with(ONE_INVESTOR)
            .extract(&raw_input())
            .await
            .unwrap();
        let fenced = extractor_with(&format!("```json\n{ONE_INVESTOR}\n```"))
            .extract(&raw_input())
            .await
            .unwrap();
        let bare_fence = extractor_with(&format!("```\n{ONE_INVESTOR}\n```"))
            .extract(&raw_input())
            .await
            .unwrap();
        assert_eq!(plain, fenced);
        assert_eq!(plain, bare_fence);
    }

    #[tokio::test]
    async fn returns_one_record_per_object() {
        let three = r#"[
            {"full_name": "A"},
            {"full_name": "B"},
            {"full_name": "C"}
        ]"#;
        let records = extractor_with(three).extract(&raw_input()).await.unwrap();
        assert_eq!(records.len(), 3);
        let names: Vec<_> = records.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[tokio::test]
    async fn missing_keys_default_to_sentinel() {
        let records = extractor_with(r#"[{"full_name": "Jane Doe"}]"#)
            .extract(&raw_input())
            .await
            .unwrap();
        let record = &records[0];
        assert_eq!(record.title, NOT_FOUND);
        assert_eq!(record.email, NOT_FOUND);
        assert_eq!(record.linkedin_url, NOT_FOUND);
        assert_eq!(record.source_url, NOT_FOUND);
    }

    #[tokio::test]
    async fn nameless_record_is_dropped_alone() {
        let mixed = r#"[{"full_name": ""}, {"full_name": "Kept"}]"#;
        let records = extractor_with(mixed).extract(&raw_input()).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].full_name, "Kept");
    }

    #[tokio::test]
    async fn malformed_response_yields_empty_not_error() {
        let records = extractor_with("I could not find any investors, sorry!")
            .extract(&raw_input())
            .await
            .unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn invalid_url_and_email_are_downgraded() {
        let sloppy = r#"[{"full_name": "Jane", "linkedin_url": "see profile", "email": "jane at acme"}]"#;
        let records = extractor_with(sloppy).extract(&raw_input()).await.unwrap();
        assert_eq!(records[0].linkedin_url, NOT_FOUND);
        assert_eq!(records[0].email, NOT_FOUND);
    }
}
