//! Personalized outreach message generation, one record at a time.

use chrono::Utc;
use tracing::{info, warn};

use ai_client::TextGenerator;
use prospect_common::{InvestorRecord, OutreachStatus};

use crate::limiter::RateLimiter;

/// LinkedIn connection-request limit; messages are clamped to it.
pub const MESSAGE_CHAR_LIMIT: usize = 300;

/// Output budget for one message.
pub const MESSAGE_MAX_TOKENS: u32 = 1000;

const PITCH: &str = "I'm building Matchr - a swipe-first creator-brand matching platform \
that's reimagining creator commerce. We're making it effortless for brands (especially SMBs) \
to discover and partner with creators at the perfect timing, powered by real audience intelligence.";

pub struct MessageEnricher {
    generator: Box<dyn TextGenerator>,
    limiter: Box<dyn RateLimiter>,
    target_industry: String,
}

impl MessageEnricher {
    pub fn new(
        generator: Box<dyn TextGenerator>,
        limiter: Box<dyn RateLimiter>,
        target_industry: &str,
    ) -> Self {
        Self {
            generator,
            limiter,
            target_industry: target_industry.to_string(),
        }
    }

    /// Add the outreach fields to every record, preserving order. A failed
    /// generation call falls back to the template message; one bad record
    /// never aborts the run.
    pub async fn enrich(&self, records: Vec<InvestorRecord>) -> Vec<InvestorRecord> {
        let total = records.len();
        let today = Utc::now().date_naive();
        let mut enriched = Vec::with_capacity(total);

        for (i, mut record) in records.into_iter().enumerate() {
            info!(
                n = i + 1,
                total,
                investor = record.full_name.as_str(),
                "Generating personalized message"
            );

            let message = match self.generator.generate(&message_prompt(&record)).await {
                Ok(text) => clamp_chars(text.trim(), MESSAGE_CHAR_LIMIT),
                Err(e) => {
                    warn!(
                        investor = record.full_name.as_str(),
                        error = %e,
                        "Message generation failed, using fallback template"
                    );
                    fallback_message(&record.full_name, &self.target_industry)
                }
            };

            record.personalized_message = message;
            record.outreach_status = OutreachStatus::NotContacted;
            record.date_added = Some(today);
            enriched.push(record);

            // Cooldown strictly between records, never after the last.
            if i + 1 < total {
                self.limiter.pause().await;
            }
        }

        enriched
    }
}

fn message_prompt(record: &InvestorRecord) -> String {
    format!(
        r#"Write a highly personalized LinkedIn connection request message for this investor:

Name: {}
Company: {}
Title: {}
Investment Focus: {}
Portfolio: {}

Context: {PITCH}

The message should be:
- Under 300 characters (LinkedIn limit)
- Reference their investment focus or portfolio naturally
- Not salesy, just genuine connection
- Professional but warm

Return ONLY the message text, nothing else."#,
        record.full_name,
        record.company,
        record.title,
        record.investment_focus,
        record.portfolio_companies,
    )
}

/// Deterministic fallback when generation fails for one record.
fn fallback_message(full_name: &str, target_industry: &str) -> String {
    let first_name = full_name.split_whitespace().next().unwrap_or(full_name);
    format!(
        "Hi {first_name}, interested in discussing opportunities in {target_industry}. Would love to connect."
    )
}

/// Truncate to at most `limit` characters, on a char boundary.
fn clamp_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use prospect_common::NOT_FOUND;

    use super::*;
    use crate::testing::{CountingLimiter, FailingGenerator, FixedGenerator};

    fn record(name: &str) -> InvestorRecord {
        InvestorRecord {
            full_name: name.into(),
            title: "Partner".into(),
            company: "Acme Capital".into(),
            location: "Dubai".into(),
            linkedin_url: NOT_FOUND.into(),
            email: NOT_FOUND.into(),
            investment_focus: "SaaS".into(),
            portfolio_companies: "X, Y".into(),
            personalized_message: String::new(),
            outreach_status: OutreachStatus::default(),
            date_added: None,
            source_url: NOT_FOUND.into(),
        }
    }

    fn enricher(generator: Box<dyn TextGenerator>) -> MessageEnricher {
        MessageEnricher::new(generator, Box::new(CountingLimiter::default()), "creator economy")
    }

    #[tokio::test]
    async fn sets_message_status_and_date() {
        let enriched = enricher(Box::new(FixedGenerator::new("Hi Jane, great SaaS thesis.")))
            .enrich(vec![record("Jane Doe")])
            .await;
        let record = &enriched[0];
        assert_eq!(record.personalized_message, "Hi Jane, great SaaS thesis.");
        assert_eq!(record.outreach_status, OutreachStatus::NotContacted);
        assert_eq!(record.date_added, Some(Utc::now().date_naive()));
    }

    #[tokio::test]
    async fn long_message_is_clamped_to_the_limit() {
        let long = "x".repeat(MESSAGE_CHAR_LIMIT + 100);
        let enriched = enricher(Box::new(FixedGenerator::new(&long)))
            .enrich(vec![record("Jane Doe")])
            .await;
        assert_eq!(
            enriched[0].personalized_message.chars().count(),
            MESSAGE_CHAR_LIMIT
        );
    }

    #[tokio::test]
    async fn failed_generation_uses_exact_fallback_template() {
        let enriched = enricher(Box::new(FailingGenerator))
            .enrich(vec![record("Jane Doe")])
            .await;
        assert_eq!(
            enriched[0].personalized_message,
            "Hi Jane, interested in discussing opportunities in creator economy. Would love to connect."
        );
    }

    #[tokio::test]
    async fn order_is_preserved() {
        let enriched = enricher(Box::new(FixedGenerator::new("hello")))
            .enrich(vec![record("Jane Doe"), record("Omar Haddad"), record("Sara Al Amiri")])
            .await;
        let names: Vec<_> = enriched.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, ["Jane Doe", "Omar Haddad", "Sara Al Amiri"]);
    }

    #[tokio::test]
    async fn cooldown_runs_between_records_only() {
        let limiter = CountingLimiter::default();
        let pauses = Arc::clone(&limiter.pauses);
        let enricher = MessageEnricher::new(
            Box::new(FixedGenerator::new("hello")),
            Box::new(limiter),
            "creator economy",
        );
        enricher
            .enrich(vec![record("A"), record("B"), record("C")])
            .await;
        assert_eq!(pauses.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn fallback_uses_first_name_token() {
        assert_eq!(
            fallback_message("Omar Haddad", "fintech"),
            "Hi Omar, interested in discussing opportunities in fintech. Would love to connect."
        );
    }

    #[test]
    fn clamp_respects_char_boundaries() {
        let text = "é".repeat(10);
        assert_eq!(clamp_chars(&text, 4).chars().count(), 4);
    }
}
