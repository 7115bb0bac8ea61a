use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ai_client::{Claude, DEFAULT_MODEL};
use prospect_common::store::CsvStore;
use prospect_common::Config;
use prospect_scout::enricher::{MessageEnricher, MESSAGE_MAX_TOKENS};
use prospect_scout::extractor::RecordExtractor;
use prospect_scout::limiter::FixedCooldown;
use prospect_scout::pipeline::ResearchPipeline;
use prospect_scout::searcher::ClaudeSearcher;

/// Output budget for the extraction response, which carries the whole batch.
const EXTRACTION_MAX_TOKENS: u32 = 6000;

#[derive(Parser, Debug)]
#[command(
    name = "prospect-scout",
    about = "Research UAE investors and write the enriched record set to CSV"
)]
struct Args {
    /// Target industry description (overrides TARGET_INDUSTRY)
    #[arg(long)]
    industry: Option<String>,

    /// Output CSV path (overrides OUTPUT_CSV)
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("prospect_scout=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let mut config = Config::scout_from_env();
    if let Some(industry) = args.industry {
        config.target_industry = industry;
    }
    if let Some(output) = args.output {
        config.output_csv = output;
    }
    config.log_redacted();

    info!("Prospect scout starting...");

    let searcher = ClaudeSearcher::new(&config.anthropic_api_key, &config.target_industry);
    let extractor = RecordExtractor::new(Box::new(
        Claude::new(&config.anthropic_api_key, DEFAULT_MODEL).with_max_tokens(EXTRACTION_MAX_TOKENS),
    ));
    let enricher = MessageEnricher::new(
        Box::new(Claude::new(&config.anthropic_api_key, DEFAULT_MODEL).with_max_tokens(MESSAGE_MAX_TOKENS)),
        Box::new(FixedCooldown::default()),
        &config.target_industry,
    );
    let store = CsvStore::new(&config.output_csv);

    let pipeline = ResearchPipeline::new(
        Box::new(searcher),
        extractor,
        enricher,
        store,
        &config.target_industry,
    );

    match pipeline.run().await? {
        Some(stats) => info!("Research complete. {stats}"),
        None => info!("Research halted: nothing to enrich or publish"),
    }

    Ok(())
}
