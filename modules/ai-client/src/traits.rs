use anyhow::Result;
use async_trait::async_trait;

/// Narrow seam over a black-box text generation service.
///
/// Pipeline stages depend on this trait rather than on a concrete provider,
/// so extraction and enrichment logic can run against canned fakes in tests.
/// Each call is one independent request; no session state is shared.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
