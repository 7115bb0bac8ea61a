//! Inter-request pacing for the enrichment loop.

use std::time::Duration;

use async_trait::async_trait;

/// Pause between generation requests to avoid rate limits.
pub const ENRICH_COOLDOWN: Duration = Duration::from_secs(3);

/// Pacing policy applied strictly between consecutive generation calls.
/// Injectable so tests run without real delays. The pipeline never issues
/// concurrent calls, so the limiter only has to space them out.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn pause(&self);
}

/// Fixed cooldown between requests.
pub struct FixedCooldown {
    delay: Duration,
}

impl FixedCooldown {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for FixedCooldown {
    fn default() -> Self {
        Self::new(ENRICH_COOLDOWN)
    }
}

#[async_trait]
impl RateLimiter for FixedCooldown {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}
