pub mod enricher;
pub mod extractor;
pub mod limiter;
pub mod pipeline;
pub mod searcher;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
