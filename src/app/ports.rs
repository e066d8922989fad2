use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Options for a single page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateOptions {
    pub timeout: Duration,
}

impl NavigateOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// Page retrieval. Implementations return the rendered HTML of `url`, or
/// `SyllabusError::Navigation` when the page cannot be loaded in time.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn navigate(&self, url: &str, options: &NavigateOptions) -> Result<String>;
}
