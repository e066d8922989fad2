use crate::app::ports::{NavigateOptions, PageFetcher};
use crate::error::{Result, SyllabusError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Fetches syllabus pages over plain HTTP. The PublicSubjects page is
/// rendered server-side, so the response body already holds the tables.
pub struct ReqwestPageFetcher {
    client: reqwest::Client,
}

impl Default for ReqwestPageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestPageFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for ReqwestPageFetcher {
    #[instrument(skip(self, options))]
    async fn navigate(&self, url: &str, options: &NavigateOptions) -> Result<String> {
        let navigation_error = |message: String| SyllabusError::Navigation {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .timeout(options.timeout)
            .send()
            .await
            .map_err(|e| navigation_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(navigation_error(format!("request failed with status: {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| navigation_error(e.to_string()))?;
        debug!("Fetched {} bytes", body.len());
        Ok(body)
    }
}
