use std::time::Duration;

use tracing::{debug, warn};

use super::{IssueSource, decode_day_batches_value};
use crate::core::DayBatch;
use crate::error::{ChartError, ChartResult};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);

/// Blocking GET against an endpoint returning a JSON array of day batches.
#[derive(Debug, Clone)]
pub struct HttpIssueSource {
    url: String,
    timeout: Duration,
}

impl HttpIssueSource {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl IssueSource for HttpIssueSource {
    fn fetch(&self) -> ChartResult<Vec<DayBatch>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ChartError::Transport(format!("http client error: {e}")))?;

        debug!(url = %self.url, "requesting day batches");
        let payload: serde_json::Value = client
            .get(&self.url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                warn!(url = %self.url, error = %e, "day batch request failed");
                ChartError::Transport(format!("request error: {e}"))
            })?
            .json()
            .map_err(|e| ChartError::Transport(format!("decode error: {e}")))?;

        decode_day_batches_value(payload)
    }
}
