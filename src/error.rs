use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// Fetch failed, returned a non-success status, or produced an unusable payload.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid date format: `{input}` (expected {expected})")]
    InvalidDateFormat {
        input: String,
        expected: &'static str,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl ChartError {
    pub(crate) fn iso_date(input: &str) -> Self {
        Self::InvalidDateFormat {
            input: input.to_owned(),
            expected: "YYYY-MM-DD",
        }
    }

    pub(crate) fn date_key(input: &str) -> Self {
        Self::InvalidDateFormat {
            input: input.to_owned(),
            expected: "DD.MM.YY",
        }
    }
}
