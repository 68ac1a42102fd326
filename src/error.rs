//! Error taxonomy of a sampling run.
//!
//! Every failure is fatal to the run. Variants carry enough context to tell
//! which stage failed and, for per-partition reads, which sample index and
//! partition were involved.
use datafusion::error::DataFusionError;
use thiserror::Error;

pub type SamplingResult<T> = Result<T, SamplingError>;

#[derive(Debug, Error)]
pub enum SamplingError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("failed to list partitions under {location}: {source}")]
    Listing {
        location: String,
        #[source]
        source: object_store::Error,
    },
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
    #[error("failed to count rows of sampled partition #{index} ({locator}): {source}")]
    RowCount {
        index: usize,
        locator: String,
        #[source]
        source: DataFusionError,
    },
    #[error("failed to create session: {0}")]
    Session(#[source] DataFusionError),
    #[error("failed to read sampled dataset: {0}")]
    SampledRead(#[source] DataFusionError),
}

impl SamplingError {
    pub fn configuration(message: impl Into<String>) -> Self {
        SamplingError::Configuration(message.into())
    }

    pub fn degenerate(message: impl Into<String>) -> Self {
        SamplingError::DegenerateInput(message.into())
    }
}
