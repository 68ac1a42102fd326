//! Process configuration of a sampling run.
//!
//! Defaults come from the embedded `default.toml` and are overridden by
//! environment variables prefixed with `SAMPLING_`. Nested keys use a double
//! underscore, e.g. `SAMPLING_ESTIMATION__SEED_FRACTION=0.0001`.
//!
//! The dataset and its credentials can also be given with the bare names
//! older deployments export:
//!
//! | bare name    | prefixed name          |
//! |--------------|------------------------|
//! | `access_key` | `SAMPLING_ACCESS_KEY`  |
//! | `secret_key` | `SAMPLING_SECRET_KEY`  |
//! | `bucket`     | `SAMPLING_BUCKET`      |
//! | `key`        | `SAMPLING_KEY`         |
//!
//! Names are matched case-insensitively. When both forms are set the
//! prefixed one wins.
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;

use crate::{
    error::{SamplingError, SamplingResult},
    estimation::params::EstimationParams,
    storage::{location::StorageLocation, partition::PartitionFilter},
};

const DEFAULT_CONFIG: &str = include_str!("default.toml");

pub const ENV_PREFIX: &str = "SAMPLING_";

/// Unprefixed variables accepted for the dataset location and credentials.
pub const BARE_ENV_KEYS: [&str; 4] = ["access_key", "secret_key", "bucket", "key"];

#[derive(Debug, Clone, Deserialize)]
pub struct SamplingConfig {
    /// Full dataset location, e.g. `s3://bucket/path/to/table` or `file:///data/table`.
    #[serde(default)]
    pub location: Option<String>,
    /// S3 bucket, used together with `key` when `location` is not set.
    #[serde(default)]
    pub bucket: Option<String>,
    /// Path prefix within `bucket`.
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    pub region: String,
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Objects whose key contains any of these markers are not partitions.
    pub completion_markers: Vec<String>,
    pub file_extension: String,
    /// Seeds both the partition draw and the sampled read.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Ballista scheduler url (`df://host:port`); local execution when absent.
    #[serde(default)]
    pub scheduler: Option<String>,
    pub show_limit: usize,
    pub estimation: EstimationParams,
}

impl SamplingConfig {
    /// Loads defaults overlaid by the bare variables in [BARE_ENV_KEYS] and
    /// then by `SAMPLING_*` environment variables.
    pub fn load() -> SamplingResult<Self> {
        Self::from_figment(
            Self::defaults()
                .merge(Env::raw().only(&BARE_ENV_KEYS))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    pub fn defaults() -> Figment {
        Figment::from(Toml::string(DEFAULT_CONFIG))
    }

    pub fn from_figment(figment: Figment) -> SamplingResult<Self> {
        let config: SamplingConfig = figment
            .extract()
            .map_err(|e| SamplingError::configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SamplingResult<()> {
        self.location()?;
        self.credentials()?;
        self.sample_seed()?;
        self.estimation.validate()
    }

    pub fn location(&self) -> SamplingResult<StorageLocation> {
        match (&self.location, &self.bucket, &self.key) {
            (Some(location), _, _) => StorageLocation::parse(location),
            (None, Some(bucket), Some(key)) => StorageLocation::s3(bucket, key),
            (None, Some(_), None) => Err(SamplingError::configuration(
                "`key` is required together with `bucket`",
            )),
            (None, None, _) => Err(SamplingError::configuration(
                "either `location` or `bucket` and `key` must be set",
            )),
        }
    }

    /// Static credentials, if configured. Both keys or neither must be set;
    /// neither means the ambient AWS credential chain is used.
    pub fn credentials(&self) -> SamplingResult<Option<(&str, &str)>> {
        match (self.access_key.as_deref(), self.secret_key.as_deref()) {
            (Some(access), Some(secret)) if access.is_empty() || secret.is_empty() => Err(
                SamplingError::configuration("`access_key` and `secret_key` must not be empty"),
            ),
            (Some(access), Some(secret)) => Ok(Some((access, secret))),
            (None, None) => Ok(None),
            _ => Err(SamplingError::configuration(
                "`access_key` and `secret_key` must be set together",
            )),
        }
    }

    /// Objects the lister keeps: the ones the engine reads with `file_extension`.
    pub fn partition_filter(&self) -> PartitionFilter {
        PartitionFilter::new(self.completion_markers.clone(), self.file_extension.clone())
    }

    /// The seed in the form accepted by the sample operator.
    pub fn sample_seed(&self) -> SamplingResult<Option<i64>> {
        self.seed
            .map(|seed| {
                i64::try_from(seed).map_err(|_| {
                    SamplingError::configuration(format!("seed {seed} is out of range"))
                })
            })
            .transpose()
    }
}
