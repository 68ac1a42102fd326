use std::sync::Arc;

use object_store::{ObjectStore, aws::AmazonS3Builder, local::LocalFileSystem};

use crate::{
    config::settings::SamplingConfig,
    error::{SamplingError, SamplingResult},
};

use super::location::{FILE_SCHEME, S3_SCHEME, StorageLocation};

/// Builds the object store backing `location`. The store is created once per
/// run and handed to both the lister and the dataframe session.
pub fn create_object_store(
    location: &StorageLocation,
    config: &SamplingConfig,
) -> SamplingResult<Arc<dyn ObjectStore>> {
    match location.scheme.as_str() {
        S3_SCHEME => {
            let mut builder = AmazonS3Builder::from_env()
                .with_bucket_name(&location.container)
                .with_region(&config.region);

            if let Some(endpoint) = &config.endpoint {
                builder = builder.with_endpoint(endpoint);
            }
            if let Some((access_key, secret_key)) = config.credentials()? {
                builder = builder
                    .with_access_key_id(access_key)
                    .with_secret_access_key(secret_key);
            }

            let store = builder
                .build()
                .map_err(|e| SamplingError::configuration(format!("invalid S3 settings: {e}")))?;

            log::debug!(
                "created S3 store for bucket {} in {}",
                location.container,
                config.region
            );

            Ok(Arc::new(store))
        }
        FILE_SCHEME => Ok(Arc::new(LocalFileSystem::new())),
        scheme => Err(SamplingError::configuration(format!(
            "unsupported storage scheme `{scheme}`"
        ))),
    }
}
