//! Enumerates the partitions of a dataset.
//!
//! [ObjectStorePartitionLister] lists every object under the dataset prefix
//! through an [ObjectStore]. The store follows continuation tokens itself, so
//! the listing covers all pages before the partition set is built.
use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use object_store::{ObjectStore, path::Path};

use crate::error::{SamplingError, SamplingResult};

use super::{
    location::StorageLocation,
    partition::{PartitionFilter, PartitionSet},
};

#[async_trait]
pub trait PartitionLister: Send + Sync {
    async fn list_partitions(&self) -> SamplingResult<PartitionSet>;
}

#[derive(Debug)]
pub struct ObjectStorePartitionLister {
    store: Arc<dyn ObjectStore>,
    location: StorageLocation,
    filter: PartitionFilter,
}

impl ObjectStorePartitionLister {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        location: StorageLocation,
        filter: PartitionFilter,
    ) -> Self {
        Self {
            store,
            location,
            filter,
        }
    }
}

#[async_trait]
impl PartitionLister for ObjectStorePartitionLister {
    async fn list_partitions(&self) -> SamplingResult<PartitionSet> {
        let prefix = (!self.location.prefix.is_empty())
            .then(|| Path::from(self.location.prefix.as_str()));

        let keys: Vec<String> = self
            .store
            .list(prefix.as_ref())
            .map_ok(|meta| meta.location.to_string())
            .try_collect()
            .await
            .map_err(|source| SamplingError::Listing {
                location: self.location.url(),
                source,
            })?;

        log::debug!("listed {} objects under {}", keys.len(), self.location.url());

        let partitions = PartitionSet::from_keys(&self.location, keys, &self.filter);

        log::info!(
            "found {} partitions under {}",
            partitions.len(),
            self.location.url()
        );

        Ok(partitions)
    }
}
