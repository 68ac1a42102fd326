use super::location::StorageLocation;

/// One storage object holding a slice of the dataset's rows.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Partition {
    pub scheme: String,
    pub container: String,
    pub key: String,
}

impl Partition {
    /// Url the dataframe engine reads this partition from.
    pub fn locator(&self) -> String {
        format!("{}://{}/{}", self.scheme, self.container, self.key)
    }
}

/// Decides which listed objects are data partitions.
///
/// A key is kept when it is not a directory placeholder, contains none of the
/// completion markers and ends with `file_extension`. An empty extension
/// accepts every file name, the same way the dataframe engine treats it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionFilter {
    pub completion_markers: Vec<String>,
    pub file_extension: String,
}

impl PartitionFilter {
    pub fn new(completion_markers: Vec<String>, file_extension: impl Into<String>) -> Self {
        Self {
            completion_markers,
            file_extension: file_extension.into(),
        }
    }

    pub fn accepts(&self, key: &str) -> bool {
        !key.is_empty()
            && !key.ends_with('/')
            && !self
                .completion_markers
                .iter()
                .any(|marker| !marker.is_empty() && key.contains(marker.as_str()))
            && key.ends_with(self.file_extension.as_str())
    }
}

/// All data-bearing partitions of a dataset, ordered by key so that sample
/// indices address the same partitions for the whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionSet {
    partitions: Vec<Partition>,
}

impl PartitionSet {
    /// Builds the set from listed object keys, keeping those `filter` accepts.
    pub fn from_keys<I, S>(location: &StorageLocation, keys: I, filter: &PartitionFilter) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut partitions: Vec<Partition> = keys
            .into_iter()
            .map(Into::into)
            .filter(|key| filter.accepts(key))
            .map(|key| Partition {
                scheme: location.scheme.clone(),
                container: location.container.clone(),
                key,
            })
            .collect();

        partitions.sort();
        partitions.dedup();

        Self { partitions }
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Partition> {
        self.partitions.get(index)
    }

    pub fn as_slice(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn locators(&self) -> Vec<String> {
        self.partitions.iter().map(Partition::locator).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{PartitionFilter, PartitionSet};
    use crate::storage::location::StorageLocation;

    fn parquet_filter() -> PartitionFilter {
        PartitionFilter::new(vec!["_SUCCESS".to_string()], ".parquet")
    }

    #[test]
    fn should_exclude_markers_and_sort() {
        let location = StorageLocation::s3("data", "events").unwrap();
        let set = PartitionSet::from_keys(
            &location,
            [
                "events/part-00001.parquet",
                "events/_SUCCESS",
                "events/",
                "events/part-00000.parquet",
            ],
            &parquet_filter(),
        );

        assert_eq!(2, set.len());
        assert_eq!(
            vec![
                "s3://data/events/part-00000.parquet",
                "s3://data/events/part-00001.parquet"
            ],
            set.locators()
        );
    }

    #[test]
    fn should_exclude_side_files_without_extension() {
        let location = StorageLocation::s3("data", "events").unwrap();
        let set = PartitionSet::from_keys(
            &location,
            [
                "events/part-00000.parquet",
                "events/.part-00000.parquet.crc",
                "events/part-00000.parquet.crc",
                "events/_committed_4411",
                "events/_started_4411",
            ],
            &parquet_filter(),
        );

        assert_eq!(vec!["s3://data/events/part-00000.parquet"], set.locators());
    }

    #[test]
    fn should_accept_any_file_with_empty_extension() {
        let filter = PartitionFilter::new(vec!["_SUCCESS".to_string()], "");

        assert!(filter.accepts("events/part-00000"));
        assert!(filter.accepts("events/part-00000.orc"));
        assert!(!filter.accepts("events/_SUCCESS"));
        assert!(!filter.accepts("events/"));
    }

    #[test]
    fn should_build_local_locators() {
        let location = StorageLocation::parse("file:///tmp/table").unwrap();
        let set = PartitionSet::from_keys(
            &location,
            ["tmp/table/part-0.parquet"],
            &PartitionFilter::default(),
        );

        assert_eq!(
            "file:///tmp/table/part-0.parquet",
            set.get(0).unwrap().locator()
        );
        assert!(set.get(1).is_none());
    }
}
