use url::Url;

use crate::error::{SamplingError, SamplingResult};

pub const S3_SCHEME: &str = "s3";
pub const FILE_SCHEME: &str = "file";

/// Where the dataset lives: a scheme, a container (bucket) and a path
/// prefix within the container. The local filesystem has no container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocation {
    pub scheme: String,
    pub container: String,
    pub prefix: String,
}

impl StorageLocation {
    pub fn parse(location: &str) -> SamplingResult<Self> {
        let url = Url::parse(location)
            .map_err(|e| SamplingError::configuration(format!("invalid location {location}: {e}")))?;

        match url.scheme() {
            S3_SCHEME => {
                let bucket = url.host_str().unwrap_or_default();
                Self::s3(bucket, url.path())
            }
            FILE_SCHEME => Ok(Self {
                scheme: FILE_SCHEME.to_string(),
                container: String::new(),
                prefix: normalize_prefix(url.path()),
            }),
            scheme => Err(SamplingError::configuration(format!(
                "unsupported storage scheme `{scheme}` in {location}"
            ))),
        }
    }

    pub fn s3(bucket: &str, key: &str) -> SamplingResult<Self> {
        if bucket.is_empty() {
            return Err(SamplingError::configuration("bucket must not be empty"));
        }

        Ok(Self {
            scheme: S3_SCHEME.to_string(),
            container: bucket.to_string(),
            prefix: normalize_prefix(key),
        })
    }

    /// The url the object store is registered under, e.g. `s3://bucket`.
    pub fn store_url(&self) -> SamplingResult<Url> {
        let url = format!("{}://{}", self.scheme, self.container);
        Url::parse(&url)
            .map_err(|e| SamplingError::configuration(format!("invalid store url {url}: {e}")))
    }

    pub fn url(&self) -> String {
        format!("{}://{}/{}", self.scheme, self.container, self.prefix)
    }
}

fn normalize_prefix(path: &str) -> String {
    path.trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::StorageLocation;

    #[test]
    fn should_parse_s3_location() {
        let location = StorageLocation::parse("s3://data/events/2024/").unwrap();

        assert_eq!("s3", location.scheme);
        assert_eq!("data", location.container);
        assert_eq!("events/2024", location.prefix);
        assert_eq!("s3://data/events/2024", location.url());
        assert_eq!("s3://data", location.store_url().unwrap().as_str());
    }

    #[test]
    fn should_parse_file_location() {
        let location = StorageLocation::parse("file:///tmp/table").unwrap();

        assert_eq!("", location.container);
        assert_eq!("tmp/table", location.prefix);
        assert_eq!("file:///tmp/table", location.url());
    }

    #[test]
    fn should_reject_unknown_scheme_and_empty_bucket() {
        assert!(StorageLocation::parse("hdfs://namenode/table").is_err());
        assert!(StorageLocation::parse("not a url").is_err());
        assert!(StorageLocation::s3("", "events").is_err());
    }
}
