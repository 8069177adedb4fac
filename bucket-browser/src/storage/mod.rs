//! Object storage access used by the browser pages

mod error;
#[cfg(any(test, feature = "test-utils"))]
mod memory;
mod s3;

use async_trait::async_trait;
use axum::body::Bytes;
use chrono::{DateTime, FixedOffset};
use futures::stream::BoxStream;

pub use error::{StorageError, StorageResult};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryStorage;
pub use s3::S3Storage;

/// Separator that turns a flat key space into directories
pub const DELIMITER: &str = "/";

/// A single entry of a bucket listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObject {
    /// Full object key
    pub key: String,
    /// Size in bytes
    pub size: i64,
    /// Last modification time
    pub last_modified: DateTime<FixedOffset>,
}

/// A bucket visible to the configured credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketInfo {
    /// Bucket name
    pub name: String,
    /// Creation time, when the store reports one
    pub creation_date: Option<DateTime<FixedOffset>>,
}

/// Options for listing the objects of a bucket
#[derive(Debug, Clone, Default)]
pub struct ListObjectsOptions {
    /// Only keys starting with this prefix are listed
    pub prefix: String,
    /// List every key below the prefix instead of grouping by `/`
    pub recursive: bool,
}

/// Lazily produced listing. Dropping the stream releases the underlying request.
pub type ObjectStream = BoxStream<'static, StorageResult<RawObject>>;

/// Streaming body of a downloaded object
pub type ObjectBody = BoxStream<'static, std::io::Result<Bytes>>;

/// A downloaded object
pub struct ObjectDownload {
    /// Stored media type, if any
    pub content_type: Option<String>,
    /// Size in bytes, if known
    pub content_length: Option<i64>,
    /// Object contents
    pub body: ObjectBody,
}

/// Operations the browser needs from an object store
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Lists all buckets
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the store rejects the request
    async fn list_buckets(&self) -> StorageResult<Vec<BucketInfo>>;

    /// Lists the objects of a bucket
    ///
    /// Nothing is requested until the stream is polled. A non-recursive listing
    /// yields one directory-like entry per common prefix.
    fn list_objects(&self, bucket_name: &str, options: &ListObjectsOptions) -> ObjectStream;

    /// Fetches an object
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NoSuchBucket` or `StorageError::NoSuchKey` for missing
    /// targets, other variants for service failures
    async fn get_object(&self, bucket_name: &str, key: &str) -> StorageResult<ObjectDownload>;

    /// Deletes an object
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the store rejects the request
    async fn delete_object(&self, bucket_name: &str, key: &str) -> StorageResult<()>;
}
