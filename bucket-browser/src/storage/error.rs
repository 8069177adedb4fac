//! Error types for storage operations

use std::fmt::Debug;

use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while talking to the object store
#[derive(Error, Debug)]
pub enum StorageError {
    /// The bucket does not exist
    #[error("bucket does not exist: {0}")]
    NoSuchBucket(String),

    /// The object does not exist
    #[error("object does not exist: {0}")]
    NoSuchKey(String),

    /// S3 service error
    #[error("S3 service error: {0}")]
    S3Error(String),

    /// AWS SDK error (transport, timeout, construction)
    #[error("AWS SDK error: {0}")]
    AwsError(String),

    /// Upstream service error (5xx from S3)
    #[error("Upstream service error: {0}")]
    UpstreamError(String),
}

impl<E> From<SdkError<E>> for StorageError
where
    E: ProvideErrorMetadata + Debug,
{
    fn from(error: SdkError<E>) -> Self {
        match error {
            SdkError::ServiceError(service_err) => {
                let message = service_err
                    .err()
                    .message()
                    .map_or_else(|| format!("{:?}", service_err.err()), ToString::to_string);

                match service_err.err().code() {
                    Some("NoSuchBucket") => Self::NoSuchBucket(message),
                    Some("NoSuchKey") => Self::NoSuchKey(message),
                    _ if service_err.raw().status().as_u16() >= 500 => Self::UpstreamError(message),
                    _ => Self::S3Error(message),
                }
            }
            other => Self::AwsError(other.to_string()),
        }
    }
}
