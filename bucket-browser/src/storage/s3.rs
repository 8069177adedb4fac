//! S3-backed object storage

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::{operation::list_objects_v2::ListObjectsV2Output, primitives, Client as S3Client};
use chrono::{DateTime, FixedOffset, Utc};
use futures::{stream, Stream, StreamExt};
use tokio_util::io::ReaderStream;
use tracing::debug;

use super::{
    BucketInfo, ListObjectsOptions, ObjectDownload, ObjectStorage, ObjectStream, RawObject,
    StorageError, StorageResult, DELIMITER,
};

/// Object storage client for any S3-compatible service
pub struct S3Storage {
    s3_client: Arc<S3Client>,
}

impl S3Storage {
    /// Creates a new storage client
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>) -> Self {
        Self { s3_client }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn list_buckets(&self) -> StorageResult<Vec<BucketInfo>> {
        let output = self.s3_client.list_buckets().send().await?;

        Ok(output
            .buckets()
            .iter()
            .filter_map(|bucket| {
                Some(BucketInfo {
                    name: bucket.name()?.to_string(),
                    creation_date: bucket.creation_date().map(to_fixed_offset),
                })
            })
            .collect())
    }

    fn list_objects(&self, bucket_name: &str, options: &ListObjectsOptions) -> ObjectStream {
        debug!(
            "Listing objects in {bucket_name} with prefix {:?} (recursive: {})",
            options.prefix, options.recursive
        );

        let mut request = self
            .s3_client
            .list_objects_v2()
            .bucket(bucket_name)
            .prefix(options.prefix.as_str());
        if !options.recursive {
            request = request.delimiter(DELIMITER);
        }

        // Pages are only fetched while the consumer keeps polling
        let pages = stream::unfold(request.into_paginator().send(), |mut pages| async move {
            let page = pages.next().await?;
            Some((page.map_err(StorageError::from), pages))
        });

        objects_from_pages(pages)
    }

    async fn get_object(&self, bucket_name: &str, key: &str) -> StorageResult<ObjectDownload> {
        let output = self
            .s3_client
            .get_object()
            .bucket(bucket_name)
            .key(key)
            .send()
            .await?;

        Ok(ObjectDownload {
            content_type: output.content_type().map(ToString::to_string),
            content_length: output.content_length(),
            body: ReaderStream::new(output.body.into_async_read()).boxed(),
        })
    }

    async fn delete_object(&self, bucket_name: &str, key: &str) -> StorageResult<()> {
        self.s3_client
            .delete_object()
            .bucket(bucket_name)
            .key(key)
            .send()
            .await?;

        debug!("Deleted object {key} from {bucket_name}");
        Ok(())
    }
}

/// Flattens listing pages into entries, ending the stream after the first failed page
fn objects_from_pages<P>(pages: P) -> ObjectStream
where
    P: Stream<Item = StorageResult<ListObjectsV2Output>> + Send + 'static,
{
    stream::unfold(
        (pages.boxed(), VecDeque::new(), false),
        |(mut pages, mut pending, failed)| async move {
            loop {
                if let Some(object) = pending.pop_front() {
                    return Some((Ok(object), (pages, pending, failed)));
                }
                if failed {
                    return None;
                }
                match pages.next().await? {
                    Ok(page) => pending.extend(objects_in_page(&page)),
                    Err(e) => return Some((Err(e), (pages, pending, true))),
                }
            }
        },
    )
    .boxed()
}

/// Objects of a page first, then its common prefixes as directory entries
fn objects_in_page(page: &ListObjectsV2Output) -> Vec<RawObject> {
    let objects = page.contents().iter().filter_map(|object| {
        Some(RawObject {
            key: object.key()?.to_string(),
            size: object.size().unwrap_or_default(),
            last_modified: object
                .last_modified()
                .map(to_fixed_offset)
                .unwrap_or_default(),
        })
    });

    let prefixes = page.common_prefixes().iter().filter_map(|prefix| {
        Some(RawObject {
            key: prefix.prefix()?.to_string(),
            size: 0,
            last_modified: DateTime::<FixedOffset>::default(),
        })
    });

    objects.chain(prefixes).collect()
}

fn to_fixed_offset(timestamp: &primitives::DateTime) -> DateTime<FixedOffset> {
    DateTime::<Utc>::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
        .unwrap_or_default()
        .fixed_offset()
}
