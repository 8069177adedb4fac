//! In-memory object storage for tests

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use axum::body::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use futures::{stream, StreamExt};

use super::{
    BucketInfo, ListObjectsOptions, ObjectDownload, ObjectStorage, ObjectStream, RawObject,
    StorageError, StorageResult, DELIMITER,
};

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    last_modified: DateTime<FixedOffset>,
}

#[derive(Default)]
struct Buckets {
    objects: BTreeMap<String, BTreeMap<String, StoredObject>>,
    fail_listing_after: Option<usize>,
}

/// Object storage kept in memory with S3 listing semantics
#[derive(Default)]
pub struct InMemoryStorage {
    inner: Mutex<Buckets>,
    released_listings: Arc<AtomicUsize>,
}

/// Counts a listing as released once its stream is dropped
struct ListingGuard(Arc<AtomicUsize>);

impl Drop for ListingGuard {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl InMemoryStorage {
    /// Creates a store without buckets
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Buckets> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates an empty bucket
    pub fn create_bucket(&self, bucket_name: &str) {
        self.lock()
            .objects
            .entry(bucket_name.to_string())
            .or_default();
    }

    /// Stores an object, creating the bucket if needed
    pub fn put_object(
        &self,
        bucket_name: &str,
        key: &str,
        data: impl Into<Bytes>,
        last_modified: DateTime<Utc>,
    ) {
        self.lock()
            .objects
            .entry(bucket_name.to_string())
            .or_default()
            .insert(
                key.to_string(),
                StoredObject {
                    data: data.into(),
                    last_modified: last_modified.fixed_offset(),
                },
            );
    }

    /// Makes every later listing fail after yielding `count` entries
    pub fn fail_listing_after(&self, count: usize) {
        self.lock().fail_listing_after = Some(count);
    }

    /// Whether an object is stored
    #[must_use]
    pub fn contains_object(&self, bucket_name: &str, key: &str) -> bool {
        self.lock()
            .objects
            .get(bucket_name)
            .is_some_and(|objects| objects.contains_key(key))
    }

    /// Number of listing streams that have been dropped
    #[must_use]
    pub fn released_listings(&self) -> usize {
        self.released_listings.load(Ordering::SeqCst)
    }
}

fn list(objects: &BTreeMap<String, StoredObject>, options: &ListObjectsOptions) -> Vec<RawObject> {
    let prefix = options.prefix.as_str();
    let mut seen_prefixes = BTreeSet::new();
    let mut listed = Vec::new();

    for (key, object) in objects.range(prefix.to_string()..) {
        let Some(rest) = key.strip_prefix(prefix) else {
            break;
        };

        if !options.recursive {
            if let Some(pos) = rest.find(DELIMITER) {
                let common_prefix = format!("{prefix}{}", &rest[..pos + DELIMITER.len()]);
                if seen_prefixes.insert(common_prefix.clone()) {
                    listed.push(RawObject {
                        key: common_prefix,
                        size: 0,
                        last_modified: DateTime::<FixedOffset>::default(),
                    });
                }
                continue;
            }
        }

        listed.push(RawObject {
            key: key.clone(),
            size: i64::try_from(object.data.len()).unwrap_or(i64::MAX),
            last_modified: object.last_modified,
        });
    }

    listed
}

#[async_trait]
impl ObjectStorage for InMemoryStorage {
    async fn list_buckets(&self) -> StorageResult<Vec<BucketInfo>> {
        Ok(self
            .lock()
            .objects
            .keys()
            .map(|name| BucketInfo {
                name: name.clone(),
                creation_date: None,
            })
            .collect())
    }

    fn list_objects(&self, bucket_name: &str, options: &ListObjectsOptions) -> ObjectStream {
        let buckets = self.lock();
        let items: Vec<StorageResult<RawObject>> = match buckets.objects.get(bucket_name) {
            None => vec![Err(StorageError::NoSuchBucket(bucket_name.to_string()))],
            Some(objects) => {
                let listed = list(objects, options);
                match buckets.fail_listing_after {
                    Some(count) if count <= listed.len() => listed
                        .into_iter()
                        .take(count)
                        .map(Ok)
                        .chain(std::iter::once(Err(StorageError::UpstreamError(
                            "injected listing failure".to_string(),
                        ))))
                        .collect(),
                    _ => listed.into_iter().map(Ok).collect(),
                }
            }
        };
        drop(buckets);

        let guard = ListingGuard(self.released_listings.clone());
        stream::iter(items)
            .map(move |item| {
                let _guard = &guard;
                item
            })
            .boxed()
    }

    async fn get_object(&self, bucket_name: &str, key: &str) -> StorageResult<ObjectDownload> {
        let buckets = self.lock();
        let objects = buckets
            .objects
            .get(bucket_name)
            .ok_or_else(|| StorageError::NoSuchBucket(bucket_name.to_string()))?;
        let data = objects
            .get(key)
            .ok_or_else(|| StorageError::NoSuchKey(key.to_string()))?
            .data
            .clone();
        drop(buckets);

        Ok(ObjectDownload {
            content_type: None,
            content_length: i64::try_from(data.len()).ok(),
            body: stream::iter([Ok(data)]).boxed(),
        })
    }

    async fn delete_object(&self, bucket_name: &str, key: &str) -> StorageResult<()> {
        self.lock()
            .objects
            .get_mut(bucket_name)
            .ok_or_else(|| StorageError::NoSuchBucket(bucket_name.to_string()))?
            .remove(key);
        Ok(())
    }
}
