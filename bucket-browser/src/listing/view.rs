//! Bucket page assembly

use askama::Template;
use chrono_tz::Tz;
use futures::TryStreamExt;
use tracing::{debug, instrument};

use super::{classify, human_bytes, path, Icon};
use crate::{
    storage::{ListObjectsOptions, ObjectStorage, RawObject},
    types::ViewError,
};

/// Zone all timestamps are shown in
pub const DISPLAY_TIME_ZONE: Tz = chrono_tz::Asia::Shanghai;

/// What to list and how the page may be used
#[derive(Debug, Clone, Copy)]
pub struct ListingRequest<'a> {
    /// Bucket to list
    pub bucket_name: &'a str,
    /// Key prefix being browsed, empty for the bucket root
    pub prefix: &'a str,
    /// List every key below the prefix instead of one level
    pub recursive: bool,
    /// Offer delete buttons on the page
    pub allow_delete: bool,
}

/// One listed object, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEntry {
    /// Listing entry with its timestamp in the display zone
    pub info: RawObject,
    /// Icon shown next to the name
    pub icon: Icon,
    /// Last key element, with a trailing `/` for directories
    pub name: String,
    /// Size as formatted by [`human_bytes`]
    pub human_size: String,
    /// Whether the entry stands for a key prefix
    pub is_directory: bool,
}

impl DisplayEntry {
    fn new(mut info: RawObject) -> Self {
        let kind = classify(&info.key);
        info.last_modified = info
            .last_modified
            .with_timezone(&DISPLAY_TIME_ZONE)
            .fixed_offset();

        Self {
            human_size: human_bytes(info.size),
            icon: kind.icon,
            name: kind.name,
            is_directory: kind.is_directory,
            info,
        }
    }
}

/// Listing of one bucket location
#[derive(Debug, Template)]
#[template(path = "bucket.html")]
pub struct BucketPage {
    /// Bucket being browsed
    pub bucket_name: String,
    /// Prefix being browsed, empty at the bucket root
    pub prefix: String,
    /// Parent of the parent of the prefix, always ending in `/`
    pub back_prefix: String,
    /// Last element of the prefix
    pub current_path: String,
    /// Entries in listing order
    pub objects: Vec<DisplayEntry>,
    /// Whether delete buttons are rendered
    pub allow_delete: bool,
}

impl BucketPage {
    /// Whether the page shows the top of the bucket
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Prefix the back link points at; the degenerate `./` means the bucket root
    #[must_use]
    pub fn parent_prefix(&self) -> &str {
        if self.back_prefix == "./" {
            ""
        } else {
            &self.back_prefix
        }
    }
}

/// Lists a bucket location and assembles its page
///
/// The listing is consumed in order in a single pass. The first failed item
/// aborts the page and drops the listing, which releases the request.
///
/// # Errors
///
/// Returns `ViewError::ListObjects` if any listing item fails
#[instrument(skip(storage))]
pub async fn build_bucket_page(
    storage: &dyn ObjectStorage,
    request: ListingRequest<'_>,
) -> Result<BucketPage, ViewError> {
    let options = ListObjectsOptions {
        prefix: request.prefix.to_string(),
        recursive: request.recursive,
    };

    let mut listing = storage.list_objects(request.bucket_name, &options);
    let mut objects = Vec::new();
    while let Some(object) = listing.try_next().await.map_err(ViewError::ListObjects)? {
        objects.push(DisplayEntry::new(object));
    }

    debug!("Listed {} objects", objects.len());

    Ok(BucketPage {
        bucket_name: request.bucket_name.to_string(),
        prefix: request.prefix.to_string(),
        back_prefix: format!("{}/", path::dir(&path::dir(request.prefix))),
        current_path: path::base(request.prefix),
        objects,
        allow_delete: request.allow_delete,
    })
}
