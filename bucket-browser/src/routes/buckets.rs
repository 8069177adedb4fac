use std::sync::Arc;

use askama::Template;
use axum::{response::Html, Extension};
use tracing::{debug, instrument};

use crate::{
    listing::DISPLAY_TIME_ZONE,
    storage::ObjectStorage,
    types::{AppError, ViewError},
};

/// A bucket row on the index page
#[derive(Debug)]
pub struct BucketSummary {
    /// Bucket name
    pub name: String,
    /// Creation time in the display zone, empty when unknown
    pub created: String,
}

/// Index of all buckets
#[derive(Debug, Template)]
#[template(path = "buckets.html")]
pub struct BucketsPage {
    /// Buckets in listing order
    pub buckets: Vec<BucketSummary>,
}

/// Shows all buckets
///
/// # Errors
///
/// - `ViewError::ListBuckets` - the bucket listing failed
/// - `ViewError::Template` - rendering the page failed
#[instrument(skip(storage))]
pub async fn handler(
    Extension(storage): Extension<Arc<dyn ObjectStorage>>,
) -> Result<Html<String>, AppError> {
    let buckets = storage
        .list_buckets()
        .await
        .map_err(ViewError::ListBuckets)?;

    debug!("Listed {} buckets", buckets.len());

    let page = BucketsPage {
        buckets: buckets
            .into_iter()
            .map(|bucket| BucketSummary {
                created: bucket
                    .creation_date
                    .map(|date| {
                        date.with_timezone(&DISPLAY_TIME_ZONE)
                            .format("%Y-%m-%d %H:%M:%S")
                            .to_string()
                    })
                    .unwrap_or_default(),
                name: bucket.name,
            })
            .collect(),
    };

    let body = page.render().map_err(ViewError::from)?;
    Ok(Html(body))
}
