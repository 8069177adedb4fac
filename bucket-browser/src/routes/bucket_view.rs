use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Path, Query},
    response::Html,
    Extension,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    listing::{build_bucket_page, ListingRequest},
    storage::ObjectStorage,
    types::{AppError, BrowserConfig, ViewError},
};

/// Query parameters of the bucket page
#[derive(Debug, Deserialize)]
pub struct BucketViewQuery {
    /// Key prefix to browse, the bucket root when absent
    #[serde(default)]
    pub prefix: String,
}

/// Shows the objects of a bucket below a prefix
///
/// # Errors
///
/// - `ViewError::ListObjects` - the listing failed; nothing is rendered
/// - `ViewError::Template` - rendering the page failed
#[instrument(skip(storage, config))]
pub async fn handler(
    Extension(storage): Extension<Arc<dyn ObjectStorage>>,
    Extension(config): Extension<BrowserConfig>,
    Path(bucket_name): Path<String>,
    Query(query): Query<BucketViewQuery>,
) -> Result<Html<String>, AppError> {
    let page = build_bucket_page(
        storage.as_ref(),
        ListingRequest {
            bucket_name: &bucket_name,
            prefix: &query.prefix,
            recursive: config.list_recursive,
            allow_delete: config.allow_delete,
        },
    )
    .await?;

    let body = page.render().map_err(ViewError::from)?;
    Ok(Html(body))
}
