use std::sync::Arc;

use axum::{
    body::Body,
    extract::Path,
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Extension,
};
use tracing::{info, instrument};

use crate::{
    listing::path,
    storage::ObjectStorage,
    types::{AppError, BrowserConfig},
};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Streams an object to the client as an attachment
///
/// # Errors
///
/// - `StorageError::NoSuchBucket` / `StorageError::NoSuchKey` - 404
/// - other storage failures - 5xx
#[instrument(skip(storage))]
pub async fn download(
    Extension(storage): Extension<Arc<dyn ObjectStorage>>,
    Path((bucket_name, object_name)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let object = storage.get_object(&bucket_name, &object_name).await?;

    let content_type = object
        .content_type
        .as_deref()
        .and_then(|value| HeaderValue::from_str(value).ok())
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    let content_length = object.content_length;

    let mut response = Body::from_stream(object.body).into_response();
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, content_type);
    if let Some(length) = content_length {
        headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
    }

    let file_name = path::base(&object_name).replace('"', "");
    let disposition = format!("attachment; filename=\"{file_name}\"");
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(CONTENT_DISPOSITION, value);
    }

    Ok(response)
}

/// Deletes an object when deleting is enabled
///
/// # Errors
///
/// - 403 when deleting is disabled
/// - storage failures as for `download`
#[instrument(skip(storage, config))]
pub async fn delete(
    Extension(storage): Extension<Arc<dyn ObjectStorage>>,
    Extension(config): Extension<BrowserConfig>,
    Path((bucket_name, object_name)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    if !config.allow_delete {
        return Err(AppError::new(
            StatusCode::FORBIDDEN,
            "forbidden",
            "deleting objects is disabled",
        ));
    }

    storage.delete_object(&bucket_name, &object_name).await?;

    info!("Deleted {object_name} from {bucket_name}");
    Ok(StatusCode::NO_CONTENT)
}
