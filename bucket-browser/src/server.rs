use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, Extension, Router};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info};

/// Longest time a request may take before it is answered with 408
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

use crate::{routes, storage::ObjectStorage, types::BrowserConfig};

/// Builds the application router with its dependencies attached
#[must_use]
pub fn router(config: BrowserConfig, storage: Arc<dyn ObjectStorage>) -> Router {
    routes::handler()
        .layer(Extension(config))
        .layer(Extension(storage))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
}

/// Starts the server with the given configuration and storage
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(config: BrowserConfig, storage: Arc<dyn ObjectStorage>) -> anyhow::Result<()> {
    let router = router(config, storage);

    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(8080), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    info!(
        "Bucket browser started on http://{addr} (delete: {}, recursive: {})",
        config.allow_delete, config.list_recursive
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
        Err(e) => {
            error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{
        BucketInfo, InMemoryStorage, ListObjectsOptions, ObjectDownload, ObjectStream,
        StorageResult,
    };
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    /// Storage whose bucket listing never completes
    struct StalledStorage;

    #[async_trait]
    impl ObjectStorage for StalledStorage {
        async fn list_buckets(&self) -> StorageResult<Vec<BucketInfo>> {
            std::future::pending().await
        }

        fn list_objects(&self, _bucket_name: &str, _options: &ListObjectsOptions) -> ObjectStream {
            Box::pin(futures::stream::pending())
        }

        async fn get_object(
            &self,
            _bucket_name: &str,
            _key: &str,
        ) -> StorageResult<ObjectDownload> {
            std::future::pending().await
        }

        async fn delete_object(&self, _bucket_name: &str, _key: &str) -> StorageResult<()> {
            std::future::pending().await
        }
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_router_serves_requests() {
        let router = router(BrowserConfig::default(), Arc::new(InMemoryStorage::new()));

        let response = router.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_requests_time_out() {
        let router = router(BrowserConfig::default(), Arc::new(StalledStorage));

        let response = router.oneshot(get("/buckets")).await.unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
