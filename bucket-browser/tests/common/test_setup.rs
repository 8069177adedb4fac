use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Extension, Router};
use bucket_browser::{
    routes,
    storage::{InMemoryStorage, ObjectStorage},
    types::BrowserConfig,
};
use chrono::{DateTime, TimeZone, Utc};
use tower::ServiceExt;

/// Setup test environment variables with all the required configuration
pub fn setup_test_env() {
    // Load test environment variables
    dotenvy::from_path(".env.example").ok();

    // Initialize tracing for tests
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Fixed modification time for seeded objects
pub fn modified() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 20, 30, 0).unwrap()
}

/// Base test setup with an in-memory object store behind the router
pub struct TestSetup {
    pub router: Router,
    pub config: BrowserConfig,
    pub storage: Arc<InMemoryStorage>,
}

impl TestSetup {
    pub fn new(config: BrowserConfig) -> Self {
        setup_test_env();

        let storage = Arc::new(InMemoryStorage::new());
        let object_storage: Arc<dyn ObjectStorage> = storage.clone();

        let router = routes::handler()
            .layer(Extension(config))
            .layer(Extension(object_storage));

        Self {
            router,
            config,
            storage,
        }
    }

    /// Setup with the `media` bucket used across tests
    pub fn with_media_bucket(config: BrowserConfig) -> Self {
        let setup = Self::new(config);
        setup
            .storage
            .put_object("media", "photos/2020/a.jpg", vec![7; 500], modified());
        setup
            .storage
            .put_object("media", "photos/2020/sub/", Vec::new(), modified());
        setup
            .storage
            .put_object("media", "readme.txt", "hello world", modified());
        setup
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_delete_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("DELETE")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn parse_response_body(
        &self,
        response: Response,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
        let body = self.read_response_bytes(response).await?;
        let json = serde_json::from_slice(&body)?;
        Ok(json)
    }

    pub async fn read_response_text(
        &self,
        response: Response,
    ) -> Result<String, Box<dyn std::error::Error>> {
        let body = self.read_response_bytes(response).await?;
        Ok(String::from_utf8(body)?)
    }

    pub async fn read_response_bytes(
        &self,
        response: Response,
    ) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        use http_body_util::BodyExt;

        let body = response.into_body().collect().await?.to_bytes();
        Ok(body.to_vec())
    }
}
