use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

use bucket_browser::{
    server,
    storage::{ObjectStorage, S3Storage},
    types::{BrowserConfig, Environment},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(environment.tracing_level()).into())
        .from_env_lossy();

    // Use JSON format for production, regular format for development
    match environment {
        Environment::Production { .. } => fmt().json().with_env_filter(filter).init(),
        Environment::Development { .. } => fmt().with_env_filter(filter).init(),
    }

    info!("Starting bucket browser in {environment:?} environment");

    let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
    let storage: Arc<dyn ObjectStorage> = Arc::new(S3Storage::new(s3_client));

    server::start(BrowserConfig::from_env(), storage).await
}
