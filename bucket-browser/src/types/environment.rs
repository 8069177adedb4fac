//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion};
use tracing::Level;

/// `LocalStack` endpoint used in development when no endpoint is configured
const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production {
        /// S3-compatible endpoint replacing the AWS default
        endpoint_override: Option<String>,
    },
    /// Development environment (defaults to `LocalStack`)
    Development {
        /// S3-compatible endpoint replacing `LocalStack`
        endpoint_override: Option<String>,
    },
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` and `S3_ENDPOINT` environment variables
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        let endpoint_override = env::var("S3_ENDPOINT")
            .ok()
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty());

        match env.as_str() {
            "production" => Self::Production { endpoint_override },
            "development" => Self::Development { endpoint_override },
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Returns the endpoint URL to use for S3, if not the AWS default
    #[must_use]
    pub fn s3_endpoint_url(&self) -> Option<&str> {
        match self {
            Self::Production { endpoint_override } => endpoint_override.as_deref(),
            Self::Development { endpoint_override } => {
                Some(endpoint_override.as_deref().unwrap_or(LOCALSTACK_ENDPOINT))
            }
        }
    }

    /// AWS configuration with retry and timeout settings
    #[allow(clippy::unused_self)]
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder()
            .retry_config(retry_config)
            .timeout_config(timeout_config)
            .build()
    }

    /// AWS S3 service configuration
    pub async fn s3_client_config(&self) -> aws_sdk_s3::Config {
        let aws_config = self.aws_config().await;
        let s3_config: aws_sdk_s3::Config = (&aws_config).into();
        let mut builder = s3_config.to_builder();

        // Custom endpoints (LocalStack, MinIO) don't serve virtual-hosted buckets
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if let Some(endpoint_url) = self.s3_endpoint_url() {
            builder.set_endpoint_url(Some(endpoint_url.to_string()));
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }

    /// Log level from `TRACING_LEVEL`, defaulting by environment
    #[must_use]
    pub fn tracing_level(&self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production { .. } => Level::INFO,
                Self::Development { .. } => Level::DEBUG,
            })
    }
}
