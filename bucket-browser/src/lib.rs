//! Web browser for S3-compatible object storage buckets

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Directory-style listing views
pub mod listing;

/// HTTP routes
pub mod routes;

/// Server setup
pub mod server;

/// Object storage access
pub mod storage;

/// Configuration and error types
pub mod types;
