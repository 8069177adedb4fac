mod bucket_view;
mod buckets;
mod health;
mod objects;

use axum::{response::Redirect, routing::get, Router};

/// Creates the router with all handler routes
#[must_use]
pub fn handler() -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/buckets") }))
        .route("/health", get(health::handler))
        .route("/buckets", get(buckets::handler))
        .route("/buckets/{bucket_name}", get(bucket_view::handler))
        .route(
            "/api/buckets/{bucket_name}/objects/{*object_name}",
            get(objects::download).delete(objects::delete),
        )
}
