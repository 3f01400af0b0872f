//! HTTP access to the university records API

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Resource;

pub mod client;
pub mod resource;

pub use client::ApiClient;
pub use resource::RestResource;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("server error (status {status}): {body}")]
    Server { status: u16, body: String },

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Asynchronous CRUD access to one resource collection.
///
/// `RestResource` implements this against the live API; tests substitute
/// an in-memory fake. Failures are never retried here.
#[async_trait]
pub trait RecordSource<R: Resource> {
    /// Fetch the full, unfiltered record set
    async fn list_all(&self) -> Result<Vec<R>, ApiError>;

    /// Fetch a single record by id
    async fn get_one(&self, id: i64) -> Result<R, ApiError>;

    /// Create a record; returns the server's stored representation
    async fn create(&self, record: &R) -> Result<R, ApiError>;

    /// Replace a record by id; returns the stored representation
    async fn update(&self, id: i64, record: &R) -> Result<R, ApiError>;

    /// Delete a record by id
    async fn delete(&self, id: i64) -> Result<(), ApiError>;
}
