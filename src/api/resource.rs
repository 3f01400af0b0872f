//! REST-backed record source, one instance per resource collection

use std::marker::PhantomData;

use async_trait::async_trait;
use tracing::debug;

use crate::api::{ApiClient, ApiError, RecordSource};
use crate::models::Resource;

/// `RecordSource` implementation against the conventional REST endpoints:
/// `GET/POST /api/{resource}` and `GET/PUT/DELETE /api/{resource}/{id}`.
pub struct RestResource<R: Resource> {
    client: ApiClient,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Resource> RestResource<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _marker: PhantomData,
        }
    }

    fn collection_path() -> String {
        format!("/{}", R::NAME)
    }

    fn item_path(id: i64) -> String {
        format!("/{}/{}", R::NAME, id)
    }
}

#[async_trait]
impl<R: Resource> RecordSource<R> for RestResource<R> {
    async fn list_all(&self) -> Result<Vec<R>, ApiError> {
        debug!("GET {}", Self::collection_path());
        self.client.get_json(&Self::collection_path()).await
    }

    async fn get_one(&self, id: i64) -> Result<R, ApiError> {
        debug!("GET {}", Self::item_path(id));
        self.client.get_json(&Self::item_path(id)).await
    }

    async fn create(&self, record: &R) -> Result<R, ApiError> {
        debug!("POST {}", Self::collection_path());
        self.client
            .post_json(&Self::collection_path(), record)
            .await
    }

    async fn update(&self, id: i64, record: &R) -> Result<R, ApiError> {
        debug!("PUT {}", Self::item_path(id));
        self.client.put_json(&Self::item_path(id), record).await
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        debug!("DELETE {}", Self::item_path(id));
        self.client.delete(&Self::item_path(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Enrollment, Student};

    #[test]
    fn test_paths_follow_resource_name() {
        assert_eq!(RestResource::<Student>::collection_path(), "/students");
        assert_eq!(RestResource::<Student>::item_path(7), "/students/7");
        assert_eq!(
            RestResource::<Enrollment>::item_path(12),
            "/enrollments/12"
        );
    }
}
