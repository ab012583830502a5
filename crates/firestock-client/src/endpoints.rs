//! REST endpoints of one entity collection.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use firestock_core::{ApiResponse, CrudEndpoints, ListParams, PagedResponse, Result};

use crate::transport::HttpTransport;

/// CRUD endpoints following the backend's collection convention:
///
/// | operation | request                                         |
/// |-----------|-------------------------------------------------|
/// | list      | `GET {path}?page=&pageSize=&searchTerm=`        |
/// | create    | `POST {path}`                                   |
/// | update    | `PUT {path}/{id}`                               |
/// | delete    | `DELETE {path}/{id}`                            |
pub struct RestEndpoints<I, C, U = C> {
    transport: Arc<HttpTransport>,
    path: String,
    _types: PhantomData<fn() -> (I, C, U)>,
}

impl<I, C, U> RestEndpoints<I, C, U> {
    pub fn new(transport: Arc<HttpTransport>, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = format!("/{}", path.trim_matches('/'));
        Self {
            transport,
            path,
            _types: PhantomData,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn transport(&self) -> &Arc<HttpTransport> {
        &self.transport
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path, urlencoding::encode(id))
    }
}

impl<I, C, U> Clone for RestEndpoints<I, C, U> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            path: self.path.clone(),
            _types: PhantomData,
        }
    }
}

#[async_trait]
impl<I, C, U> CrudEndpoints for RestEndpoints<I, C, U>
where
    I: DeserializeOwned + Clone + Send + Sync + 'static,
    C: Serialize + Send + Sync + 'static,
    U: Serialize + Send + Sync + 'static,
{
    type Item = I;
    type Create = C;
    type Update = U;

    fn name(&self) -> &str {
        &self.path
    }

    async fn list(&self, params: &ListParams) -> Result<ApiResponse<PagedResponse<I>>> {
        self.transport.get(&self.path, params).await
    }

    async fn create(&self, body: &C) -> Result<ApiResponse<Option<I>>> {
        self.transport.post(&self.path, body).await
    }

    async fn update(&self, id: &str, body: &U) -> Result<ApiResponse<Option<I>>> {
        self.transport.put(&self.item_path(id), body).await
    }

    async fn delete(&self, id: &str) -> Result<ApiResponse<Option<JsonValue>>> {
        self.transport.delete(&self.item_path(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use firestock_core::{Product, ProductInput};

    fn endpoints(path: &str) -> RestEndpoints<Product, ProductInput> {
        let transport = Arc::new(HttpTransport::new(ClientConfig::default()).unwrap());
        RestEndpoints::new(transport, path)
    }

    #[test]
    fn test_path_is_normalized() {
        assert_eq!(endpoints("products").path(), "/products");
        assert_eq!(endpoints("/products/").path(), "/products");
    }

    #[test]
    fn test_item_path_encodes_id() {
        let e = endpoints("/products");
        assert_eq!(e.item_path("p-1"), "/products/p-1");
        assert_eq!(e.item_path("a/b"), "/products/a%2Fb");
    }

    #[test]
    fn test_name_is_path() {
        assert_eq!(endpoints("/locations").name(), "/locations");
    }
}
