//! REST API access: the shared HTTP client and list endpoints.

pub mod client;
pub mod envelope;

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::list::{ListEndpoint, ListParams, PageResult};
use crate::screens::Resource;

pub use client::ApiClient;
pub use envelope::{ListEnvelope, PaginationMeta};

/// The paginated collection behind one resource.
pub struct ResourceEndpoint<R> {
    client: Arc<ApiClient>,
    resource: Resource,
    _row: PhantomData<fn() -> R>,
}

impl<R> ResourceEndpoint<R> {
    pub fn new(client: Arc<ApiClient>, resource: Resource) -> Self {
        Self {
            client,
            resource,
            _row: PhantomData,
        }
    }
}

impl<R> ListEndpoint<R> for ResourceEndpoint<R>
where
    R: DeserializeOwned + Send + Sync + 'static,
{
    async fn fetch_page(&self, params: &ListParams) -> Result<PageResult<R>> {
        let envelope: ListEnvelope<R> = self
            .client
            .get_json(self.resource.path(), &params.to_query_pairs())
            .await?;
        envelope.into_page(params.limit)
    }
}
