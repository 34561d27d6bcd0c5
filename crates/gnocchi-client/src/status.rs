//! Service status endpoint.

use async_trait::async_trait;
use gnocchi_models::ServiceStatus;
use reqwest::Method;

use crate::client::GnocchiClient;
use crate::error::{ClientError, ClientResult};

/// Read access to the service status document.
#[async_trait]
pub trait StatusApi: Sync {
    /// Fetch `/v1/status`.
    async fn get(&self) -> ClientResult<ServiceStatus>;
}

/// HTTP implementation of [`StatusApi`].
#[derive(Debug, Clone, Copy)]
pub struct StatusManager<'a> {
    client: &'a GnocchiClient,
}

impl<'a> StatusManager<'a> {
    pub(crate) const fn new(client: &'a GnocchiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatusApi for StatusManager<'_> {
    async fn get(&self) -> ClientResult<ServiceStatus> {
        let url = self.client.url(&["status"])?;
        let response = self.client.send(Method::GET, url, None).await?;
        response
            .json::<ServiceStatus>()
            .await
            .map_err(|source| ClientError::Decode {
                what: "status",
                source,
            })
    }
}
