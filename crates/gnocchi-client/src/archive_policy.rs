//! Archive policy endpoints.

use async_trait::async_trait;
use gnocchi_models::ArchivePolicy;
use reqwest::Method;
use serde_json::{Map, Value};

use crate::client::GnocchiClient;
use crate::error::{ClientError, ClientResult};

const RESOURCE: &str = "archive_policy";

/// Operations the command layer needs on archive policies.
///
/// Every method performs exactly one round trip and relays service errors
/// without interpretation.
#[async_trait]
pub trait ArchivePolicyApi: Sync {
    /// List every archive policy.
    async fn list(&self) -> ClientResult<Vec<ArchivePolicy>>;
    /// Fetch one policy by name.
    async fn get(&self, name: &str) -> ClientResult<ArchivePolicy>;
    /// Create a policy from a request body.
    async fn create(&self, archive_policy: &Map<String, Value>) -> ClientResult<ArchivePolicy>;
    /// Patch a policy.
    async fn update(
        &self,
        name: &str,
        archive_policy: &Map<String, Value>,
    ) -> ClientResult<ArchivePolicy>;
    /// Delete a policy.
    async fn delete(&self, name: &str) -> ClientResult<()>;
}

/// HTTP implementation of [`ArchivePolicyApi`].
#[derive(Debug, Clone, Copy)]
pub struct ArchivePolicyManager<'a> {
    client: &'a GnocchiClient,
}

impl<'a> ArchivePolicyManager<'a> {
    pub(crate) const fn new(client: &'a GnocchiClient) -> Self {
        Self { client }
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    what: &'static str,
) -> ClientResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|source| ClientError::Decode { what, source })
}

#[async_trait]
impl ArchivePolicyApi for ArchivePolicyManager<'_> {
    async fn list(&self) -> ClientResult<Vec<ArchivePolicy>> {
        let url = self.client.url(&[RESOURCE])?;
        let response = self.client.send(Method::GET, url, None).await?;
        decode(response, "archive policy list").await
    }

    async fn get(&self, name: &str) -> ClientResult<ArchivePolicy> {
        let url = self.client.url(&[RESOURCE, name])?;
        let response = self.client.send(Method::GET, url, None).await?;
        decode(response, "archive policy").await
    }

    async fn create(&self, archive_policy: &Map<String, Value>) -> ClientResult<ArchivePolicy> {
        let url = self.client.url(&[RESOURCE])?;
        let response = self
            .client
            .send(Method::POST, url, Some(archive_policy))
            .await?;
        decode(response, "archive policy").await
    }

    async fn update(
        &self,
        name: &str,
        archive_policy: &Map<String, Value>,
    ) -> ClientResult<ArchivePolicy> {
        let url = self.client.url(&[RESOURCE, name])?;
        let response = self
            .client
            .send(Method::PATCH, url, Some(archive_policy))
            .await?;
        decode(response, "archive policy").await
    }

    async fn delete(&self, name: &str) -> ClientResult<()> {
        let url = self.client.url(&[RESOURCE, name])?;
        self.client.send(Method::DELETE, url, None).await?;
        Ok(())
    }
}
