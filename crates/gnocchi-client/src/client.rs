//! Connection settings and the shared request pipeline.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde_json::{Map, Value};
use url::Url;
use uuid::Uuid;

use crate::archive_policy::ArchivePolicyManager;
use crate::error::{ClientError, ClientResult};
use crate::status::StatusManager;

/// Keystone token header.
pub const HEADER_AUTH_TOKEN: &str = "x-auth-token";
/// Correlation header attached to every request.
pub const HEADER_REQUEST_ID: &str = "x-request-id";
/// API version prefix.
pub const API_VERSION: &str = "v1";

/// Default endpoint of a local Gnocchi API.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8041";
/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Credentials presented to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    /// Pre-issued Keystone token sent as `X-Auth-Token`.
    Token(String),
    /// HTTP basic auth with an empty password.
    Basic {
        /// User name.
        user: String,
    },
}

/// Settings used to build a [`GnocchiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root of the Gnocchi API, without the version prefix.
    pub endpoint: Url,
    /// Optional credentials.
    pub auth: Option<Auth>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Identifier sent as `X-Request-Id`; generated when `None`.
    pub request_id: Option<String>,
}

impl ClientConfig {
    /// Configuration for `endpoint` with no credentials and default timeout.
    #[must_use]
    pub const fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            auth: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            request_id: None,
        }
    }
}

/// Authenticated handle exposing resource-typed managers.
#[derive(Debug, Clone)]
pub struct GnocchiClient {
    http: reqwest::Client,
    endpoint: Url,
    auth: Option<Auth>,
    request_id: String,
}

impl GnocchiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint cannot carry path segments, when the
    /// request id is not a valid header value, or when reqwest fails to build.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        if config.endpoint.cannot_be_a_base() {
            return Err(ClientError::InvalidEndpoint {
                endpoint: config.endpoint.to_string(),
            });
        }

        let request_id = config
            .request_id
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let mut default_headers = HeaderMap::new();
        let value = HeaderValue::from_str(&request_id).map_err(|_| ClientError::InvalidHeader {
            header: HEADER_REQUEST_ID,
        })?;
        default_headers.insert(HEADER_REQUEST_ID, value);

        if let Some(Auth::Token(token)) = &config.auth {
            let mut value =
                HeaderValue::from_str(token).map_err(|_| ClientError::InvalidHeader {
                    header: HEADER_AUTH_TOKEN,
                })?;
            value.set_sensitive(true);
            default_headers.insert(HEADER_AUTH_TOKEN, value);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|source| ClientError::Build { source })?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
            auth: config.auth,
            request_id,
        })
    }

    /// Archive policy operations.
    #[must_use]
    pub const fn archive_policy(&self) -> ArchivePolicyManager<'_> {
        ArchivePolicyManager::new(self)
    }

    /// Service status probe.
    #[must_use]
    pub const fn status(&self) -> StatusManager<'_> {
        StatusManager::new(self)
    }

    /// Identifier attached to every request from this handle.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Resolve `segments` under `<endpoint>/v1`, percent-encoding each one.
    ///
    /// Empty and dot segments are rejected since they resolve to the parent
    /// collection.
    pub(crate) fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        if let Some(segment) = segments
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            return Err(ClientError::InvalidPathSegment {
                segment: (*segment).to_string(),
            });
        }
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidEndpoint {
                endpoint: self.endpoint.to_string(),
            })?
            .pop_if_empty()
            .push(API_VERSION)
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.auth {
            Some(Auth::Basic { user }) => builder.basic_auth(user, Some("")),
            _ => builder,
        }
    }

    /// Send a request and turn non-success statuses into [`ClientError`].
    pub(crate) async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&Map<String, Value>>,
    ) -> ClientResult<Response> {
        tracing::debug!(%method, %url, request_id = %self.request_id, "sending request");
        let mut builder = self.request(method, url.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(err) => {
                tracing::debug!(
                    %url,
                    status = status.as_u16(),
                    error = %err,
                    "failed to read error body"
                );
                Vec::new()
            }
        };
        let err = ClientError::from_status(status, &bytes);
        tracing::debug!(%url, status = status.as_u16(), error = %err, "request rejected");
        Err(err)
    }
}
