#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! HTTP client for the Gnocchi REST API.
//!
//! Layout:
//! - `client.rs`: connection settings, authentication, and the request pipeline
//! - `archive_policy.rs`: archive policy CRUD behind [`ArchivePolicyApi`]
//! - `status.rs`: the `/v1/status` probe behind [`StatusApi`]
//! - `error.rs`: [`ClientError`] and status classification

pub mod archive_policy;
pub mod client;
pub mod error;
pub mod status;

pub use archive_policy::{ArchivePolicyApi, ArchivePolicyManager};
pub use client::{
    API_VERSION, Auth, ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, GnocchiClient,
    HEADER_AUTH_TOKEN, HEADER_REQUEST_ID,
};
pub use error::{ClientError, ClientResult};
pub use status::{StatusApi, StatusManager};
