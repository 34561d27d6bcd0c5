//! Command handlers grouped by resource.

pub(crate) mod archive_policy;
pub(crate) mod status;
