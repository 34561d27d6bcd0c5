//! Request bodies assembled from parsed arguments.

use anyhow::anyhow;
use serde_json::{Map, Value};

use crate::client::{CliError, CliResult};

/// Fields sent when creating an archive policy.
pub(crate) const CREATE_FIELDS: [&str; 4] =
    ["name", "back_window", "aggregation_methods", "definition"];

/// Fields sent when updating an archive policy.
pub(crate) const UPDATE_FIELDS: [&str; 1] = ["definition"];

/// Argument structs that can be read by attribute name.
pub(crate) trait PayloadSource {
    /// Value of `name` when the user supplied it, `None` when unset or unknown.
    fn field(&self, name: &str) -> Result<Option<Value>, serde_json::Error>;
}

/// JSON object submitted to the client; never holds null values.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Payload(Map<String, Value>);

impl Payload {
    pub(crate) const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Copy the whitelisted `fields` that are set on `source`, in order.
pub(crate) fn build_payload<S>(source: &S, fields: &[&str]) -> CliResult<Payload>
where
    S: PayloadSource + ?Sized,
{
    let mut payload = Map::new();
    for &name in fields {
        let value = source.field(name).map_err(|err| {
            CliError::failure(anyhow!("failed to encode argument '{name}': {err}"))
        })?;
        match value {
            Some(Value::Null) | None => {}
            Some(value) => {
                payload.insert(name.to_string(), value);
            }
        }
    }
    Ok(Payload(payload))
}
