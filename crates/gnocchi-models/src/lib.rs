#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Gnocchi REST API.
//!
//! The CLI decodes service responses into these types and the client crate
//! uses them for error bodies. Rule values are kept as raw JSON because the
//! service reports them as strings on some versions and numbers on others.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Attribute names permitted inside an archive-policy rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RuleAttribute {
    /// Interval between two aggregated points.
    Granularity,
    /// Number of points retained.
    Points,
    /// Total period covered by the rule.
    Timespan,
}

impl RuleAttribute {
    /// Every attribute in canonical display order.
    pub const ALL: [Self; 3] = [Self::Granularity, Self::Points, Self::Timespan];

    /// Wire name of the attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Granularity => "granularity",
            Self::Points => "points",
            Self::Timespan => "timespan",
        }
    }
}

impl Display for RuleAttribute {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Raised when a string does not name a [`RuleAttribute`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rule attribute")]
pub struct UnknownRuleAttribute {
    /// The rejected attribute name.
    pub name: String,
}

impl FromStr for RuleAttribute {
    type Err = UnknownRuleAttribute;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.as_str() == value)
            .ok_or_else(|| UnknownRuleAttribute {
                name: value.to_string(),
            })
    }
}

/// One rule of an archive policy definition as reported by the service.
///
/// Keys are attribute names; a `BTreeMap` keeps them in
/// `granularity, points, timespan` order.
pub type DefinitionRule = BTreeMap<String, Value>;

/// Archive policy resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchivePolicy {
    /// Unique policy name.
    pub name: String,
    /// Number of coarsest periods to keep for late measures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_window: Option<u64>,
    /// Ordered rules describing retention.
    #[serde(default)]
    pub definition: Vec<DefinitionRule>,
    /// Aggregation methods computed for metrics using the policy.
    #[serde(default)]
    pub aggregation_methods: Vec<String>,
}

/// Backlog counters reported under `storage.summary`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BacklogSummary {
    /// Metrics with measures waiting to be processed.
    #[serde(default)]
    pub metrics: u64,
    /// Measures waiting to be processed.
    #[serde(default)]
    pub measures: u64,
    /// Fields not modelled above, kept as sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Storage section of the status document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageStatus {
    /// Aggregated backlog counters.
    #[serde(default)]
    pub summary: BacklogSummary,
    /// Fields not modelled above, such as `measures_to_process`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Processing daemon section of the status document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricdStatus {
    /// Identifiers of the metricd processors currently registered.
    #[serde(default)]
    pub processors: Vec<String>,
    /// Fields not modelled above, kept as sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Document returned by `GET /v1/status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceStatus {
    /// Measure backlog information.
    #[serde(default)]
    pub storage: StorageStatus,
    /// Processing daemons, absent on older services.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metricd: Option<MetricdStatus>,
    /// Top-level sections not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Error document emitted by the service on non-success responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    /// HTTP status code echoed by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Short reason phrase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Human-readable description, a string or a structured validation cause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
}

impl ErrorBody {
    /// Best human-readable message carried by the document.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match &self.description {
            Some(Value::String(text)) if !text.trim().is_empty() => Some(text.trim().to_string()),
            Some(Value::Object(map)) => map
                .get("detail")
                .or_else(|| map.get("reason"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| Some(Value::Object(map.clone()).to_string())),
            _ => self.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rule_attribute_parses_known_names_only() {
        assert_eq!(
            "granularity".parse::<RuleAttribute>(),
            Ok(RuleAttribute::Granularity)
        );
        assert_eq!("points".parse::<RuleAttribute>(), Ok(RuleAttribute::Points));
        assert_eq!(
            "timespan".parse::<RuleAttribute>(),
            Ok(RuleAttribute::Timespan)
        );
        let err = "Points".parse::<RuleAttribute>().expect_err("case sensitive");
        assert_eq!(err.name, "Points");
    }

    #[test]
    fn archive_policy_decodes_mixed_rule_values() {
        let policy: ArchivePolicy = serde_json::from_value(json!({
            "name": "low",
            "back_window": 0,
            "definition": [
                {"granularity": "0:05:00", "points": 12, "timespan": "1:00:00"}
            ],
            "aggregation_methods": ["mean", "max"]
        }))
        .expect("policy decodes");

        assert_eq!(policy.name, "low");
        assert_eq!(policy.back_window, Some(0));
        assert_eq!(policy.definition[0]["points"], json!(12));
        assert_eq!(policy.definition[0]["granularity"], json!("0:05:00"));
    }

    #[test]
    fn archive_policy_tolerates_missing_optional_fields() {
        let policy: ArchivePolicy =
            serde_json::from_value(json!({"name": "bare"})).expect("policy decodes");
        assert!(policy.back_window.is_none());
        assert!(policy.definition.is_empty());
        assert!(policy.aggregation_methods.is_empty());
    }

    #[test]
    fn error_body_prefers_description() {
        let body: ErrorBody = serde_json::from_value(json!({
            "code": 404,
            "title": "Not Found",
            "description": "Archive policy missing does not exist"
        }))
        .expect("error decodes");
        assert_eq!(
            body.message().as_deref(),
            Some("Archive policy missing does not exist")
        );

        let structured: ErrorBody = serde_json::from_value(json!({
            "code": 400,
            "title": "Bad Request",
            "description": {"cause": "Invalid input", "reason": "points must be positive"}
        }))
        .expect("error decodes");
        assert_eq!(
            structured.message().as_deref(),
            Some("points must be positive")
        );

        let title_only = ErrorBody {
            title: Some("Conflict".into()),
            ..ErrorBody::default()
        };
        assert_eq!(title_only.message().as_deref(), Some("Conflict"));
    }

    #[test]
    fn service_status_reads_backlog() {
        let status: ServiceStatus = serde_json::from_value(json!({
            "storage": {"summary": {"metrics": 3, "measures": 42}},
            "metricd": {"processors": ["host-a.1", "host-b.1"]}
        }))
        .expect("status decodes");
        assert_eq!(status.storage.summary.measures, 42);
        assert_eq!(status.storage.summary.metrics, 3);
        assert_eq!(
            status.metricd.map(|m| m.processors.len()),
            Some(2)
        );
    }

    #[test]
    fn service_status_keeps_unmodelled_fields() {
        let raw = json!({
            "storage": {
                "summary": {"metrics": 1, "measures": 2},
                "measures_to_process": {"5f1a": 2}
            },
            "metricd": {"processors": ["a"], "statistics": {"processed": 7}},
            "version": "4.6"
        });
        let status: ServiceStatus = serde_json::from_value(raw.clone()).expect("status decodes");
        assert_eq!(status.storage.extra["measures_to_process"], json!({"5f1a": 2}));
        assert_eq!(status.extra["version"], json!("4.6"));

        let encoded = serde_json::to_value(&status).expect("status encodes");
        assert_eq!(encoded, raw);
    }
}
