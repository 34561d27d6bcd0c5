//! Parser for `-d/--definition` values.
//!
//! A definition is `attr:value[,attr:value...]` where `attr` is one of
//! `granularity`, `points` or `timespan`. At least two distinct attributes are
//! required since the service derives the third. Values are kept verbatim.

use std::collections::BTreeMap;

use gnocchi_models::RuleAttribute;
use serde::Serialize;
use thiserror::Error;

/// Minimum number of distinct attributes in a rule.
pub(crate) const MIN_RULE_ATTRIBUTES: usize = 2;

/// One archive-policy rule as typed on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub(crate) struct Rule(BTreeMap<RuleAttribute, String>);

impl Rule {
    #[cfg(test)]
    pub(crate) fn get(&self, attribute: RuleAttribute) -> Option<&str> {
        self.0.get(&attribute).map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

/// Reasons a definition string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum DefinitionError {
    /// An attribute outside the permitted set.
    #[error("unknown attribute '{attribute}', expected granularity, points or timespan")]
    UnknownAttribute {
        /// Rejected attribute name.
        attribute: String,
    },
    /// Fewer than two distinct attributes.
    #[error("a definition needs at least two of granularity, points and timespan")]
    TooFewAttributes,
}

/// Parse one definition string into a [`Rule`].
///
/// Repeated attributes overwrite earlier ones, so the last value wins.
pub(crate) fn parse_definition(input: &str) -> Result<Rule, DefinitionError> {
    let mut rule = BTreeMap::new();
    for part in input.split(',') {
        let (attr, value) = part.split_once(':').unwrap_or((part, ""));
        let attribute =
            attr.parse::<RuleAttribute>()
                .map_err(|err| DefinitionError::UnknownAttribute {
                    attribute: err.name,
                })?;
        rule.insert(attribute, value.to_string());
    }

    if rule.len() < MIN_RULE_ATTRIBUTES {
        return Err(DefinitionError::TooFewAttributes);
    }
    Ok(Rule(rule))
}
