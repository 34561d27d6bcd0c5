//! Output renderers and formatting helpers for CLI commands.
//!
//! Renderers are pure: they return the text to print and never touch stdout.

use anyhow::anyhow;
use comfy_table::{Table, presets::ASCII_FULL};
use gnocchi_models::{ArchivePolicy, DefinitionRule, ServiceStatus};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

/// Column order for archive policy output, independent of the service's field order.
pub(crate) const ARCHIVE_POLICY_COLUMNS: [&str; 4] =
    ["name", "back_window", "definition", "aggregation_methods"];

const FIELD_HEADER: [&str; 2] = ["Field", "Value"];

/// Separator between cells of one record in value output.
pub(crate) const VALUE_CELL_SEPARATOR: &str = "\t";

pub(crate) fn render_policy_list(
    policies: &[ArchivePolicy],
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(policies),
        OutputFormat::Table => {
            let mut table = new_table();
            table.set_header(ARCHIVE_POLICY_COLUMNS.to_vec());
            for policy in policies {
                table.add_row(policy_cells(policy, format).to_vec());
            }
            Ok(table.to_string())
        }
        OutputFormat::Value => Ok(policies
            .iter()
            .map(|policy| policy_cells(policy, format).join(VALUE_CELL_SEPARATOR))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

pub(crate) fn render_policy(policy: &ArchivePolicy, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(policy),
        OutputFormat::Table | OutputFormat::Value => {
            Ok(render_fields(&policy_columns(policy, format), format))
        }
    }
}

pub(crate) fn render_status(status: &ServiceStatus, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(status),
        OutputFormat::Table | OutputFormat::Value => {
            let mut fields = vec![
                (
                    "storage/number of metric having measures to process",
                    status.storage.summary.metrics.to_string(),
                ),
                (
                    "storage/total number of measures to process",
                    status.storage.summary.measures.to_string(),
                ),
            ];
            if let Some(metricd) = &status.metricd {
                fields.push((
                    "metricd/processors",
                    join_lines(&metricd.processors, format),
                ));
            }
            Ok(render_fields(&fields, format))
        }
    }
}

/// Display cells of a policy in [`ARCHIVE_POLICY_COLUMNS`] order.
pub(crate) fn policy_cells(policy: &ArchivePolicy, format: OutputFormat) -> [String; 4] {
    [
        policy.name.clone(),
        policy
            .back_window
            .map_or_else(String::new, |back_window| back_window.to_string()),
        format_definition(&policy.definition, format),
        format_aggregation_methods(&policy.aggregation_methods),
    ]
}

/// `(column, cell)` pairs for single-entity output.
pub(crate) fn policy_columns(
    policy: &ArchivePolicy,
    format: OutputFormat,
) -> Vec<(&'static str, String)> {
    ARCHIVE_POLICY_COLUMNS
        .into_iter()
        .zip(policy_cells(policy, format))
        .collect()
}

/// Flatten rules to one `- key: value, ...` entry per rule.
///
/// Tables put each rule on its own line; value output keeps the whole
/// definition on one line so each policy stays a single record.
pub(crate) fn format_definition(rules: &[DefinitionRule], format: OutputFormat) -> String {
    let entries: Vec<String> = rules
        .iter()
        .map(|rule| {
            let pairs: Vec<String> = rule
                .iter()
                .map(|(key, value)| format!("{key}: {}", scalar(value)))
                .collect();
            format!("- {}", pairs.join(", "))
        })
        .collect();
    join_lines(&entries, format)
}

/// Sorted, comma-separated aggregation methods.
pub(crate) fn format_aggregation_methods(methods: &[String]) -> String {
    let mut sorted: Vec<&str> = methods.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join(", ")
}

fn join_lines(entries: &[String], format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => entries.join("\n"),
        OutputFormat::Json | OutputFormat::Value => entries.join("; "),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn render_fields(fields: &[(&str, String)], format: OutputFormat) -> String {
    if matches!(format, OutputFormat::Value) {
        return fields
            .iter()
            .map(|(_, value)| value.as_str())
            .collect::<Vec<_>>()
            .join("\n");
    }
    let mut table = new_table();
    table.set_header(FIELD_HEADER.to_vec());
    for (field, value) in fields {
        table.add_row(vec![(*field).to_string(), value.clone()]);
    }
    table.to_string()
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}
