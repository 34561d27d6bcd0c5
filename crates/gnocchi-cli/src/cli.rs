//! Argument parsing and command dispatch.

use clap::{Args, Parser, Subcommand, ValueEnum};
use gnocchi_client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use gnocchi_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
use serde_json::Value;
use url::Url;

use crate::client::{AppContext, CliResult, parse_url};
use crate::commands::archive_policy::handle_archive_policy;
use crate::commands::status::handle_status;
use crate::definition::{Rule, parse_definition};
use crate::payload::PayloadSource;

/// Parses CLI arguments, executes the requested command, and reports
/// failures on stderr. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format,
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err}");
    }

    let command_name = command_label(&cli.command);
    match dispatch(cli).await {
        Ok(()) => {
            tracing::debug!(command = command_name, "command succeeded");
            0
        }
        Err(err) => {
            let exit_code = err.exit_code();
            let message = err.display_message();
            tracing::debug!(command = command_name, exit_code, error = %message, "command failed");
            eprintln!("error: {message}");
            exit_code
        }
    }
}

pub(crate) async fn dispatch(cli: Cli) -> CliResult<()> {
    let ctx = AppContext::from_cli(&cli)?;

    let output = match cli.command {
        Command::ArchivePolicy(command) => {
            handle_archive_policy(&ctx.client.archive_policy(), command, cli.format).await?
        }
        Command::Status => Some(handle_status(&ctx.client.status(), cli.format).await?),
    };

    if let Some(text) = output {
        println!("{text}");
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    name = "gnocchi",
    version,
    about = "Command-line client for the Gnocchi time-series service"
)]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "GNOCCHI_ENDPOINT",
        value_parser = parse_url,
        default_value = DEFAULT_ENDPOINT,
        help = "Root URL of the Gnocchi API"
    )]
    pub(crate) endpoint: Url,
    #[arg(
        long = "os-auth-token",
        global = true,
        env = "OS_AUTH_TOKEN",
        hide_env_values = true,
        help = "Keystone token sent as X-Auth-Token"
    )]
    pub(crate) auth_token: Option<String>,
    #[arg(
        long,
        global = true,
        env = "GNOCCHI_USER",
        help = "User name for basic authentication"
    )]
    pub(crate) user: Option<String>,
    #[arg(
        long,
        global = true,
        env = "GNOCCHI_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(
        short = 'f',
        long = "format",
        alias = "formatter",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render data"
    )]
    pub(crate) format: OutputFormat,
    #[arg(
        long,
        global = true,
        env = "GNOCCHI_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL
    )]
    pub(crate) log_level: String,
    #[arg(
        long,
        global = true,
        env = "GNOCCHI_LOG_FORMAT",
        value_parser = parse_log_format,
        default_value = "pretty"
    )]
    pub(crate) log_format: LogFormat,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Manage archive policies.
    #[command(subcommand)]
    ArchivePolicy(ArchivePolicyCommand),
    /// Show the measure processing backlog.
    Status,
}

#[derive(Subcommand)]
pub(crate) enum ArchivePolicyCommand {
    /// List archive policies.
    List,
    /// Show an archive policy.
    Show(ArchivePolicyNameArgs),
    /// Create an archive policy.
    Create(ArchivePolicyCreateArgs),
    /// Update an archive policy.
    Update(ArchivePolicyUpdateArgs),
    /// Delete an archive policy.
    Delete(ArchivePolicyNameArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ArchivePolicyNameArgs {
    #[arg(value_parser = parse_policy_name, help = "Name of the archive policy")]
    pub(crate) name: String,
}

/// Arguments shared by create and update.
#[derive(Args, Debug, Clone)]
pub(crate) struct ArchivePolicyWriteArgs {
    #[arg(value_parser = parse_policy_name, help = "Name of the archive policy")]
    pub(crate) name: String,
    #[arg(
        short = 'd',
        long = "definition",
        required = true,
        value_name = "DEFINITION",
        value_parser = parse_definition,
        help = "Two attributes (separated by ',') of an archive policy definition \
                with its name and value separated with a ':'"
    )]
    pub(crate) definition: Vec<Rule>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ArchivePolicyCreateArgs {
    #[command(flatten)]
    pub(crate) base: ArchivePolicyWriteArgs,
    #[arg(
        short = 'b',
        long = "back-window",
        help = "Back window of the archive policy"
    )]
    pub(crate) back_window: Option<u64>,
    #[arg(
        short = 'm',
        long = "aggregation-method",
        value_name = "METHOD",
        help = "Aggregation method of the archive policy"
    )]
    pub(crate) aggregation_methods: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ArchivePolicyUpdateArgs {
    #[command(flatten)]
    pub(crate) base: ArchivePolicyWriteArgs,
}

impl PayloadSource for ArchivePolicyWriteArgs {
    fn field(&self, name: &str) -> Result<Option<Value>, serde_json::Error> {
        match name {
            "name" => Ok(Some(Value::String(self.name.clone()))),
            "definition" if !self.definition.is_empty() => {
                serde_json::to_value(&self.definition).map(Some)
            }
            _ => Ok(None),
        }
    }
}

impl PayloadSource for ArchivePolicyCreateArgs {
    fn field(&self, name: &str) -> Result<Option<Value>, serde_json::Error> {
        match name {
            "back_window" => Ok(self.back_window.map(Value::from)),
            "aggregation_methods" if self.aggregation_methods.is_empty() => Ok(None),
            "aggregation_methods" => serde_json::to_value(&self.aggregation_methods).map(Some),
            _ => self.base.field(name),
        }
    }
}

impl PayloadSource for ArchivePolicyUpdateArgs {
    fn field(&self, name: &str) -> Result<Option<Value>, serde_json::Error> {
        self.base.field(name)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
    Value,
}

/// Names are sent as a single path segment, so dot segments would address the
/// collection instead of a policy.
fn parse_policy_name(input: &str) -> Result<String, String> {
    match input {
        "" => Err("archive policy name must not be empty".to_string()),
        "." | ".." => Err(format!("'{input}' is not a valid archive policy name")),
        _ => Ok(input.to_string()),
    }
}

fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    input.parse::<LogFormat>().map_err(|err| err.to_string())
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::ArchivePolicy(ArchivePolicyCommand::List) => "archive_policy_list",
        Command::ArchivePolicy(ArchivePolicyCommand::Show(_)) => "archive_policy_show",
        Command::ArchivePolicy(ArchivePolicyCommand::Create(_)) => "archive_policy_create",
        Command::ArchivePolicy(ArchivePolicyCommand::Update(_)) => "archive_policy_update",
        Command::ArchivePolicy(ArchivePolicyCommand::Delete(_)) => "archive_policy_delete",
        Command::Status => "status",
    }
}
