//! Shared client wiring and error types for the CLI.

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use gnocchi_client::{Auth, ClientConfig, ClientError, GnocchiClient};
use url::Url;

use crate::cli::Cli;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::InvalidPathSegment { .. } => Self::validation(err.to_string()),
            _ => Self::failure(err),
        }
    }
}

/// Application context passed to command handlers.
pub(crate) struct AppContext {
    pub(crate) client: GnocchiClient,
}

impl AppContext {
    /// Build an authenticated client handle from global options.
    pub(crate) fn from_cli(cli: &Cli) -> CliResult<Self> {
        let auth = resolve_auth(cli.auth_token.as_deref(), cli.user.as_deref())?;
        let config = ClientConfig {
            endpoint: cli.endpoint.clone(),
            auth,
            timeout: Duration::from_secs(cli.timeout),
            request_id: None,
        };
        let client = GnocchiClient::new(config).map_err(|err| match err {
            ClientError::InvalidEndpoint { .. } | ClientError::InvalidHeader { .. } => {
                CliError::validation(err.to_string())
            }
            other => CliError::failure(other),
        })?;
        tracing::debug!(
            endpoint = %cli.endpoint,
            request_id = client.request_id(),
            "client ready"
        );
        Ok(Self { client })
    }
}

/// Parse the endpoint URL provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

/// Pick credentials; a token takes precedence over a basic-auth user.
pub(crate) fn resolve_auth(token: Option<&str>, user: Option<&str>) -> CliResult<Option<Auth>> {
    if let Some(raw) = token {
        let token = raw.trim();
        if token.is_empty() {
            return Err(CliError::validation("auth token cannot be an empty string"));
        }
        return Ok(Some(Auth::Token(token.to_string())));
    }

    let Some(raw) = user else {
        return Ok(None);
    };
    let user = raw.trim();
    if user.is_empty() {
        return Err(CliError::validation("user cannot be an empty string"));
    }
    Ok(Some(Auth::Basic {
        user: user.to_string(),
    }))
}
