use gnocchi_client::StatusApi;

use crate::cli::OutputFormat;
use crate::client::CliResult;
use crate::output::render_status;

pub(crate) async fn handle_status<A>(api: &A, format: OutputFormat) -> CliResult<String>
where
    A: StatusApi + ?Sized,
{
    let status = api.get().await?;
    tracing::debug!(
        measures = status.storage.summary.measures,
        metrics = status.storage.summary.metrics,
        "status fetched"
    );
    render_status(&status, format)
}
