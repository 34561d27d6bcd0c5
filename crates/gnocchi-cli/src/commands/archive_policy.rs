use gnocchi_client::ArchivePolicyApi;

use crate::cli::{
    ArchivePolicyCommand, ArchivePolicyCreateArgs, ArchivePolicyNameArgs,
    ArchivePolicyUpdateArgs, OutputFormat,
};
use crate::client::CliResult;
use crate::output::{render_policy, render_policy_list};
use crate::payload::{CREATE_FIELDS, UPDATE_FIELDS, build_payload};

/// Run one archive policy command; returns the text to print, if any.
pub(crate) async fn handle_archive_policy<A>(
    api: &A,
    command: ArchivePolicyCommand,
    format: OutputFormat,
) -> CliResult<Option<String>>
where
    A: ArchivePolicyApi + ?Sized,
{
    match command {
        ArchivePolicyCommand::List => handle_list(api, format).await.map(Some),
        ArchivePolicyCommand::Show(args) => handle_show(api, args, format).await.map(Some),
        ArchivePolicyCommand::Create(args) => handle_create(api, args, format).await.map(Some),
        ArchivePolicyCommand::Update(args) => handle_update(api, args, format).await.map(Some),
        ArchivePolicyCommand::Delete(args) => {
            handle_delete(api, args).await?;
            Ok(None)
        }
    }
}

pub(crate) async fn handle_list<A>(api: &A, format: OutputFormat) -> CliResult<String>
where
    A: ArchivePolicyApi + ?Sized,
{
    let policies = api.list().await?;
    tracing::debug!(count = policies.len(), "archive policies listed");
    render_policy_list(&policies, format)
}

pub(crate) async fn handle_show<A>(
    api: &A,
    args: ArchivePolicyNameArgs,
    format: OutputFormat,
) -> CliResult<String>
where
    A: ArchivePolicyApi + ?Sized,
{
    let policy = api.get(&args.name).await?;
    render_policy(&policy, format)
}

pub(crate) async fn handle_create<A>(
    api: &A,
    args: ArchivePolicyCreateArgs,
    format: OutputFormat,
) -> CliResult<String>
where
    A: ArchivePolicyApi + ?Sized,
{
    let payload = build_payload(&args, &CREATE_FIELDS)?;
    let policy = api.create(payload.as_map()).await?;
    tracing::info!(name = %policy.name, "archive policy created");
    render_policy(&policy, format)
}

pub(crate) async fn handle_update<A>(
    api: &A,
    args: ArchivePolicyUpdateArgs,
    format: OutputFormat,
) -> CliResult<String>
where
    A: ArchivePolicyApi + ?Sized,
{
    let payload = build_payload(&args, &UPDATE_FIELDS)?;
    let policy = api.update(&args.base.name, payload.as_map()).await?;
    tracing::info!(name = %policy.name, "archive policy updated");
    render_policy(&policy, format)
}

pub(crate) async fn handle_delete<A>(api: &A, args: ArchivePolicyNameArgs) -> CliResult<()>
where
    A: ArchivePolicyApi + ?Sized,
{
    api.delete(&args.name).await?;
    tracing::info!(name = %args.name, "archive policy deleted");
    Ok(())
}
