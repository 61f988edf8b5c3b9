use crate::cli::PurgeArgs;
use crate::commands::to_json;
use crate::error::CliError;

use ccu_client::RequestContext;
use ccu_client::v2::{CcuV2Client, PurgeResponse};

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;

/// Printed form of an accepted purge: the reply plus its computed ETA.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PurgeOutput<'a> {
    #[serde(flatten)]
    purge: &'a PurgeResponse,
    eta: Option<DateTime<Utc>>,
}

pub async fn queue_length(
    client: &CcuV2Client,
    context: &RequestContext,
) -> Result<String, CliError> {
    let reply = client.queue_length(context).await?;
    info!("Queue length: {}", reply.queue_length);
    to_json(&reply)
}

pub async fn purge(
    client: &CcuV2Client,
    args: &PurgeArgs,
    context: &RequestContext,
) -> Result<String, CliError> {
    let reply = client.purge(&args.to_request(), context).await?;
    to_json(&PurgeOutput {
        purge: &reply,
        eta: reply.eta(),
    })
}

pub async fn status(
    client: &CcuV2Client,
    purge_id: &str,
    context: &RequestContext,
) -> Result<String, CliError> {
    let reply = client.purge_status(purge_id, context).await?;
    info!("Purge {purge_id}: {}", reply.purge_status);
    to_json(&reply)
}
