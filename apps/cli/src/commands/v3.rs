use crate::cli::PurgeV3Args;
use crate::commands::to_json;
use crate::error::CliError;

use ccu_client::RequestContext;
use ccu_client::v3::CcuV3Client;

pub async fn purge(
    client: &CcuV3Client,
    args: &PurgeV3Args,
    context: &RequestContext,
) -> Result<String, CliError> {
    let reply = client.purge(&args.to_request(), Some(context)).await?;
    to_json(&reply)
}
