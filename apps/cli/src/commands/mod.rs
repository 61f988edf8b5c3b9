//! Subcommand execution. Each command returns the text to print on success.

pub mod v2;
pub mod v3;

use crate::cli::{Cli, Commands};
use crate::error::CliError;

use ccu_client::RequestContext;
use ccu_client::v2::CcuV2Client;
use ccu_client::v3::CcuV3Client;

use std::time::Duration;

use log::debug;
use serde::Serialize;

/// Run the parsed command line against the live API.
pub async fn execute(cli: Cli) -> Result<String, CliError> {
    let context = request_context(cli.timeout);

    match cli.command {
        Commands::QueueLength => v2::queue_length(&CcuV2Client::from_env()?, &context).await,
        Commands::Purge(args) => v2::purge(&CcuV2Client::from_env()?, &args, &context).await,
        Commands::Status { purge_id } => {
            v2::status(&CcuV2Client::from_env()?, &purge_id, &context).await
        }
        Commands::PurgeV3(args) => {
            let mut client = CcuV3Client::new()?;
            if let Some(path) = &args.edgerc {
                client = client.with_edgerc(path);
            }
            if let Some(section) = &args.section {
                client = client.with_section(section);
            }
            v3::purge(&client, &args, &context).await
        }
    }
}

/// Context bounded by `timeout_secs`, or unbounded.
pub fn request_context(timeout_secs: Option<u64>) -> RequestContext {
    match timeout_secs {
        Some(secs) => {
            debug!("Request deadline: {secs}s");
            RequestContext::with_timeout(Duration::from_secs(secs))
        }
        None => RequestContext::background(),
    }
}

#[track_caller]
pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::cli(format!("Failed to format response: {e}")))
}
