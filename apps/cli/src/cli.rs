//! Command-line definition for `ccu`.

use ccu_client::{v2, v3};

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Purge cached content through the CCU API
#[derive(Debug, Parser)]
#[command(name = "ccu")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Give up on the request after this many seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Also write logs to `ccu.log` in this directory
    #[arg(long, global = true, env = "CCU_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Number of purges waiting in the default v2 queue
    QueueLength,

    /// Submit a v2 purge
    Purge(PurgeArgs),

    /// Status of a v2 purge
    Status {
        /// Id returned by `purge`
        purge_id: String,
    },

    /// Submit a v3 (Fast Purge) purge
    #[command(name = "purge-v3")]
    PurgeV3(PurgeV3Args),
}

#[derive(Debug, Args)]
pub struct PurgeArgs {
    /// Queue to submit to
    #[arg(long)]
    pub queue: Option<String>,

    #[arg(long = "type", value_enum)]
    pub purge_type: Option<PurgeTypeArg>,

    #[arg(long, value_enum)]
    pub action: Option<PurgeActionArg>,

    #[arg(long, value_enum)]
    pub domain: Option<NetworkArg>,

    /// URLs or CP codes
    #[arg(required = true)]
    pub objects: Vec<String>,
}

#[derive(Debug, Args)]
pub struct PurgeV3Args {
    #[arg(long = "type", value_enum)]
    pub purge_type: Option<PurgeV3TypeArg>,

    #[arg(long, value_enum)]
    pub action: Option<PurgeV3ActionArg>,

    #[arg(long, value_enum)]
    pub network: Option<NetworkArg>,

    /// Host the object paths belong to
    #[arg(long)]
    pub hostname: Option<String>,

    /// Credentials file (default `~/.edgerc`, or `$EDGERC`)
    #[arg(long, value_name = "PATH")]
    pub edgerc: Option<PathBuf>,

    /// Section of the credentials file
    #[arg(long)]
    pub section: Option<String>,

    /// URLs, CP codes or cache tags
    #[arg(required = true)]
    pub objects: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PurgeTypeArg {
    Arl,
    Cpcode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PurgeActionArg {
    Remove,
    Invalidate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PurgeV3TypeArg {
    Url,
    Cpcode,
    Tag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PurgeV3ActionArg {
    Invalidate,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NetworkArg {
    Production,
    Staging,
}

impl From<PurgeTypeArg> for v2::PurgeType {
    fn from(value: PurgeTypeArg) -> Self {
        match value {
            PurgeTypeArg::Arl => v2::PurgeType::Arl,
            PurgeTypeArg::Cpcode => v2::PurgeType::Cpcode,
        }
    }
}

impl From<PurgeActionArg> for v2::PurgeAction {
    fn from(value: PurgeActionArg) -> Self {
        match value {
            PurgeActionArg::Remove => v2::PurgeAction::Remove,
            PurgeActionArg::Invalidate => v2::PurgeAction::Invalidate,
        }
    }
}

impl From<NetworkArg> for v2::Domain {
    fn from(value: NetworkArg) -> Self {
        match value {
            NetworkArg::Production => v2::Domain::Production,
            NetworkArg::Staging => v2::Domain::Staging,
        }
    }
}

impl From<PurgeV3TypeArg> for v3::PurgeType {
    fn from(value: PurgeV3TypeArg) -> Self {
        match value {
            PurgeV3TypeArg::Url => v3::PurgeType::Url,
            PurgeV3TypeArg::Cpcode => v3::PurgeType::Cpcode,
            PurgeV3TypeArg::Tag => v3::PurgeType::Tag,
        }
    }
}

impl From<PurgeV3ActionArg> for v3::PurgeAction {
    fn from(value: PurgeV3ActionArg) -> Self {
        match value {
            PurgeV3ActionArg::Invalidate => v3::PurgeAction::Invalidate,
            PurgeV3ActionArg::Delete => v3::PurgeAction::Delete,
        }
    }
}

impl From<NetworkArg> for v3::Network {
    fn from(value: NetworkArg) -> Self {
        match value {
            NetworkArg::Production => v3::Network::Production,
            NetworkArg::Staging => v3::Network::Staging,
        }
    }
}

impl PurgeArgs {
    /// The request these arguments describe. Unset flags stay unset so the
    /// client applies its own defaults.
    pub fn to_request(&self) -> v2::PurgeRequest {
        v2::PurgeRequest {
            queue: self.queue.clone().unwrap_or_default(),
            purge_type: self.purge_type.map(Into::into),
            action: self.action.map(Into::into),
            domain: self.domain.map(Into::into),
            objects: self.objects.clone(),
        }
    }
}

impl PurgeV3Args {
    pub fn to_request(&self) -> v3::PurgeRequest {
        v3::PurgeRequest {
            purge_type: self.purge_type.map(Into::into),
            action: self.action.map(Into::into),
            network: self.network.map(Into::into),
            hostname: self.hostname.clone(),
            objects: self.objects.clone(),
        }
    }
}
