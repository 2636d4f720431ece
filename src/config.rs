//! Command-line and environment configuration for both process roles.

use crate::node::client::DEFAULT_REQUEST_TIMEOUT;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::net::{Ipv4Addr, SocketAddr};
use std::num::{NonZeroU64, NonZeroUsize};
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "p2p-torrent", version, about = "Chunk tracker and storage nodes")]
pub struct Cli {
    /// Maximum log level (error, warn, info, debug, trace).
    #[arg(long, global = true, env = "P2P_LOG_LEVEL", default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the central tracker.
    Tracker(TrackerArgs),
    /// Run a storage node with an interactive session.
    Node(NodeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct TrackerArgs {
    #[arg(long, env = "P2P_BIND", default_value = "0.0.0.0:50051")]
    pub bind: SocketAddr,

    /// Holders assigned to each chunk on put.
    #[arg(long, env = "P2P_REPLICAS", default_value = "3")]
    pub replicas: NonZeroUsize,

    #[arg(long, env = "P2P_CHUNK_SIZE_MB", default_value = "1")]
    pub chunk_size_mb: NonZeroU64,

    /// Seconds between stats log lines; 0 disables the reporter.
    #[arg(long, env = "P2P_STATS_INTERVAL_SECS", default_value_t = 5)]
    pub stats_interval_secs: u64,
}

#[derive(Debug, Clone, Args)]
pub struct NodeArgs {
    /// This node's `ip:port`. Prompted for on stdin when absent.
    #[arg(long, env = "P2P_NODE_ID")]
    pub node_id: Option<String>,

    #[arg(long, env = "P2P_TRACKER", default_value = "127.0.0.1:50051")]
    pub tracker: String,

    /// Must match the tracker's chunk size.
    #[arg(long, env = "P2P_CHUNK_SIZE_MB", default_value = "1")]
    pub chunk_size_mb: NonZeroU64,

    #[arg(long, env = "P2P_REQUEST_TIMEOUT_MS", default_value_t = DEFAULT_REQUEST_TIMEOUT.as_millis() as u64)]
    pub request_timeout_ms: u64,
}

impl TrackerArgs {
    pub fn stats_interval(&self) -> Option<Duration> {
        (self.stats_interval_secs > 0).then(|| Duration::from_secs(self.stats_interval_secs))
    }
}

impl NodeArgs {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Address a node's chunk server binds to: every interface, on the port of
/// its advertised `host:port` id.
pub fn listen_addr(node_id: &str) -> Result<SocketAddr> {
    let (_, port) = node_id
        .trim()
        .rsplit_once(':')
        .with_context(|| format!("node id '{}' is not in host:port form", node_id))?;
    let port: u16 = port
        .parse()
        .with_context(|| format!("invalid port in node id '{}'", node_id))?;
    Ok(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))
}
