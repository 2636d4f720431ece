use super::client::{PeerClient, TrackerClient};
use super::command::{Command, parse_command};
use super::transfer::{PullOutcome, PullReport, PushReport, pull_chunks, push_chunks};
use crate::chunk::partitioner::placeholder_chunks;
use crate::membership::types::NodeId;
use crate::tracker::protocol::{Action, JoinRequest, JoinResponse};

use anyhow::Result;
use std::num::NonZeroU64;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const BANNER: &str = "\
Welcome to the node client. Enter a command:
1. put [filename] [size_mb] - upload a file
2. get [filename] - download a file
3. leave - leave the network
";

/// A running node as seen from its operator: one identity, one tracker.
pub struct NodeSession {
    node_id: NodeId,
    tracker: TrackerClient,
    peers: PeerClient,
    chunk_size_mb: NonZeroU64,
}

/// What a put achieved: the tracker's answer plus the push results.
#[derive(Debug)]
pub struct PutOutcome {
    pub response: JoinResponse,
    pub push: PushReport,
}

/// What a get achieved. `pull` is `None` when the tracker knew no chunks.
#[derive(Debug)]
pub struct GetOutcome {
    pub response: JoinResponse,
    pub pull: Option<PullReport>,
}

impl NodeSession {
    pub fn new(
        node_id: NodeId,
        tracker: TrackerClient,
        peers: PeerClient,
        chunk_size_mb: NonZeroU64,
    ) -> Self {
        Self {
            node_id,
            tracker,
            peers,
            chunk_size_mb,
        }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Publishes a file: asks the tracker for placement, then pushes the bytes.
    pub async fn put(&self, file_name: &str, size_mb: u64) -> Result<PutOutcome> {
        let response = self
            .tracker
            .join(&JoinRequest {
                node_id: self.node_id.clone(),
                action: Action::Put,
                file_name: file_name.to_string(),
                file_size_mb: Some(size_mb),
            })
            .await?;

        let chunks = placeholder_chunks(file_name, size_mb, self.chunk_size_mb);
        let push = push_chunks(&self.peers, &response.chunk_map, chunks).await;

        tracing::info!(
            "Put {}: {} of {} replica push(es) delivered",
            file_name,
            push.delivered.len(),
            push.attempted()
        );

        Ok(PutOutcome { response, push })
    }

    /// Downloads a file: asks the tracker for holders, then pulls each chunk.
    pub async fn get(&self, file_name: &str) -> Result<GetOutcome> {
        let response = self
            .tracker
            .join(&JoinRequest {
                node_id: self.node_id.clone(),
                action: Action::Get,
                file_name: file_name.to_string(),
                file_size_mb: None,
            })
            .await?;

        if response.chunk_map.is_empty() {
            return Ok(GetOutcome {
                response,
                pull: None,
            });
        }

        let pull = pull_chunks(&self.peers, &response.chunk_map).await;
        Ok(GetOutcome {
            response,
            pull: Some(pull),
        })
    }

    pub async fn leave(&self) -> Result<String> {
        let response = self.tracker.leave(&self.node_id).await?;
        Ok(response.message)
    }

    /// Reads commands line by line until `leave` or end of input.
    ///
    /// End of input leaves the network as well. Failures of a single command
    /// are reported and the loop continues.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        output.write_all(BANNER.as_bytes()).await?;
        output.flush().await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    write_line(&mut output, &e.to_string()).await?;
                    continue;
                }
            };

            match command {
                Command::Put { file_name, size_mb } => match self.put(&file_name, size_mb).await {
                    Ok(outcome) => write_put(&mut output, &outcome).await?,
                    Err(e) => {
                        tracing::error!("Error uploading file {}: {}", file_name, e);
                        write_line(&mut output, &format!("Error uploading file: {}", e)).await?;
                    }
                },
                Command::Get { file_name } => match self.get(&file_name).await {
                    Ok(outcome) => write_get(&mut output, &outcome).await?,
                    Err(e) => {
                        tracing::error!("Error downloading file {}: {}", file_name, e);
                        write_line(&mut output, &format!("Error downloading file: {}", e)).await?;
                    }
                },
                Command::Leave => {
                    self.leave_and_report(&mut output).await?;
                    return Ok(());
                }
            }
            write_line(&mut output, "Enter another command:").await?;
        }

        self.leave_and_report(&mut output).await
    }

    async fn leave_and_report<W: AsyncWrite + Unpin>(&self, output: &mut W) -> Result<()> {
        match self.leave().await {
            Ok(message) => write_line(output, &message).await,
            Err(e) => {
                tracing::error!("Error leaving the network: {}", e);
                write_line(output, &format!("Error leaving the network: {}", e)).await
            }
        }
    }
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, line: &str) -> Result<()> {
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}

async fn write_put<W: AsyncWrite + Unpin>(output: &mut W, outcome: &PutOutcome) -> Result<()> {
    write_line(output, &outcome.response.message).await?;
    let push = &outcome.push;
    write_line(
        output,
        &format!(
            "Pushed {} of {} replica(s) for {} chunk(s)",
            push.delivered.len(),
            push.attempted(),
            outcome.response.chunk_map.len()
        ),
    )
    .await?;
    for (chunk_id, node_id, error) in &push.failed {
        write_line(output, &format!("  {} -> {}: {}", chunk_id, node_id, error)).await?;
    }
    for chunk_id in &push.missing_data {
        write_line(output, &format!("  {}: no local data", chunk_id)).await?;
    }
    Ok(())
}

async fn write_get<W: AsyncWrite + Unpin>(output: &mut W, outcome: &GetOutcome) -> Result<()> {
    write_line(output, &outcome.response.message).await?;
    let Some(pull) = &outcome.pull else {
        return Ok(());
    };

    for (chunk_id, chunk_outcome) in &pull.chunks {
        let line = match chunk_outcome {
            PullOutcome::Received { node_id, data } => {
                format!("  {} <- {} ({} bytes)", chunk_id, node_id, data.len())
            }
            PullOutcome::NotFound { node_id } => format!("  {}: not found on {}", chunk_id, node_id),
            PullOutcome::Failed { node_id, error } => {
                format!("  {}: request to {} failed: {}", chunk_id, node_id, error)
            }
            PullOutcome::NoHolders => format!("  {}: no nodes available", chunk_id),
        };
        write_line(output, &line).await?;
    }

    match pull.assemble() {
        Some(file) => write_line(output, &format!("Download complete ({} bytes)", file.len())).await,
        None => {
            write_line(
                output,
                &format!("Received {} of {} chunk(s)", pull.received(), pull.chunks.len()),
            )
            .await?;
            let missing = pull.missing_sequences();
            if missing.is_empty() {
                return Ok(());
            }
            let missing: Vec<String> = missing.iter().map(u64::to_string).collect();
            write_line(output, &format!("Missing chunk sequence(s): {}", missing.join(", "))).await
        }
    }
}
