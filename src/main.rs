use p2p_torrent::config::{Cli, Commands, NodeArgs, TrackerArgs, listen_addr};
use p2p_torrent::membership::types::NodeId;
use p2p_torrent::node::client::{PeerClient, TrackerClient};
use p2p_torrent::node::session::NodeSession;
use p2p_torrent::storage::memory::ChunkStore;
use p2p_torrent::tracker::service::TrackerService;
use p2p_torrent::{storage, tracker};

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout belongs to the interactive session.
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Tracker(args) => run_tracker(args).await,
        Commands::Node(args) => run_node(args).await,
    }
}

async fn run_tracker(args: TrackerArgs) -> anyhow::Result<()> {
    let service = TrackerService::new(args.replicas.get(), args.chunk_size_mb);
    tracing::info!(
        "Tracker configured with {} replicas per chunk, {} MB chunks",
        service.replica_count(),
        service.chunk_size_mb()
    );

    // 1. Spawn stats reporter:
    if let Some(period) = args.stats_interval() {
        let stats_service = service.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);

            loop {
                interval.tick().await;
                let stats = stats_service.stats().await;
                tracing::info!(
                    "Tracker stats: {} nodes, {} chunks placed",
                    stats.nodes.len(),
                    stats.chunk_count
                );
                for (node_id, load) in &stats.nodes {
                    tracing::debug!("  - {} load={}", node_id, load);
                }
            }
        });
    }

    // 2. Start HTTP server:
    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind tracker on {}", args.bind))?;
    tracing::info!("Tracker listening on {}", listener.local_addr()?);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, tracker::handlers::router(service)).await?;

    Ok(())
}

async fn run_node(args: NodeArgs) -> anyhow::Result<()> {
    let mut stdin = BufReader::new(tokio::io::stdin());

    let node_id = match args.node_id.clone() {
        Some(id) => id,
        None => prompt_node_id(&mut stdin).await?,
    };
    let node_id = NodeId::new(node_id.trim());
    let bind_addr = listen_addr(node_id.as_str())?;

    // 1. Chunk store and its HTTP server:
    let store = ChunkStore::new();
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind chunk server on {}", bind_addr))?;
    tracing::info!("Node {} serving chunks on {}", node_id, listener.local_addr()?);

    let app = storage::handlers::router(store);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Chunk server stopped: {}", e);
        }
    });

    // 2. Interactive session against the tracker:
    let http_client = reqwest::Client::new();
    let timeout = args.request_timeout();
    let session = NodeSession::new(
        node_id,
        TrackerClient::new(http_client.clone(), &args.tracker, timeout),
        PeerClient::new(http_client, timeout),
        args.chunk_size_mb,
    );
    tracing::info!(
        "Node {} using tracker {}",
        session.node_id(),
        args.tracker
    );

    session.run(stdin, tokio::io::stdout()).await
}

async fn prompt_node_id<R>(input: &mut R) -> anyhow::Result<String>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(b"Enter this node's ip:port (e.g. localhost:50001): ")
        .await?;
    stdout.flush().await?;

    let mut line = String::new();
    input.read_line(&mut line).await?;
    let id = line.trim();
    anyhow::ensure!(!id.is_empty(), "a node id is required");
    Ok(id.to_string())
}
