use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use taskdeck_service::MemoryService;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "taskdeck-server")]
struct Cli {
    /// Address to bind.
    #[arg(long, env = "TASKDECK_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on.
    #[arg(long, env = "TASKDECK_PORT", default_value_t = 4810)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let addr = SocketAddr::new(cli.bind.parse()?, cli.port);
    let listener = TcpListener::bind(addr).await?;
    info!("taskdeck-server listening on http://{addr}");

    let service = Arc::new(MemoryService::new());
    taskdeck_server::serve(listener, service).await?;
    Ok(())
}
