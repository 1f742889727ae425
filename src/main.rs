use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing::info;

use fedagent::config::federation_hosts;
use fedagent::probe::status_prober;
use fedagent::routes::app;
use fedagent::state::AppState;
use fedagent::topology::Node;

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
struct Args {
    /// Prometheus config file to read federation peers from
    #[arg(long = "prometheus.config")]
    prometheus_config: PathBuf,

    /// Local prometheus host and port (for federation)
    #[arg(long = "prometheus.host")]
    prometheus_host: String,

    /// Agent port for connecting with other agents
    #[arg(long = "agent.port", default_value_t = 19090)]
    agent_port: u16,

    /// Outbound proxy request timeout (seconds)
    #[arg(long, default_value_t = 10)]
    proxy_timeout_secs: u64,

    /// Status probe interval (seconds)
    #[arg(long, default_value_t = 5)]
    probe_interval_secs: u64,

    /// Log level filter
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(args.log_level.clone())
        .with_target(false)
        .compact()
        .init();

    let mut root = Node::new(args.prometheus_host.clone())?;
    root.children = Node::from_hosts(federation_hosts(&args.prometheus_config)?);
    info!(
        "seeded topology with {} federation peers",
        root.children.len()
    );

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.proxy_timeout_secs))
        .build()?;
    let state = AppState::new(root, http_client);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let prober = tokio::spawn(status_prober(
        state.clone(),
        Duration::from_secs(args.probe_interval_secs),
        shutdown_rx,
    ));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.agent_port)).await?;
    info!("agent listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    shutdown_tx.send(true)?;
    prober.await?;

    Ok(())
}
