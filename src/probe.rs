use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::state::AppState;

/// Periodically probe the liveness endpoint of every top-level child and
/// fold the results back into the topology. A probe that reaches the peer
/// maps the response status class onto the node's status; a transport
/// failure is logged and leaves the prior status untouched. Runs until the
/// shutdown watch flips.
pub async fn status_prober(
    state: AppState,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut tick = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = tick.tick() => {},
            _ = shutdown.changed() => { if *shutdown.borrow() { break; } }
        }

        let hosts = match state.read_root() {
            Ok(root) => root
                .children
                .iter()
                .map(|child| child.host.clone())
                .collect::<Vec<_>>(),
            Err(e) => {
                error!("failed to acquire topology lock: {}", e);
                continue;
            }
        };

        let probes = hosts.iter().map(|host| probe_host(&state, host));
        let results = join_all(probes).await;

        let mut root = match state.write_root() {
            Ok(root) => root,
            Err(e) => {
                error!("failed to acquire topology lock: {}", e);
                continue;
            }
        };
        for (host, outcome) in hosts.iter().zip(results) {
            match outcome {
                Ok(reachable) => {
                    root.search_and_update_status(host, false, reachable);
                }
                Err(e) => warn!(host = %host, "status probe failed: {}", e),
            }
        }
    }

    info!("status prober stopped");
}

async fn probe_host(state: &AppState, host: &str) -> Result<bool, reqwest::Error> {
    let url = format!("http://{}/status", host);
    let response = state.http_client.get(&url).send().await?;
    Ok(response.status().is_success())
}
