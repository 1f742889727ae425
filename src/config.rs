use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Metrics path marking a scrape job as a federation job.
pub const FEDERATE_PATH: &str = "/federate";

// Minimal mirror of the Prometheus configuration: only the fields needed to
// find federation targets, everything else is ignored on deserialize.
#[derive(Debug, Deserialize)]
struct PrometheusConfig {
    #[serde(default)]
    scrape_configs: Vec<ScrapeConfig>,
}

#[derive(Debug, Deserialize)]
struct ScrapeConfig {
    #[serde(default)]
    metrics_path: Option<String>,
    #[serde(default)]
    static_configs: Vec<StaticConfig>,
}

#[derive(Debug, Deserialize)]
struct StaticConfig {
    #[serde(default)]
    targets: Vec<String>,
}

/// Read a Prometheus config file and return every static-config target of
/// every scrape job whose metrics path is `/federate`, in file order.
/// Empty entries are passed through; filtering them is the topology's job.
pub fn federation_hosts(path: &Path) -> anyhow::Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read prometheus config {}", path.display()))?;
    let conf: PrometheusConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse prometheus config {}", path.display()))?;

    let mut hosts = Vec::new();
    for scrape in &conf.scrape_configs {
        if scrape.metrics_path.as_deref() != Some(FEDERATE_PATH) {
            continue;
        }
        for static_config in &scrape.static_configs {
            hosts.extend(static_config.targets.iter().cloned());
        }
    }
    Ok(hosts)
}
