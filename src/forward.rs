use reqwest::Client;
use tracing::info;

use crate::chain::{ChainState, PROXY_HEADER, REQUEST_HEADER};
use crate::error::AgentError;

/// Issue the one outbound GET implied by a decoded chain state: either
/// deliver the target request locally (terminal hop) or relay to the next
/// hop with the trimmed chain re-attached.
pub async fn relay(client: &Client, state: &ChainState) -> Result<String, AgentError> {
    match state.next_hop.as_deref() {
        Some(hop) => {
            make_request(
                client,
                hop,
                &[
                    (PROXY_HEADER, state.remaining_chain.as_str()),
                    (REQUEST_HEADER, state.request_target.as_str()),
                ],
            )
            .await
        }
        None if state.remaining_chain.is_empty() => {
            make_request(client, &state.request_target, &[]).await
        }
        // unreachable from the split rule, but a malformed peer could send it
        None => Err(AgentError::ChainBroken),
    }
}

/// One GET to `destination` with the given headers, body returned as text.
/// Destinations without a scheme get plain http. The response status is not
/// inspected: any received body counts as a successful relay.
pub async fn make_request(
    client: &Client,
    destination: &str,
    headers: &[(&str, &str)],
) -> Result<String, AgentError> {
    if destination.is_empty() {
        return Err(AgentError::EmptyDestination);
    }

    let url = if destination.starts_with("http://") || destination.starts_with("https://") {
        destination.to_string()
    } else {
        format!("http://{}", destination)
    };

    info!(url = %url, "sending proxy request");

    let mut request = client.get(&url);
    for (name, value) in headers {
        request = request.header(*name, *value);
    }

    let response = request.send().await.map_err(AgentError::Network)?;
    response.text().await.map_err(AgentError::ReadError)
}
