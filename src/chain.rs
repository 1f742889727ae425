use axum::http::HeaderMap;

use crate::error::AgentError;

/// Remaining forwarding hops, semicolon-joined.
pub const PROXY_HEADER: &str = "X-Prometheus-Proxy";
/// Final request target, carried unchanged across every hop.
pub const REQUEST_HEADER: &str = "X-Prometheus-Request";

/// Routing state decoded from the two chain headers of an inbound request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainState {
    pub next_hop: Option<String>,
    pub remaining_chain: String,
    pub request_target: String,
}

impl ChainState {
    /// Terminal hop: nothing left to relay through, deliver the target
    /// request locally.
    pub fn is_direct(&self) -> bool {
        self.next_hop.is_none() && self.remaining_chain.is_empty()
    }
}

/// Decode `X-Prometheus-Proxy` and `X-Prometheus-Request` into a routing
/// decision. The request header is required; the proxy header is an ordered
/// hop list of which the first element becomes the next hop and the rest are
/// re-emitted, semicolon-joined, for that hop to consume.
pub fn decode(headers: &HeaderMap) -> Result<ChainState, AgentError> {
    let request_target = header_value(headers, REQUEST_HEADER);
    if request_target.is_empty() {
        return Err(AgentError::ChainBroken);
    }

    let proxy = header_value(headers, PROXY_HEADER);
    if proxy.is_empty() {
        return Ok(ChainState {
            next_hop: None,
            remaining_chain: String::new(),
            request_target: request_target.to_string(),
        });
    }

    let mut hops = proxy.split(';');
    let first = hops.next().unwrap_or("");
    let remaining_chain = hops.collect::<Vec<_>>().join(";");
    let next_hop = if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    };

    Ok(ChainState {
        next_hop,
        remaining_chain,
        request_target: request_target.to_string(),
    })
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}
