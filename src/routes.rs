use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{any, get, post},
    Router,
};

use crate::chain;
use crate::error::AgentError;
use crate::forward;
use crate::state::AppState;
use crate::topology::Node;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/status", get(health_check))
        .route("/proxy", any(request_proxy))
        .route("/graph", get(get_graph))
        .route("/update-graph", post(update_graph))
        .with_state(state)
}

// GET /status
pub async fn health_check() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"alive": true}"#,
    )
}

// any /proxy
pub async fn request_proxy(
    State(ctx): State<AppState>,
    headers: HeaderMap,
) -> Result<String, AgentError> {
    let decoded = chain::decode(&headers)?;
    forward::relay(&ctx.http_client, &decoded).await
}

// GET /graph
pub async fn get_graph(State(ctx): State<AppState>) -> Result<Json<Node>, AgentError> {
    let root = ctx.read_root()?;
    Ok(Json(root.clone()))
}

// POST /update-graph
//
// The body is decoded by hand rather than through the Json extractor so
// every rejection carries the same fixed body.
pub async fn update_graph(
    State(ctx): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Node>), AgentError> {
    let node: Node = serde_json::from_slice(&body).map_err(|_| AgentError::MalformedBody)?;
    if node.host.is_empty() {
        return Err(AgentError::InvalidHost);
    }

    let mut root = ctx.write_root()?;
    root.insert_or_update(node, true);
    Ok((StatusCode::CREATED, Json(root.clone())))
}
