use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(thiserror::Error, Debug)]
pub enum AgentError {
    #[error("host must not be empty")]
    EmptyHost,
    #[error("proxy chain broken")]
    ChainBroken,
    #[error("destination url is empty")]
    EmptyDestination,
    #[error("proxy request failed: {0}")]
    Network(reqwest::Error),
    #[error("failed to read response body: {0}")]
    ReadError(reqwest::Error),
    #[error("invalid request body")]
    MalformedBody,
    #[error("update payload host must not be empty")]
    InvalidHost,
    #[error("topology lock poisoned")]
    LockPoisoned,
}

impl IntoResponse for AgentError {
    fn into_response(self) -> Response {
        match self {
            // /update-graph rejections carry a fixed body
            AgentError::MalformedBody | AgentError::InvalidHost => {
                (StatusCode::BAD_REQUEST, "Invalid request").into_response()
            }
            AgentError::LockPoisoned => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
            other => (StatusCode::BAD_REQUEST, format!("Error: {}", other)).into_response(),
        }
    }
}
