pub mod chain;
pub mod config;
pub mod error;
pub mod forward;
pub mod probe;
pub mod routes;
pub mod state;
pub mod topology;

pub use chain::ChainState;
pub use error::AgentError;
pub use routes::app;
pub use state::AppState;
pub use topology::Node;
