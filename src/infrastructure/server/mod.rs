mod docs;
mod dto;
mod error;
mod router;
mod routes;
mod state;

pub use error::ServerError;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::application::agent::Agent;
use crate::application::tooling::ToolRegistry;

pub async fn serve(
    agent: Agent,
    registry: Arc<ToolRegistry>,
    addr: SocketAddr,
) -> Result<(), ServerError> {
    router::serve(agent, registry, addr).await
}
