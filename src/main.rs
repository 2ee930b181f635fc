use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

use agent_gateway::application::agent::Agent;
use agent_gateway::application::tooling::ToolInvoker;
use agent_gateway::application::tools;
use agent_gateway::config::AppConfig;
use agent_gateway::infrastructure::model::{DecisionModel, OpenAiDecisionModel};
use agent_gateway::infrastructure::retrieval::PassageIndex;
use agent_gateway::infrastructure::server;

#[derive(Parser, Debug)]
#[command(
    name = "agent-gateway",
    version,
    about = "HTTP gateway exposing a tool-calling conversational agent"
)]
struct Cli {
    #[arg(long, default_value = "0.0.0.0:8000")]
    addr: SocketAddr,
    /// Override the decision-round bound for a run.
    #[arg(long)]
    max_rounds: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    init_tracing();
    info!("starting agent-gateway");

    let cli = Cli::parse();
    debug!(addr = %cli.addr, max_rounds = ?cli.max_rounds, "CLI arguments parsed");
    let config = AppConfig::from_env()?;

    // Process-wide read-only state: built before serving, shared by every
    // request, torn down only at process exit.
    let index = Arc::new(PassageIndex::with_default_corpus());
    let registry = Arc::new(tools::builtin_registry(&config, Arc::clone(&index))?);
    info!(tools = registry.len(), "tool registry initialized");

    let invoker = ToolInvoker::new(Arc::clone(&registry));
    let model: Arc<dyn DecisionModel> = Arc::new(OpenAiDecisionModel::new(
        config.openai_base_url.clone(),
        config.openai_api_key.clone(),
        config.model.clone(),
    ));

    let mut agent = Agent::new(model, invoker);
    if let Some(max_rounds) = cli.max_rounds {
        agent = agent.with_max_rounds(max_rounds);
    }

    info!(addr = %cli.addr, model = config.model.as_str(), "starting REST server");
    server::serve(agent, registry, cli.addr).await?;
    Ok(())
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .init();
    });
}
