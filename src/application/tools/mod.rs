mod arithmetic;
mod image;
mod retrieval;
mod weather;

pub use arithmetic::SumTool;
pub use image::DrawTool;
pub use retrieval::PassageSearchTool;
pub use weather::WeatherTool;

use std::sync::Arc;

use crate::application::tooling::{RegistryError, ToolRegistry};
use crate::config::AppConfig;
use crate::infrastructure::retrieval::PassageIndex;

/// Build the fixed tool set for this process, in the order the model
/// should see it.
pub fn builtin_registry(
    config: &AppConfig,
    index: Arc<PassageIndex>,
) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(PassageSearchTool::new(index)))?;
    registry.register(Arc::new(WeatherTool::new(
        config.weather_base_url.clone(),
        config.weather_api_key.clone(),
    )))?;
    registry.register(Arc::new(SumTool))?;
    registry.register(Arc::new(DrawTool::new(
        config.openai_base_url.clone(),
        config.openai_api_key.clone(),
    )))?;
    Ok(registry)
}
