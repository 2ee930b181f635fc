use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::application::tooling::{
    ParamKind, ParamSpec, Tool, ToolFailure, ToolSpec, string_argument,
};

const MAX_PROMPT_CHARS: usize = 1000;
const STYLE_SUFFIX: &str = ", cartoon, joyful, sky, high quality, focused on sky";

/// Renders an image for a description through the image-generation API and
/// hands the resulting URL back untouched. The URL must reach the end user
/// byte for byte, query parameters included.
pub struct DrawTool {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DrawTool {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl Tool for DrawTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "draw",
            description: "Draws an image from a prompt and returns the image url",
            params: vec![ParamSpec {
                name: "image_desc",
                kind: ParamKind::String,
                description: "Description of the image to draw",
                required: true,
            }],
        }
    }

    async fn call(&self, arguments: &Map<String, Value>) -> Result<Value, ToolFailure> {
        let image_desc = string_argument(arguments, "image_desc")?;
        let prompt = rendering_prompt(image_desc);
        let url = format!(
            "{}/v1/images/generations",
            self.base_url.trim_end_matches('/')
        );

        debug!(prompt_chars = prompt.chars().count(), "requesting image generation");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&json!({ "prompt": prompt, "n": 1, "size": "1024x1024" }))
            .send()
            .await
            .map_err(|err| {
                ToolFailure(format!("unexpected error in draw with {image_desc} param: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "image API returned an error");
            return Err(ToolFailure(format!(
                "image API returned status {}: {body}",
                status.as_u16()
            )));
        }

        let generation: GenerationResponse = response.json().await.map_err(|err| {
            ToolFailure(format!("unexpected error in draw with {image_desc} param: {err}"))
        })?;
        let image_url = generation
            .data
            .into_iter()
            .next()
            .map(|item| item.url)
            .ok_or_else(|| {
                ToolFailure(format!(
                    "unexpected error in draw with {image_desc} param: response carried no image"
                ))
            })?;

        Ok(Value::String(format!(
            "Here's the image url: {image_url} pass it fully to the user, don't cut it, \
             leave the query params intact. Just pass the whole thing forward."
        )))
    }
}

/// Template the rendering prompt around the description, capped so the
/// upstream API's prompt limit is never hit. The cap truncates the
/// description, never the URL on the way back.
fn rendering_prompt(image_desc: &str) -> String {
    let budget = MAX_PROMPT_CHARS - STYLE_SUFFIX.chars().count();
    let mut prompt: String = image_desc.chars().take(budget).collect();
    prompt.push_str(STYLE_SUFFIX);
    prompt
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    url: String,
}
