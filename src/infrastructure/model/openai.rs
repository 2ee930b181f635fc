//! OpenAI chat-completions client speaking the function-calling protocol.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::types::ModelError;
use super::DecisionModel;
use crate::application::agent::AgentDecision;
use crate::application::tooling::{ToolInvocation, ToolSpec};
use crate::domain::types::{Conversation, MessageRole};

const SYSTEM_PROMPT: &str = "You are a helpful assistant. Use the provided tools whenever a \
question needs external information, and answer directly otherwise. When a tool result is \
present in the conversation, base your answer on it.";

pub struct OpenAiDecisionModel {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiDecisionModel {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            model,
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl DecisionModel for OpenAiDecisionModel {
    async fn decide(
        &self,
        conversation: &Conversation,
        tools: &[ToolSpec],
    ) -> Result<AgentDecision, ModelError> {
        let payload = ChatCompletionRequest {
            model: self.model.clone(),
            messages: to_wire_messages(conversation),
            tools: tools.iter().map(ToolSpec::to_schema).collect(),
            temperature: 0.0,
        };

        info!(
            model = self.model.as_str(),
            turns = conversation.len(),
            tools = tools.len(),
            "requesting decision from model provider"
        );
        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status { status, body });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        debug!("received completion from model provider");
        parse_decision(completion)
    }
}

/// Turn the conversation into wire messages. Tool-result turns travel as
/// user-role messages carrying the `tool_result` envelope; the model reads
/// the outcome from the envelope on its next decision.
fn to_wire_messages(conversation: &Conversation) -> Vec<WireMessage> {
    let mut messages = Vec::with_capacity(conversation.len() + 1);
    messages.push(WireMessage {
        role: "system",
        content: SYSTEM_PROMPT.to_string(),
    });
    for turn in conversation.turns() {
        let role = match turn.role {
            MessageRole::User | MessageRole::ToolResult => "user",
            MessageRole::Assistant => "assistant",
        };
        messages.push(WireMessage {
            role,
            content: turn.content.clone(),
        });
    }
    messages
}

fn parse_decision(completion: ChatCompletionResponse) -> Result<AgentDecision, ModelError> {
    let message = completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .ok_or_else(|| ModelError::decision_parse("completion carried no message"))?;

    if let Some(calls) = message.tool_calls.filter(|calls| !calls.is_empty()) {
        let mut invocations = Vec::with_capacity(calls.len());
        for call in calls {
            let arguments: Map<String, Value> =
                serde_json::from_str(&call.function.arguments).map_err(|err| {
                    ModelError::decision_parse(format!(
                        "tool call '{}' carried malformed arguments: {err}",
                        call.function.name
                    ))
                })?;
            invocations.push(ToolInvocation {
                name: call.function.name,
                arguments,
            });
        }
        return Ok(AgentDecision::ToolRequests(invocations));
    }

    match message.content {
        Some(text) if !text.trim().is_empty() => Ok(AgentDecision::FinalAnswer(text)),
        _ => Err(ModelError::decision_parse(
            "completion carried neither tool calls nor text",
        )),
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    tools: Vec<Value>,
    temperature: f32,
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Deserialize)]
struct FunctionCall {
    name: String,
    arguments: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ChatMessage;
    use serde_json::json;

    fn completion(value: Value) -> ChatCompletionResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn plain_text_completion_becomes_final_answer() {
        let decision = parse_decision(completion(json!({
            "choices": [{ "message": { "content": "The sum is 14." } }]
        })))
        .unwrap();

        assert_eq!(decision, AgentDecision::FinalAnswer("The sum is 14.".into()));
    }

    #[test]
    fn tool_calls_become_requests_in_response_order() {
        let decision = parse_decision(completion(json!({
            "choices": [{ "message": {
                "content": null,
                "tool_calls": [
                    { "id": "call_1", "function": { "name": "weather", "arguments": "{\"city\":\"Paris\"}" } },
                    { "id": "call_2", "function": { "name": "sum", "arguments": "{\"int1\":5,\"int2\":9}" } }
                ]
            } }]
        })))
        .unwrap();

        match decision {
            AgentDecision::ToolRequests(invocations) => {
                assert_eq!(invocations.len(), 2);
                assert_eq!(invocations[0].name, "weather");
                assert_eq!(invocations[0].arguments["city"], json!("Paris"));
                assert_eq!(invocations[1].name, "sum");
            }
            other => panic!("expected tool requests, got {other:?}"),
        }
    }

    #[test]
    fn empty_completion_is_a_parse_error() {
        let err = parse_decision(completion(json!({
            "choices": [{ "message": { "content": null } }]
        })))
        .unwrap_err();

        assert!(matches!(err, ModelError::DecisionParse(_)));
    }

    #[test]
    fn missing_choice_is_a_parse_error() {
        let err = parse_decision(completion(json!({ "choices": [] }))).unwrap_err();
        assert!(matches!(err, ModelError::DecisionParse(_)));
    }

    #[test]
    fn malformed_call_arguments_are_a_parse_error() {
        let err = parse_decision(completion(json!({
            "choices": [{ "message": {
                "tool_calls": [
                    { "id": "call_1", "function": { "name": "weather", "arguments": "not json" } }
                ]
            } }]
        })))
        .unwrap_err();

        assert!(matches!(err, ModelError::DecisionParse(_)));
    }

    #[test]
    fn wire_messages_flatten_tool_results_into_user_role() {
        let mut conversation = Conversation::new();
        conversation.push(ChatMessage::user("What's the weather in Paris?"));
        conversation.push(ChatMessage::tool_result(r#"{"tool_result":{}}"#));

        let messages = to_wire_messages(&conversation);

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[2].role, "user");
        assert!(messages[2].content.contains("tool_result"));
    }
}
