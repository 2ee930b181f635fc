use super::*;
use crate::application::tooling::{
    ParamKind, ParamSpec, Tool, ToolFailure, ToolInvocation, ToolRegistry, ToolSpec,
};
use crate::application::tools::SumTool;
use crate::domain::types::MessageRole;
use crate::infrastructure::model::{DecisionModel, ModelError};
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
struct ScriptedModel {
    decisions: Arc<Mutex<Vec<AgentDecision>>>,
    recordings: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl ScriptedModel {
    fn new(decisions: Vec<AgentDecision>) -> Self {
        Self {
            decisions: Arc::new(Mutex::new(decisions)),
            recordings: Arc::new(Mutex::new(Vec::new())),
        }
    }

    async fn conversations_seen(&self) -> Vec<Vec<ChatMessage>> {
        self.recordings.lock().await.clone()
    }
}

#[async_trait]
impl DecisionModel for ScriptedModel {
    async fn decide(
        &self,
        conversation: &Conversation,
        _tools: &[ToolSpec],
    ) -> Result<AgentDecision, ModelError> {
        self.recordings
            .lock()
            .await
            .push(conversation.turns().to_vec());
        Ok(self.decisions.lock().await.remove(0))
    }
}

/// Always asks for another tool round; used to prove the loop is bounded.
struct PingPongModel;

#[async_trait]
impl DecisionModel for PingPongModel {
    async fn decide(
        &self,
        _conversation: &Conversation,
        _tools: &[ToolSpec],
    ) -> Result<AgentDecision, ModelError> {
        Ok(AgentDecision::ToolRequests(vec![invocation(
            "sum",
            json!({ "int1": 1, "int2": 1 }),
        )]))
    }
}

/// Stands in for the weather tool with a canned outcome.
struct StubWeatherTool {
    outcome: Result<&'static str, &'static str>,
}

#[async_trait]
impl Tool for StubWeatherTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "weather",
            description: "Get weather for a city",
            params: vec![ParamSpec {
                name: "city",
                kind: ParamKind::String,
                description: "City name",
                required: true,
            }],
        }
    }

    async fn call(&self, _arguments: &Map<String, Value>) -> Result<Value, ToolFailure> {
        match self.outcome {
            Ok(summary) => Ok(Value::String(summary.to_string())),
            Err(cause) => Err(ToolFailure(cause.to_string())),
        }
    }
}

fn invocation(name: &str, arguments: Value) -> ToolInvocation {
    let arguments = match arguments {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    ToolInvocation {
        name: name.to_string(),
        arguments,
    }
}

fn agent_with(model: Arc<dyn DecisionModel>, tools: Vec<Arc<dyn Tool>>) -> Agent {
    let mut registry = ToolRegistry::new();
    for tool in tools {
        registry.register(tool).unwrap();
    }
    Agent::new(model, ToolInvoker::new(Arc::new(registry)))
}

fn question(text: &str) -> Conversation {
    let mut conversation = Conversation::new();
    conversation.push(ChatMessage::user(text));
    conversation
}

#[tokio::test]
async fn final_answer_without_tools() {
    let model = Arc::new(ScriptedModel::new(vec![AgentDecision::FinalAnswer(
        "done".into(),
    )]));
    let agent = agent_with(model.clone(), vec![Arc::new(SumTool)]);

    let outcome = agent.run(question("hello")).await.expect("agent succeeds");

    assert_eq!(outcome.answer, "done");
    assert!(outcome.steps.is_empty());

    let seen = model.conversations_seen().await;
    assert_eq!(seen.len(), 1);
    assert!(seen[0].iter().any(|turn| turn.content.contains("hello")));
}

#[tokio::test]
async fn weather_question_flows_through_tool_round() {
    const SUMMARY: &str = "Paris in France currently has a temperature of 14 Celsius";
    let model = Arc::new(ScriptedModel::new(vec![
        AgentDecision::ToolRequests(vec![invocation("weather", json!({ "city": "Paris" }))]),
        AgentDecision::FinalAnswer(format!("{SUMMARY}.")),
    ]));
    let agent = agent_with(
        model.clone(),
        vec![Arc::new(StubWeatherTool { outcome: Ok(SUMMARY) })],
    );

    let outcome = agent
        .run(question("What's the weather in Paris?"))
        .await
        .expect("agent succeeds");

    assert!(outcome.answer.contains("Paris"));
    assert!(outcome.answer.contains("14"));
    assert_eq!(outcome.steps.len(), 1);
    assert_eq!(outcome.steps[0].tool, "weather");
    assert!(outcome.steps[0].success);

    // Round two saw the tool result folded into the state.
    let seen = model.conversations_seen().await;
    assert_eq!(seen.len(), 2);
    let last_turn = seen[1].last().unwrap();
    assert_eq!(last_turn.role, MessageRole::ToolResult);
    assert!(last_turn.content.contains("tool_result"));
    assert!(last_turn.content.contains("14 Celsius"));
}

#[tokio::test]
async fn arithmetic_question_answers_with_the_sum() {
    let model = Arc::new(ScriptedModel::new(vec![
        AgentDecision::ToolRequests(vec![invocation("sum", json!({ "int1": 5, "int2": 9 }))]),
        AgentDecision::FinalAnswer("5 + 9 is 14.".into()),
    ]));
    let agent = agent_with(model, vec![Arc::new(SumTool)]);

    let outcome = agent
        .run(question("What is 5 + 9?"))
        .await
        .expect("agent succeeds");

    assert!(outcome.answer.contains("14"));
    assert_eq!(outcome.steps.len(), 1);
    assert_eq!(outcome.steps[0].output, json!(14));
}

#[tokio::test]
async fn upstream_tool_failure_degrades_and_the_loop_continues() {
    const UPSTREAM: &str = r#"weather API returned status 401: {"error":"invalid key"}"#;
    let model = Arc::new(ScriptedModel::new(vec![
        AgentDecision::ToolRequests(vec![invocation("weather", json!({ "city": "Paris" }))]),
        AgentDecision::FinalAnswer("Sorry, I could not reach the weather service.".into()),
    ]));
    let agent = agent_with(
        model.clone(),
        vec![Arc::new(StubWeatherTool {
            outcome: Err(UPSTREAM),
        })],
    );

    let outcome = agent
        .run(question("What's the weather in Paris?"))
        .await
        .expect("failure degrades instead of aborting the run");

    assert_eq!(outcome.steps.len(), 1);
    assert!(!outcome.steps[0].success);

    let seen = model.conversations_seen().await;
    assert_eq!(seen.len(), 2, "loop proceeded to another decision round");
    let last_turn = seen[1].last().unwrap();
    assert!(last_turn.content.contains("401"));
    assert!(last_turn.content.contains("\"success\":false"));
}

#[tokio::test]
async fn sibling_requests_run_sequentially_in_decision_order() {
    let model = Arc::new(ScriptedModel::new(vec![
        AgentDecision::ToolRequests(vec![
            invocation("sum", json!({ "int1": 1, "int2": 2 })),
            invocation("sum", json!({ "int1": 3, "int2": 4 })),
        ]),
        AgentDecision::FinalAnswer("3 and 7".into()),
    ]));
    let agent = agent_with(model.clone(), vec![Arc::new(SumTool)]);

    let outcome = agent.run(question("two sums")).await.expect("agent succeeds");

    assert_eq!(outcome.steps.len(), 2);
    assert_eq!(outcome.steps[0].output, json!(3));
    assert_eq!(outcome.steps[1].output, json!(7));

    // Both results were visible before the second decision round.
    let seen = model.conversations_seen().await;
    let tool_turns = seen[1]
        .iter()
        .filter(|turn| turn.role == MessageRole::ToolResult)
        .count();
    assert_eq!(tool_turns, 2);
}

#[tokio::test]
async fn ping_pong_terminates_at_the_round_bound() {
    let agent = agent_with(Arc::new(PingPongModel), vec![Arc::new(SumTool)]).with_max_rounds(3);

    let err = agent
        .run(question("never finishes"))
        .await
        .expect_err("round bound must trip");

    assert!(matches!(err, AgentError::Exhausted { rounds: 3 }));
    assert!(err.user_message().contains("could not complete"));
}

#[tokio::test]
async fn unknown_tool_request_degrades_within_the_loop() {
    let model = Arc::new(ScriptedModel::new(vec![
        AgentDecision::ToolRequests(vec![invocation("teleport", json!({}))]),
        AgentDecision::FinalAnswer("I don't have that ability.".into()),
    ]));
    let agent = agent_with(model.clone(), vec![Arc::new(SumTool)]);

    let outcome = agent.run(question("teleport me")).await.expect("agent succeeds");

    assert_eq!(outcome.steps.len(), 1);
    assert!(!outcome.steps[0].success);
    let seen = model.conversations_seen().await;
    assert!(seen[1].last().unwrap().content.contains("unknown tool"));
}
