//! Integration test: react session, agent ⇄ tools until the model answers without tools.


use std::sync::Arc;

use weft::agent::REACT_SYSTEM_PROMPT;
use weft::llm::LlmResponse;
use weft::{AgentKind, Message, MockLlm, Phase, Session, ToolCall};

fn react_session(llm: Arc<MockLlm>) -> Session {
    Session::new(AgentKind::React, llm, AgentKind::React.tools(None)).expect("valid graph")
}

/// **Scenario**: add(40,12) and multiply(52,6) requested together produce two results,
/// in that order, before the next model call.
#[tokio::test]
async fn parallel_calls_dispatched_in_order() {
    let llm = Arc::new(MockLlm::first_tools_then_text(
        vec![
            ToolCall::new("add", r#"{"a":40,"b":12}"#).with_id("c1"),
            ToolCall::new("multiply", r#"{"a":52,"b":6}"#).with_id("c2"),
        ],
        "The answer is 312. Why did the scarecrow win an award?",
    ));
    let mut session = react_session(llm.clone());

    let turns = session
        .submit("Add 40 + 12 and then multiply the result by 6.")
        .await
        .unwrap();

    assert_eq!(turns.len(), 5);
    assert!(turns[0].is_user());
    assert_eq!(turns[1].tool_calls().len(), 2);
    assert_eq!(
        turns[2],
        Message::Tool {
            call_id: Some("c1".into()),
            name: "add".into(),
            content: "52".into()
        }
    );
    assert_eq!(turns[3].content(), "312");
    assert!(turns[4].is_assistant() && turns[4].tool_calls().is_empty());
    assert_eq!(session.state().phase(), Phase::AwaitingUser);

    let requests = llm.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0][0], Message::system(REACT_SYSTEM_PROMPT));
    // second request: system + user + assistant(tool calls) + two results
    assert_eq!(requests[1].len(), 5);
    assert_eq!(requests[1][3].content(), "52");
    assert_eq!(requests[1][4].content(), "312");
}

/// **Scenario**: sequential rounds; the result of one call feeds the next request.
#[tokio::test]
async fn sequential_rounds() {
    let llm = Arc::new(MockLlm::scripted([
        LlmResponse::tools("", vec![ToolCall::new("add", r#"{"a":40,"b":12}"#)]),
        LlmResponse::tools("", vec![ToolCall::new("multiply", r#"{"a":"52","b":6}"#)]),
        LlmResponse::text("312"),
    ]));
    let mut session = react_session(llm.clone());
    session.submit("compute").await.unwrap();

    let results: Vec<_> = session
        .messages()
        .iter()
        .filter(|m| m.is_tool_result())
        .map(Message::content)
        .collect();
    assert_eq!(results, ["52", "312"]);
    assert_eq!(llm.calls(), 3);
    assert_eq!(session.state().last_assistant_reply(), Some("312"));
}

/// **Scenario**: a bad tool call is reported back to the model, which can recover.
#[tokio::test]
async fn tool_error_reported_to_model() {
    let llm = Arc::new(MockLlm::scripted([
        LlmResponse::tools("", vec![ToolCall::new("power", r#"{"a":2,"b":3}"#)]),
        LlmResponse::text("I cannot do powers."),
    ]));
    let mut session = react_session(llm.clone());
    session.submit("2^3").await.unwrap();

    let result = session
        .messages()
        .iter()
        .find(|m| m.is_tool_result())
        .map(Message::content)
        .unwrap();
    assert_eq!(result, "Error: tool not found: power\n Please fix your mistakes.");
    assert_eq!(llm.calls(), 2);
}

/// **Scenario**: a model that never stops calling tools hits the recursion limit.
#[tokio::test]
async fn endless_tool_loop_hits_recursion_limit() {
    let llm = Arc::new(MockLlm::scripted(std::iter::repeat_with(|| {
        LlmResponse::tools("", vec![ToolCall::new("add", r#"{"a":1,"b":1}"#)])
    })
    .take(100)));
    let mut session = react_session(llm);
    let err = session.submit("loop").await.unwrap_err();
    assert!(err.to_string().contains("recursion limit"), "{}", err);
}
