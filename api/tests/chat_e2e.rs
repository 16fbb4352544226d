use std::sync::{Arc, Mutex};

use ai_llm_service::{LlmModelConfig, OpenAiService};
use answer_resolver::{
    ABOUT_SYSTEM, AnswerResolver, GENERAL_SYSTEM, SAFE_ANSWER,
    fallback::{
        GENERIC_NOT_CONFIGURED_ANSWER, GENERIC_UNAVAILABLE_ANSWER, INTERNSHIP_ANSWER,
        PROJECTS_ANSWER, TECH_STACK_ANSWER,
    },
};
use api::{AppState, build_router};
use axum::{
    Json, Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    response::IntoResponse,
    routing::post,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

/// What the mock upstream saw on its last call.
#[derive(Clone, Default)]
struct Captured {
    auth: Arc<Mutex<Option<String>>>,
    body: Arc<Mutex<Option<Value>>>,
}

async fn spawn_mock_completions(status: StatusCode, reply: &'static str, seen: Captured) -> String {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let seen = seen.clone();
            async move {
                *seen.auth.lock().unwrap() = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                *seen.body.lock().unwrap() = Some(body);
                (status, reply).into_response()
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn offline_app() -> Router {
    build_router(Arc::new(AppState::new(AnswerResolver::offline())))
}

fn remote_app(endpoint: &str) -> Router {
    let svc = OpenAiService::new(LlmModelConfig {
        endpoint: endpoint.to_string(),
        api_key: Some("sk-test-key".into()),
        ..LlmModelConfig::default()
    })
    .unwrap();
    build_router(Arc::new(AppState::new(AnswerResolver::new(Some(svc)))))
}

fn chat_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/ai/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn offline_answers_follow_keyword_rules() {
    let cases = [
        ("Which internship and project?", INTERNSHIP_ANSWER),
        ("Show me your WORK", PROJECTS_ANSWER),
        ("What tech do you like?", TECH_STACK_ANSWER),
        ("Hello!", GENERIC_NOT_CONFIGURED_ANSWER),
    ];
    for (question, expected) in cases {
        let body = json!({ "question": question, "topic": "about" }).to_string();
        let (status, json) = send(offline_app(), chat_request(&body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({ "answer": expected }), "{question}");
    }
}

#[tokio::test]
async fn remote_success_returns_content() {
    let seen = Captured::default();
    let url = spawn_mock_completions(
        StatusCode::OK,
        r#"{"choices":[{"message":{"content":"Hello there."}}]}"#,
        seen.clone(),
    )
    .await;

    let (status, json) = send(
        remote_app(&url),
        chat_request(r#"{"question":"Who are you?","topic":"about"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "answer": "Hello there." }));

    assert_eq!(
        seen.auth.lock().unwrap().as_deref(),
        Some("Bearer sk-test-key")
    );
    let upstream = seen.body.lock().unwrap().clone().unwrap();
    assert_eq!(upstream["model"], "gpt-4o-mini");
    assert_eq!(upstream["temperature"], 0.4);
    assert_eq!(upstream["messages"][0]["role"], "system");
    assert_eq!(upstream["messages"][0]["content"], ABOUT_SYSTEM);
    assert_eq!(upstream["messages"][1]["role"], "user");
    assert_eq!(upstream["messages"][1]["content"], "Who are you?");
}

#[tokio::test]
async fn non_about_topics_use_general_persona() {
    for body in [
        r#"{"question":"q","topic":"project"}"#,
        r#"{"question":"q","topic":"weather"}"#,
        r#"{"question":"q"}"#,
    ] {
        let seen = Captured::default();
        let url = spawn_mock_completions(
            StatusCode::OK,
            r#"{"choices":[{"message":{"content":"ok"}}]}"#,
            seen.clone(),
        )
        .await;

        let (_, json) = send(remote_app(&url), chat_request(body)).await;
        assert_eq!(json["answer"], "ok");
        let upstream = seen.body.lock().unwrap().clone().unwrap();
        assert_eq!(upstream["messages"][0]["content"], GENERAL_SYSTEM, "{body}");
    }
}

#[tokio::test]
async fn remote_failure_falls_back_with_error_field() {
    let url = spawn_mock_completions(
        StatusCode::INTERNAL_SERVER_ERROR,
        "upstream down",
        Captured::default(),
    )
    .await;

    let (status, json) = send(
        remote_app(&url),
        chat_request(r#"{"question":"What's your tech stack?"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({ "answer": TECH_STACK_ANSWER, "error": "upstream down" })
    );
}

#[tokio::test]
async fn blank_remote_content_falls_back_silently() {
    let url = spawn_mock_completions(
        StatusCode::OK,
        r#"{"choices":[{"message":{"content":"  "}}]}"#,
        Captured::default(),
    )
    .await;

    let (status, json) = send(remote_app(&url), chat_request(r#"{"question":"hey"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "answer": GENERIC_UNAVAILABLE_ANSWER }));
}

#[tokio::test]
async fn null_choices_fall_back_to_keyword_rules() {
    for reply in [r#"{"choices":null}"#, r#"{"choices":[null]}"#] {
        let url = spawn_mock_completions(StatusCode::OK, reply, Captured::default()).await;

        let (status, json) = send(
            remote_app(&url),
            chat_request(r#"{"question":"Tell me about your internship"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({ "answer": INTERNSHIP_ANSWER }), "{reply}");
    }
}

#[tokio::test]
async fn non_json_remote_body_yields_safe_answer() {
    let url = spawn_mock_completions(StatusCode::OK, "<html>", Captured::default()).await;

    let (status, json) = send(remote_app(&url), chat_request(r#"{"question":"hey"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "answer": SAFE_ANSWER }));
}

#[tokio::test]
async fn unreachable_remote_yields_safe_answer() {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (status, json) = send(
        remote_app(&format!("http://{addr}")),
        chat_request(r#"{"question":"hey"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "answer": SAFE_ANSWER }));
}

#[tokio::test]
async fn malformed_request_body_yields_safe_answer() {
    for body in ["not json", r#"{"topic":"about"}"#, r#"{"question":1}"#, ""] {
        let (status, json) = send(offline_app(), chat_request(body)).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(json, json!({ "answer": SAFE_ANSWER }), "{body}");
    }
}

#[tokio::test]
async fn content_type_is_not_required() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/ai/chat")
        .body(Body::from(r#"{"question":"internships?"}"#))
        .unwrap();

    let (status, json) = send(offline_app(), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "answer": INTERNSHIP_ANSWER }));
}

#[tokio::test]
async fn health_reports_remote_mode() {
    let req = || {
        Request::builder()
            .method(Method::GET)
            .uri("/health")
            .body(Body::empty())
            .unwrap()
    };

    let (status, json) = send(offline_app(), req()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "status": "ok", "remote": false }));

    let (_, json) = send(remote_app("http://127.0.0.1:1"), req()).await;
    assert_eq!(json["remote"], true);
}

#[tokio::test]
async fn unknown_route_returns_not_found() {
    let req = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let (status, json) = send(offline_app(), req).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "NOT_FOUND");
}
