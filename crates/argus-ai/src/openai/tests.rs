//! Tests for request building, response parsing, and the HTTP round trip.

use std::sync::Arc;

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use super::client::{completions_url, parse_delta, parse_error, parse_response};
use super::*;
use crate::{
    classify, AiClient, AiError, ClientError, CompletionRequest, Message, Session, SessionConfig,
};

fn config() -> SessionConfig {
    SessionConfig::new("sk-test", "https://ark.example.com/api/v3", "doubao-pro")
}

#[test]
fn completions_url_joins_base() {
    let url = completions_url("https://ark.example.com/api/v3").unwrap();
    assert_eq!(url.as_str(), "https://ark.example.com/api/v3/chat/completions");

    let url = completions_url("https://ark.example.com/api/v3/").unwrap();
    assert_eq!(url.as_str(), "https://ark.example.com/api/v3/chat/completions");
}

#[test]
fn empty_base_url_uses_default() {
    let url = completions_url("  ").unwrap();
    assert_eq!(url.as_str(), "https://api.openai.com/v1/chat/completions");
}

#[test]
fn bad_base_urls_are_config_errors() {
    assert!(matches!(completions_url("not a url"), Err(ClientError::Config(_))));
    assert!(matches!(
        completions_url("ftp://files.example.com"),
        Err(ClientError::Config(_))
    ));
}

#[test]
fn client_requires_api_key() {
    let cfg = SessionConfig::new("   ", "https://api.example.com", "m");
    let err = OpenAiClient::new(&cfg).unwrap_err();
    assert!(matches!(err, ClientError::Config(ref m) if m.contains("API key")));
}

#[test]
fn client_rejects_key_that_is_not_a_header_value() {
    let cfg = SessionConfig::new("sk-\nbroken", "https://api.example.com", "m");
    assert!(matches!(OpenAiClient::new(&cfg), Err(ClientError::Config(_))));
}

#[test]
fn client_builds_with_valid_config() {
    let client = OpenAiClient::new(&config()).unwrap();
    assert_eq!(client.model(), "doubao-pro");
    assert_eq!(
        client.endpoint(),
        "https://ark.example.com/api/v3/chat/completions"
    );
    assert!(!format!("{client:?}").contains("sk-test"));
}

#[test]
fn request_body_carries_transcript_and_parameters() {
    let client = OpenAiClient::new(&config()).unwrap();
    let request = CompletionRequest::chat(vec![Message::system("be brief"), Message::user("hi")]);

    let body = client.build_request_body(&request, false);
    assert_eq!(
        body,
        json!({
            "model": "doubao-pro",
            "messages": [
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "hi"}
            ],
            "max_tokens": 1000,
            "temperature": 0.7,
            "stream": false
        })
    );
}

#[test]
fn probe_body_omits_temperature() {
    let client = OpenAiClient::new(&config()).unwrap();
    let body = client.build_request_body(&CompletionRequest::probe(), true);
    assert_eq!(body["max_tokens"], 1);
    assert_eq!(body["stream"], true);
    assert!(body.get("temperature").is_none());
}

#[test]
fn parses_first_choice_and_usage() {
    let response = parse_response(&json!({
        "choices": [
            {"message": {"role": "assistant", "content": "first"}},
            {"message": {"role": "assistant", "content": "second"}}
        ],
        "usage": {"prompt_tokens": 12, "completion_tokens": 3}
    }));
    assert_eq!(response.content.as_deref(), Some("first"));
    assert_eq!(response.usage.input_tokens, 12);
    assert_eq!(response.usage.output_tokens, 3);
}

#[test]
fn missing_choices_yield_no_content() {
    assert!(parse_response(&json!({"choices": []})).content.is_none());
    assert!(parse_response(&json!({"choices": [{"message": {"content": null}}]}))
        .content
        .is_none());
}

#[test]
fn parses_stream_deltas() {
    let chunk = json!({"choices": [{"delta": {"content": "Hel"}}]});
    assert_eq!(parse_delta(&chunk), Some("Hel"));

    let role_only = json!({"choices": [{"delta": {"role": "assistant"}}]});
    assert_eq!(parse_delta(&role_only), None);

    let empty = json!({"choices": [{"delta": {"content": ""}}]});
    assert_eq!(parse_delta(&empty), None);
}

#[test]
fn parses_openai_error_body() {
    let body = r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota","code":"insufficient_quota"}}"#;
    assert_eq!(
        parse_error(Some(429), body),
        ClientError::Api {
            status: Some(429),
            code: Some("insufficient_quota".into()),
            message: "You exceeded your current quota".into(),
        }
    );
}

#[test]
fn error_without_code_falls_back_to_type() {
    let body = r#"{"error":{"message":"bad","type":"invalid_request_error","code":null}}"#;
    let ClientError::Api { code, .. } = parse_error(Some(400), body) else {
        panic!("expected api error");
    };
    assert_eq!(code.as_deref(), Some("invalid_request_error"));
}

#[test]
fn non_json_error_body_is_truncated_into_message() {
    let body = "x".repeat(500);
    let ClientError::Api {
        status,
        code,
        message,
    } = parse_error(Some(502), &body)
    else {
        panic!("expected api error");
    };
    assert_eq!(status, Some(502));
    assert!(code.is_none());
    assert_eq!(message.len(), 200);
}

#[test]
fn empty_error_body_has_placeholder_message() {
    let err = parse_error(Some(503), "");
    assert_eq!(err.to_string(), "HTTP 503: no response body");
}

#[test]
fn factory_propagates_construction_failure() {
    use crate::session::ClientFactory;

    let err = OpenAiFactory
        .build(&SessionConfig::default())
        .err()
        .unwrap();
    assert!(matches!(err, ClientError::Config(_)));
}

// -- Against a local HTTP server --

/// Read one HTTP/1.1 request (headers plus `Content-Length` body).
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Answer a single request with a canned response. Returns the base URL
/// and a handle resolving to the raw request text.
async fn serve_once(status: &str, content_type: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        request
    });

    (format!("http://{addr}/v1"), handle)
}

fn sse(events: &[&str]) -> String {
    events.iter().map(|e| format!("data: {e}\n\n")).collect()
}

fn local_config(base_url: &str) -> SessionConfig {
    SessionConfig::new("sk-local-test", base_url, "gpt-test")
}

/// A real client that never routes loopback traffic through an env proxy.
fn client_for(config: &SessionConfig) -> OpenAiClient {
    let mut client = OpenAiClient::new(config).unwrap();
    client.http = reqwest::Client::builder().no_proxy().build().unwrap();
    client
}

fn local_client(base_url: &str) -> OpenAiClient {
    client_for(&local_config(base_url))
}

fn chat_request() -> CompletionRequest {
    CompletionRequest::chat(vec![Message::system("be brief"), Message::user("hi")])
}

#[tokio::test]
async fn completion_is_parsed_from_http_response() {
    let body = json!({
        "choices": [{"message": {"role": "assistant", "content": "Hello"}}],
        "usage": {"prompt_tokens": 7, "completion_tokens": 2}
    })
    .to_string();
    let (base, server) = serve_once("200 OK", "application/json", &body).await;

    let response = local_client(&base)
        .send_message(&chat_request())
        .await
        .unwrap();
    assert_eq!(response.content.as_deref(), Some("Hello"));
    assert_eq!(response.usage.total_tokens(), 9);

    let request = server.await.unwrap().to_lowercase();
    assert!(request.starts_with("post /v1/chat/completions "));
    assert!(request.contains("authorization: bearer sk-local-test"));
    assert!(request.contains(r#""stream":false"#));
}

#[tokio::test]
async fn quota_error_status_is_mapped() {
    let body = r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota","code":"insufficient_quota"}}"#;
    let (base, _server) = serve_once("429 Too Many Requests", "application/json", body).await;

    let err = local_client(&base)
        .send_message(&chat_request())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ClientError::Api {
            status: Some(429),
            code: Some("insufficient_quota".into()),
            message: "You exceeded your current quota".into(),
        }
    );
    assert_eq!(classify(err), AiError::QuotaExceeded);
}

#[tokio::test]
async fn error_object_in_ok_response_is_an_api_error() {
    let body = r#"{"error":{"message":"The model does not exist","code":"model_not_found"}}"#;
    let (base, _server) = serve_once("200 OK", "application/json", body).await;

    let err = local_client(&base)
        .send_message(&chat_request())
        .await
        .unwrap_err();
    assert!(matches!(
        &err,
        ClientError::Api { status: None, code: Some(c), .. } if c == "model_not_found"
    ));
}

#[tokio::test]
async fn stream_delivers_deltas_until_done() {
    let body = sse(&[
        r#"{"choices":[{"delta":{"role":"assistant"}}]}"#,
        r#"{"choices":[{"delta":{"content":"He"}}]}"#,
        r#"{"choices":[{"delta":{"content":"llo"}}],"usage":{"prompt_tokens":4,"completion_tokens":2}}"#,
        "[DONE]",
    ]);
    let (base, server) = serve_once("200 OK", "text/event-stream", &body).await;

    let mut seen = Vec::new();
    let response = local_client(&base)
        .send_message_streaming(&chat_request(), &mut |chunk: &str| {
            seen.push(chunk.to_string())
        })
        .await
        .unwrap();

    assert_eq!(seen, vec!["He", "llo"]);
    assert_eq!(response.content.as_deref(), Some("Hello"));
    assert_eq!(response.usage.output_tokens, 2);

    let request = server.await.unwrap();
    assert!(request.contains(r#""stream":true"#));
}

#[tokio::test]
async fn stream_without_done_keeps_content() {
    let body = sse(&[
        r#"{"choices":[{"delta":{"content":"cut "}}]}"#,
        r#"{"choices":[{"delta":{"content":"short"}}]}"#,
    ]);
    let (base, _server) = serve_once("200 OK", "text/event-stream", &body).await;

    let mut seen = Vec::new();
    let response = local_client(&base)
        .send_message_streaming(&chat_request(), &mut |chunk: &str| {
            seen.push(chunk.to_string())
        })
        .await
        .unwrap();

    assert_eq!(seen, vec!["cut ", "short"]);
    assert_eq!(response.content.as_deref(), Some("cut short"));
}

#[tokio::test]
async fn error_object_mid_stream_fails_the_call() {
    let body = sse(&[
        r#"{"choices":[{"delta":{"content":"par"}}]}"#,
        r#"{"error":{"message":"quota gone","code":"insufficient_quota"}}"#,
        r#"{"choices":[{"delta":{"content":"never"}}]}"#,
    ]);
    let (base, _server) = serve_once("200 OK", "text/event-stream", &body).await;

    let mut seen = Vec::new();
    let err = local_client(&base)
        .send_message_streaming(&chat_request(), &mut |chunk: &str| {
            seen.push(chunk.to_string())
        })
        .await
        .unwrap_err();

    assert_eq!(seen, vec!["par"]);
    assert_eq!(classify(err), AiError::QuotaExceeded);
}

#[tokio::test]
async fn empty_stream_has_no_content() {
    let (base, _server) = serve_once("200 OK", "text/event-stream", &sse(&["[DONE]"])).await;

    let response = local_client(&base)
        .send_message_streaming(&chat_request(), &mut |_: &str| {})
        .await
        .unwrap();
    assert!(response.content.is_none());
}

#[tokio::test]
async fn streaming_http_error_is_mapped() {
    let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#;
    let (base, _server) = serve_once("401 Unauthorized", "application/json", body).await;

    let err = local_client(&base)
        .send_message_streaming(&chat_request(), &mut |_: &str| {})
        .await
        .unwrap_err();
    assert_eq!(classify(err), AiError::InvalidCredential);
}

#[tokio::test]
async fn session_streams_through_real_client() {
    let body = sse(&[
        r#"{"choices":[{"delta":{"content":"All "}}]}"#,
        r#"{"choices":[{"delta":{"content":"clear."}}]}"#,
        "[DONE]",
    ]);
    let (base, _server) = serve_once("200 OK", "text/event-stream", &body).await;

    let factory = |config: &SessionConfig| -> Result<Arc<dyn AiClient>, ClientError> {
        Ok(Arc::new(client_for(config)) as Arc<dyn AiClient>)
    };
    let mut session = Session::with_factory(local_config(&base), Arc::new(factory));
    let mut seen = String::new();
    let reply = session
        .send_streaming("any alerts?", |chunk| seen.push_str(chunk))
        .await
        .unwrap();

    assert_eq!(reply, "All clear.");
    assert_eq!(seen, "All clear.");
    assert_eq!(session.history_len(), 2);
}
