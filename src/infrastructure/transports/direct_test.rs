use anyhow::Result;
use mockito::Matcher;

use super::DirectTransport;
use crate::domain::models::ChatReply;
use crate::domain::models::ChatRequest;
use crate::infrastructure::transports::Transport;

#[tokio::test]
async fn it_decodes_structured_replies() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat")
        .match_body(Matcher::Json(serde_json::json!({
            "prompt": "What are our most popular dishes?",
            "format": "json",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "The margherita leads.", "data": {"orders": 120}}"#)
        .create();

    let transport = DirectTransport::new(&server.url());
    let res = transport
        .send(&ChatRequest::new("What are our most popular dishes?"))
        .await?;
    mock.assert();

    match res {
        ChatReply::Structured(payload) => {
            assert_eq!(payload.message, Some("The margherita leads.".to_string()));
            assert!(payload.chart.is_none());
            assert!(payload.data.is_some());
        }
        ChatReply::Text(_) => panic!("Expected a structured reply"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_decodes_plain_text_replies() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("Your busiest day is Saturday.")
        .create();

    let transport = DirectTransport::new(&server.url());
    let res = transport.send(&ChatRequest::new("Busiest day?")).await?;
    mock.assert();

    match res {
        ChatReply::Text(text) => assert_eq!(text, "Your busiest day is Saturday."),
        ChatReply::Structured(_) => panic!("Expected a plain text reply"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_error_statuses() {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/v1/chat").with_status(500).create();

    let transport = DirectTransport::new(&server.url());
    let res = transport.send(&ChatRequest::new("Hello")).await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_fails_on_malformed_json_bodies() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{not json")
        .create();

    let transport = DirectTransport::new(&server.url());
    let res = transport.send(&ChatRequest::new("Hello")).await;

    assert!(res.is_err());
    mock.assert();
}
