//! SMTP2GO relay 对 mock API 的集成测试

mod common;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mailalias_provider::{MailRelay, ProviderError, RelayEmail};

fn email(text: Option<&str>, html: Option<&str>) -> RelayEmail {
    RelayEmail {
        to: vec!["friend@example.org".to_string()],
        sender: "jdoe@example.com".to_string(),
        subject: "Hello".to_string(),
        text_body: text.map(str::to_string),
        html_body: html.map(str::to_string),
    }
}

#[tokio::test]
async fn send_posts_payload_with_derived_html() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/email/send"))
        .and(body_json(json!({
            "api_key": "api-test-key",
            "to": ["friend@example.org"],
            "sender": "jdoe@example.com",
            "subject": "Hello",
            "text_body": "line one\nline two",
            "html_body": "line one<br>line two"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_id": "req-1",
            "data": { "succeeded": 1, "failed": 0, "email_id": "em-9" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let relay = require_ok!(common::smtp2go(&server).ok_or("client"));
    let receipt = require_ok!(relay.send(&email(Some("line one\nline two"), None)).await);

    assert_eq!(receipt.request_id.as_deref(), Some("req-1"));
    assert_eq!(receipt.succeeded, 1);
    assert_eq!(receipt.email_id.as_deref(), Some("em-9"));
}

#[tokio::test]
async fn html_only_sends_stripped_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/email/send"))
        .and(body_json(json!({
            "api_key": "api-test-key",
            "to": ["friend@example.org"],
            "sender": "jdoe@example.com",
            "subject": "Hello",
            "text_body": "Hi there",
            "html_body": "<p>Hi&nbsp;there</p>"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_id": "req-2",
            "data": { "succeeded": 1, "failed": 0 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let relay = require_ok!(common::smtp2go(&server).ok_or("client"));
    require_ok!(relay.send(&email(None, Some("<p>Hi&nbsp;there</p>"))).await);
}

#[tokio::test]
async fn rejected_key_is_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/email/send"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "request_id": "req-3",
            "data": { "error": "Invalid API key", "error_code": "E_ApiResponseCodes.API_KEY_INVALID" }
        })))
        .mount(&server)
        .await;

    let relay = require_ok!(common::smtp2go(&server).ok_or("client"));
    let Err(err) = relay.send(&email(Some("x"), None)).await else {
        panic!("expected error");
    };
    assert!(matches!(err, ProviderError::InvalidCredentials { .. }));
    assert_eq!(err.provider_message(), "Invalid API key");
}

#[tokio::test]
async fn server_error_without_body_uses_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/email/send"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let relay = require_ok!(common::smtp2go(&server).ok_or("client"));
    let Err(err) = relay.send(&email(Some("x"), None)).await else {
        panic!("expected error");
    };
    assert!(matches!(err, ProviderError::Unknown { .. }));
    assert_eq!(err.provider_message(), "Service Unavailable");
}
