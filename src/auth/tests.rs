//! Tests for the auth module

use super::*;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn authenticator(server: &MockServer) -> Authenticator {
    let http = HttpClient::with_config(
        HttpClientConfig::builder()
            .base_url(server.uri())
            .max_retries(0)
            .build(),
    )
    .unwrap();
    Authenticator::new(http, Credentials::new("alice", "s3cret"))
}

#[tokio::test]
async fn test_login_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_string_contains("username=alice"))
        .and(body_string_contains("password=s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"sessionid": "abc", "username": "alice"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = authenticator(&mock_server).login().await.unwrap();

    assert_eq!(session.id(), "abc");
    assert_eq!(session.cookie(), "sessionid=abc");
}

#[tokio::test]
async fn test_login_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid credentials"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = authenticator(&mock_server).login().await.unwrap_err();

    match err {
        Error::Auth { message } => {
            assert!(message.contains("401"));
            assert!(message.contains("invalid credentials"));
        }
        other => panic!("expected auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_login_missing_session_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {}
        })))
        .mount(&mock_server)
        .await;

    let err = authenticator(&mock_server).login().await.unwrap_err();
    assert!(matches!(err, Error::Auth { .. }));
}

#[tokio::test]
async fn test_login_empty_session_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"sessionid": ""}
        })))
        .mount(&mock_server)
        .await;

    let err = authenticator(&mock_server).login().await.unwrap_err();
    assert!(matches!(err, Error::Auth { .. }));
}
