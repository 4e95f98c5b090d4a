use crate::common::{
    ScriptedBackend, credentials, empty_reply, reply, test_config,
};
use mockito::Matcher;
use serde_json::json;
use threec_client::prelude::*;

#[tokio::test]
async fn test_login_token_shapes() {
    for body in [
        json!({"token": "abc"}),
        json!({"api_token": "abc"}),
        json!({"data": {"api_token": "abc"}}),
    ] {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/authenticate")
            .match_body(Matcher::PartialJson(json!({
                "user": "u",
                "password": "p",
                "company_id": 1,
                "company_domain": "d",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let auth = AuthClient::new(test_config(&server.url())).unwrap();
        let token = auth.login(credentials()).await.unwrap();

        assert_eq!(token, "abc");
        assert!(auth.is_authenticated().await);
        let headers = auth.auth_headers().await.unwrap();
        assert_eq!(headers.get("Authorization").unwrap(), "Bearer abc");
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/authenticate")
        .with_status(401)
        .create_async()
        .await;

    let auth = AuthClient::new(test_config(&server.url())).unwrap();
    let err = auth.login(credentials()).await.unwrap_err();

    assert!(matches!(err, AppError::InvalidCredentials));
    assert!(!auth.is_authenticated().await);
}

#[tokio::test]
async fn test_login_validation_error_carries_vendor_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/authenticate")
        .with_status(422)
        .with_body(r#"{"message": "company_domain is required"}"#)
        .create_async()
        .await;

    let auth = AuthClient::new(test_config(&server.url())).unwrap();
    match auth.login(credentials()).await {
        Err(AppError::InputInvalid(msg)) => assert_eq!(msg, "company_domain is required"),
        other => panic!("Expected InputInvalid, got {other:?}"),
    }
}

#[tokio::test]
async fn test_login_rate_limited_is_not_retried() {
    let backend = ScriptedBackend::new(vec![empty_reply(429)]);
    let auth = AuthClient::with_backend(test_config("http://test/api/v1"), backend.clone());

    let err = auth.login(credentials()).await.unwrap_err();

    assert!(matches!(err, AppError::RateLimitExceeded));
    assert_eq!(backend.sent_count(), 1);
}

#[tokio::test]
async fn test_login_without_token_in_body() {
    let backend = ScriptedBackend::new(vec![reply(200, json!({"data": {"user": "u"}}))]);
    let auth = AuthClient::with_backend(test_config("http://test/api/v1"), backend);

    let err = auth.login(credentials()).await.unwrap_err();

    assert!(matches!(err, AppError::TokenNotFound));
    assert!(!auth.is_authenticated().await);
}

#[tokio::test]
async fn test_login_with_empty_token_is_rejected() {
    let backend = ScriptedBackend::new(vec![reply(200, json!({"token": ""}))]);
    let auth = AuthClient::with_backend(test_config("http://test/api/v1"), backend);

    let err = auth.login(credentials()).await.unwrap_err();

    assert!(matches!(err, AppError::TokenNotFound));
    assert!(!auth.is_authenticated().await);
    assert!(matches!(
        auth.auth_headers().await,
        Err(AppError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn test_login_missing_credential_sends_nothing() {
    if std::env::var("THREEC_COMPANY_ID").is_ok() {
        return;
    }
    let backend = ScriptedBackend::new(vec![reply(200, json!({"token": "abc"}))]);
    let auth = AuthClient::with_backend(test_config("http://test/api/v1"), backend.clone());
    let partial = PartialCredentials::default()
        .user("u")
        .password("p")
        .company_domain("d");

    let err = auth.login(partial).await.unwrap_err();

    assert!(matches!(err, AppError::InputInvalid(_)));
    assert_eq!(backend.sent_count(), 0);
}

#[tokio::test]
async fn test_login_retries_network_error_and_server_error() {
    let backend = ScriptedBackend::new(vec![
        Err(SendError::Network("connection reset".to_string())),
        empty_reply(502),
        reply(200, json!({"token": "abc"})),
    ]);
    let auth = AuthClient::with_backend(test_config("http://test/api/v1"), backend.clone());

    let token = auth.login(credentials()).await.unwrap();

    assert_eq!(token, "abc");
    assert_eq!(backend.sent_count(), 3);
    assert!(auth.is_authenticated().await);
}

#[tokio::test]
async fn test_login_gives_up_after_retry_budget() {
    let backend = ScriptedBackend::new(vec![
        Err(SendError::Timeout),
        empty_reply(503),
        Err(SendError::Timeout),
        reply(200, json!({"token": "too late"})),
    ]);
    let auth = AuthClient::with_backend(test_config("http://test/api/v1"), backend.clone());

    let err = auth.login(credentials()).await.unwrap_err();

    assert!(matches!(err, AppError::ApiUnavailable(UnavailableReason::Timeout)));
    assert!(err.is_transient());
    assert_eq!(backend.sent_count(), 3);
}

#[tokio::test]
async fn test_login_does_not_send_idempotency_key() {
    let backend = ScriptedBackend::new(vec![reply(200, json!({"token": "abc"}))]);
    let auth = AuthClient::with_backend(test_config("http://test/api/v1"), backend.clone());

    auth.login(credentials()).await.unwrap();

    let sent = backend.sent();
    assert_eq!(sent[0].url, "http://test/api/v1/authenticate");
    assert!(sent[0].header("Idempotency-Key").is_none());
}

#[tokio::test]
async fn test_check_session_returns_profile() {
    let mut server = mockito::Server::new_async().await;
    let _login = server
        .mock("POST", "/authenticate")
        .with_status(200)
        .with_body(r#"{"token": "abc"}"#)
        .create_async()
        .await;
    let me = server
        .mock("GET", "/me")
        .match_header("authorization", "Bearer abc")
        .with_status(200)
        .with_body(r#"{"data": {"name": "Agent"}}"#)
        .create_async()
        .await;

    let auth = AuthClient::new(test_config(&server.url())).unwrap();
    auth.login(credentials()).await.unwrap();
    let profile = auth.check_session().await.unwrap();

    assert_eq!(profile, json!({"data": {"name": "Agent"}}));
    me.assert_async().await;
}

#[tokio::test]
async fn test_check_session_expired_token() {
    let backend = ScriptedBackend::new(vec![
        reply(200, json!({"token": "abc"})),
        empty_reply(401),
    ]);
    let auth = AuthClient::with_backend(test_config("http://test/api/v1"), backend);

    auth.login(credentials()).await.unwrap();
    let err = auth.check_session().await.unwrap_err();

    assert!(matches!(err, AppError::TokenExpired(_)));
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_check_session_forbidden_and_server_error() {
    let backend = ScriptedBackend::new(vec![
        reply(200, json!({"token": "abc"})),
        empty_reply(403),
        empty_reply(500),
    ]);
    let auth = AuthClient::with_backend(test_config("http://test/api/v1"), backend.clone());
    auth.login(credentials()).await.unwrap();

    let forbidden = auth.check_session().await.unwrap_err();
    assert!(matches!(forbidden, AppError::Unauthorized(_)));

    let unavailable = auth.check_session().await.unwrap_err();
    assert!(matches!(unavailable, AppError::ApiUnavailable(_)));
    // session checks are never retried
    assert_eq!(backend.sent_count(), 3);
}

#[tokio::test]
async fn test_check_session_requires_login() {
    let backend = ScriptedBackend::new(vec![]);
    let auth = AuthClient::with_backend(test_config("http://test/api/v1"), backend.clone());

    let err = auth.check_session().await.unwrap_err();

    assert!(matches!(err, AppError::Unauthorized(_)));
    assert_eq!(backend.sent_count(), 0);
}

#[tokio::test]
async fn test_logout_clears_token() {
    let backend = ScriptedBackend::new(vec![
        reply(200, json!({"token": "abc"})),
        reply(200, json!({})),
    ]);
    let auth = AuthClient::with_backend(test_config("http://test/api/v1"), backend.clone());

    auth.login(credentials()).await.unwrap();
    auth.logout().await.unwrap();

    assert!(!auth.is_authenticated().await);
    assert!(matches!(
        auth.auth_headers().await,
        Err(AppError::Unauthorized(_))
    ));
    assert_eq!(backend.sent()[1].url, "http://test/api/v1/logout");
}

#[tokio::test]
async fn test_logout_expired_session_clears_token() {
    let backend = ScriptedBackend::new(vec![
        reply(200, json!({"token": "abc"})),
        empty_reply(401),
    ]);
    let auth = AuthClient::with_backend(test_config("http://test/api/v1"), backend);

    auth.login(credentials()).await.unwrap();
    let err = auth.logout().await.unwrap_err();

    assert!(matches!(err, AppError::TokenExpired(_)));
    assert!(!auth.is_authenticated().await);
}

#[tokio::test]
async fn test_logout_rate_limited_keeps_token() {
    let backend = ScriptedBackend::new(vec![
        reply(200, json!({"token": "abc"})),
        empty_reply(429),
        empty_reply(503),
    ]);
    let auth = AuthClient::with_backend(test_config("http://test/api/v1"), backend);
    auth.login(credentials()).await.unwrap();

    assert!(matches!(
        auth.logout().await,
        Err(AppError::RateLimitExceeded)
    ));
    assert!(auth.is_authenticated().await);

    assert!(matches!(
        auth.logout().await,
        Err(AppError::ApiUnavailable(_))
    ));
    assert!(auth.is_authenticated().await);
}

#[tokio::test]
async fn test_logout_requires_login() {
    let backend = ScriptedBackend::new(vec![]);
    let auth = AuthClient::with_backend(test_config("http://test/api/v1"), backend);

    assert!(matches!(
        auth.logout().await,
        Err(AppError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn test_auth_headers_without_login() {
    let backend = ScriptedBackend::new(vec![]);
    let auth = AuthClient::with_backend(test_config("http://test/api/v1"), backend);

    assert!(!auth.is_authenticated().await);
    assert!(matches!(
        auth.auth_headers().await,
        Err(AppError::Unauthorized(_))
    ));
}
