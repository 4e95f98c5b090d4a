use reqwest::{Method, StatusCode};
use serde_json::{Value, json};
use std::time::Duration;
use threec_client::model::http::{
    ApiRequest, ApiResponse, RequestBody, RequestTemplate, join_url,
};

#[test]
fn test_join_url() {
    assert_eq!(join_url("http://h/api/v1/", "/me"), "http://h/api/v1/me");
    assert_eq!(join_url("http://h/api/v1", "me"), "http://h/api/v1/me");
}

#[test]
fn test_template_keeps_key_across_urls() {
    let template = RequestTemplate::new(Method::POST)
        .json(json!({"x": 1}))
        .timeout(Duration::from_secs(4))
        .idempotent();
    let first = template.at("http://h/a");
    let second = template.at("http://h/b");

    assert_eq!(first.url, "http://h/a");
    assert_eq!(second.url, "http://h/b");
    assert_eq!(second.method, Method::POST);
    assert_eq!(second.timeout, Duration::from_secs(4));
    assert!(first.idempotency_key.is_some());
    assert_eq!(first.idempotency_key, second.idempotency_key);
    assert_eq!(second.body, RequestBody::Json(json!({"x": 1})));
}

#[test]
fn test_template_without_key_builds_plain_requests() {
    let request = RequestTemplate::new(Method::GET).at("http://h/list");
    assert_eq!(request.idempotency_key, None);
    assert_eq!(request.body, RequestBody::Empty);
    assert!(request.query.is_empty());
}

#[test]
fn test_each_logical_call_gets_its_own_key() {
    let a = ApiRequest::put("http://h").idempotent();
    let b = ApiRequest::put("http://h").idempotent();
    assert_ne!(a.idempotency_key, b.idempotency_key);
    assert!(ApiRequest::get("http://h").idempotency_key.is_none());
}

#[test]
fn test_api_response_json() {
    let response = ApiResponse::json_body(StatusCode::OK, &json!({"a": [1, 2]}));
    assert_eq!(response.json::<Value>().unwrap(), json!({"a": [1, 2]}));

    let empty = ApiResponse::new(StatusCode::OK, Vec::<u8>::new());
    assert_eq!(empty.json::<Value>().unwrap(), Value::Null);

    let broken = ApiResponse::new(StatusCode::OK, "<html>");
    assert!(broken.json::<Value>().is_err());
    assert_eq!(broken.text(), "<html>");
}
