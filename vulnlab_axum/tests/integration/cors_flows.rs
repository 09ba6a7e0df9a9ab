use reqwest::{Method, Response, StatusCode};

use crate::common::TestServer;

const FRONTEND_ORIGIN: &str = "http://localhost:5173";

fn header<'a>(response: &'a Response, name: &str) -> &'a str {
    response
        .headers()
        .get(name)
        .unwrap_or_else(|| panic!("missing {name} header"))
        .to_str()
        .unwrap()
}

fn header_list(response: &Response, name: &str) -> Vec<String> {
    header(response, name)
        .split(',')
        .map(|v| v.trim().to_ascii_lowercase())
        .collect()
}

#[tokio::test]
async fn test_preflight_allows_frontend_with_csrf_header() {
    let server = TestServer::start_with_layers()
        .await
        .expect("Failed to start test server");
    let mut browser = server.browser();

    let response = browser
        .request_with_headers(
            Method::OPTIONS,
            "/mass/update",
            &[
                ("origin", FRONTEND_ORIGIN),
                ("access-control-request-method", "POST"),
                ("access-control-request-headers", "content-type,x-csrf-token"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "access-control-allow-origin"), FRONTEND_ORIGIN);
    assert_eq!(header(&response, "access-control-allow-credentials"), "true");

    let allowed_headers = header_list(&response, "access-control-allow-headers");
    for expected in ["content-type", "authorization", "x-csrf-token"] {
        assert!(
            allowed_headers.iter().any(|h| h == expected),
            "{expected} not in {allowed_headers:?}"
        );
    }

    let allowed_methods = header_list(&response, "access-control-allow-methods");
    for expected in ["get", "post", "put", "delete", "options"] {
        assert!(
            allowed_methods.iter().any(|m| m == expected),
            "{expected} not in {allowed_methods:?}"
        );
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_gate_rejection_carries_cors_headers() {
    let server = TestServer::start_with_layers()
        .await
        .expect("Failed to start test server");
    let mut browser = server.browser();

    let response = browser
        .request_with_headers(Method::GET, "/auth/me", &[("origin", FRONTEND_ORIGIN)])
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(header(&response, "access-control-allow-origin"), FRONTEND_ORIGIN);
    assert_eq!(header(&response, "access-control-allow-credentials"), "true");

    server.shutdown().await;
}

#[tokio::test]
async fn test_credentialed_login_from_frontend() {
    let server = TestServer::start_with_layers()
        .await
        .expect("Failed to start test server");
    let mut browser = server.browser();

    let response = browser
        .post_json_with_headers(
            "/auth/login",
            &serde_json::json!({ "username": "alice", "password": "alice123" }),
            &[("origin", FRONTEND_ORIGIN)],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "access-control-allow-origin"), FRONTEND_ORIGIN);
    assert!(response.headers().get("set-cookie").is_some());

    server.shutdown().await;
}

#[tokio::test]
async fn test_other_origins_are_not_allowed() {
    let server = TestServer::start_with_layers()
        .await
        .expect("Failed to start test server");
    let mut browser = server.browser();

    let response = browser
        .request_with_headers(
            Method::OPTIONS,
            "/csrf/change-email",
            &[
                ("origin", "http://evil.test"),
                ("access-control-request-method", "POST"),
            ],
        )
        .await;

    assert!(response.headers().get("access-control-allow-origin").is_none());

    server.shutdown().await;
}
