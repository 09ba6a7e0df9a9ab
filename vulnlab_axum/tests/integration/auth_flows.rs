use reqwest::StatusCode;
use serde_json::json;

use crate::common::mock_browser::status_and_json;
use crate::common::{ALICE, BOB, TestServer};

#[tokio::test]
async fn test_login_then_me_returns_same_user() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let mut browser = server.browser();

    let user_id = browser.login(ALICE.0, ALICE.1).await;
    assert_eq!(user_id, ALICE.2);

    let (status, body) = status_and_json(browser.get("/auth/me").await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], ALICE.2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_me_without_login_is_unauthorized() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let mut browser = server.browser();

    let (status, body) = status_and_json(browser.get("/auth/me").await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid session");

    server.shutdown().await;
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let mut browser = server.browser();

    for (username, password) in [(BOB.0, "wrong"), ("nobody", "bob123"), ("", "")] {
        let response = browser
            .post_json(
                "/auth/login",
                &json!({ "username": username, "password": password }),
            )
            .await;
        assert!(
            response.headers().get("set-cookie").is_none(),
            "failed login must not set a cookie"
        );
        let (status, body) = status_and_json(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid credentials");
    }
    assert!(browser.session_cookie().is_none());

    server.shutdown().await;
}

#[tokio::test]
async fn test_login_rejects_malformed_body() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let mut browser = server.browser();

    let cases = [
        ("application/json", "{not json"),
        ("application/json", r#"{"username": 5, "password": "x"}"#),
        ("text/plain", r#"{"username": "bob", "password": "bob123"}"#),
    ];
    for (content_type, body) in cases {
        let (status, body) =
            status_and_json(browser.post_raw("/auth/login", content_type, body).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid body");
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let mut browser = server.browser();

    let response = browser
        .post_json(
            "/auth/login",
            &json!({ "username": BOB.0, "password": BOB.1 }),
        )
        .await;
    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("login should set the session cookie")
        .to_str()
        .unwrap()
        .to_string();

    assert!(set_cookie.starts_with(&format!("{}=", server.cookie_name)));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age="));
    assert!(!set_cookie.contains("Max-Age=0"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_logout_then_replay_is_unauthorized() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let mut browser = server.browser();
    browser.login(ALICE.0, ALICE.1).await;

    let response = browser.post_json("/auth/logout", &json!({})).await;
    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("logout should send an expiring cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.contains("Max-Age=0"));
    let (status, body) = status_and_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "logged out");

    // The browser replays whatever logout handed back.
    let (status, _) = status_and_json(browser.get("/auth/me").await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    server.shutdown().await;
}

#[tokio::test]
async fn test_logout_without_session_succeeds() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let mut browser = server.browser();

    let (status, body) =
        status_and_json(browser.post_json("/auth/logout", &json!({})).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "logged out");

    server.shutdown().await;
}

#[tokio::test]
async fn test_tampered_and_foreign_cookies_are_unauthorized() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let mut browser = server.browser();
    browser.login(BOB.0, BOB.1).await;
    let cookie = browser.session_cookie().unwrap();

    let (payload, signature) = cookie.split_once('.').expect("cookie is payload.signature");
    let first = if payload.starts_with('e') { "f" } else { "e" };
    let forged_payload = format!("{first}{}", &payload[1..]);

    for forged in [
        format!("{forged_payload}.{signature}"),
        format!("{payload}.{}", &signature[1..]),
        payload.to_string(),
        "garbage".to_string(),
    ] {
        browser.set_session_cookie(Some(forged));
        let (status, _) = status_and_json(browser.get("/auth/me").await).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    // Well-formed cookie signed under a different key.
    let other = TestServer::start_with_secret("another-integration-secret")
        .await
        .expect("Failed to start test server");
    let mut stranger = other.browser();
    stranger.login(ALICE.0, ALICE.1).await;
    let mut browser = server.browser();
    browser.set_session_cookie(stranger.session_cookie());
    let (status, _) = status_and_json(browser.get("/auth/me").await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    other.shutdown().await;
    server.shutdown().await;
}

#[tokio::test]
async fn test_gate_covers_every_protected_group() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let mut browser = server.browser();

    for path in ["/auth/me", "/csrf/token", "/csrf/profile", "/mass/me"] {
        let (status, _) = status_and_json(browser.get(path).await).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "GET {path}");
    }
    for path in [
        "/csrf/change-email",
        "/idor/profile",
        "/mass/update",
        "/sqli/search",
        "/ssrf/fetch",
    ] {
        let (status, _) = status_and_json(browser.post_json(path, &json!({})).await).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "POST {path}");
    }

    server.shutdown().await;
}
