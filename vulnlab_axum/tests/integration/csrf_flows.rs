use reqwest::StatusCode;
use serde_json::json;

use crate::common::mock_browser::status_and_json;
use crate::common::{ALICE, BOB, TestServer};

#[tokio::test]
async fn test_token_endpoint_reissues_session() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let mut browser = server.browser();
    browser.login(ALICE.0, ALICE.1).await;
    let before = browser.session_cookie();

    let token = browser.csrf_token().await;
    assert!(!token.is_empty());
    assert_ne!(browser.session_cookie(), before, "token lives in the re-signed session");

    let (status, body) = status_and_json(browser.get("/auth/me").await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], ALICE.2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_profile_returns_own_email() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let mut browser = server.browser();
    browser.login(BOB.0, BOB.1).await;

    let (status, body) = status_and_json(browser.get("/csrf/profile").await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "bob@vulnlab.local");

    server.shutdown().await;
}

#[tokio::test]
async fn test_protected_change_email_requires_token() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let mut browser = server.browser();
    browser.login(ALICE.0, ALICE.1).await;
    let token = browser.csrf_token().await;

    for supplied in [json!(null), json!(""), json!("forged-token")] {
        let (status, body) = status_and_json(
            browser
                .post_json(
                    "/csrf/change-email",
                    &json!({ "email": "evil@attacker.test", "token": supplied, "secure": true }),
                )
                .await,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "invalid CSRF token");
    }

    let (_, body) = status_and_json(browser.get("/csrf/profile").await).await;
    assert_eq!(body["email"], "alice@vulnlab.local", "rejected change must not apply");

    let (status, body) = status_and_json(
        browser
            .post_json(
                "/csrf/change-email",
                &json!({ "email": "alice@new.test", "token": token, "secure": true }),
            )
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@new.test");

    let (_, body) = status_and_json(browser.get("/csrf/profile").await).await;
    assert_eq!(body["email"], "alice@new.test");

    server.shutdown().await;
}

#[tokio::test]
async fn test_unprotected_change_email_accepts_missing_token() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let mut browser = server.browser();
    browser.login(ALICE.0, ALICE.1).await;

    let (status, body) = status_and_json(
        browser
            .post_json(
                "/csrf/change-email",
                &json!({ "email": "evil@attacker.test", "secure": false }),
            )
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "evil@attacker.test");

    server.shutdown().await;
}

#[tokio::test]
async fn test_token_accepted_from_header() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let mut browser = server.browser();
    browser.login(ALICE.0, ALICE.1).await;
    let token = browser.csrf_token().await;

    let (status, body) = status_and_json(
        browser
            .post_json_with_headers(
                "/csrf/change-email",
                &json!({ "email": "alice@header.test", "secure": true }),
                &[("x-csrf-token", token.as_str())],
            )
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@header.test");

    // A body token takes precedence over the header.
    let (_, body) = status_and_json(
        browser
            .post_json_with_headers(
                "/csrf/change-email",
                &json!({ "email": "alice@body.test", "token": "wrong", "secure": true }),
                &[("x-csrf-token", token.as_str())],
            )
            .await,
    )
    .await;
    assert_eq!(body["error"], "invalid CSRF token");

    server.shutdown().await;
}

#[tokio::test]
async fn test_reissued_token_invalidates_previous() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let mut browser = server.browser();
    browser.login(ALICE.0, ALICE.1).await;
    let first = browser.csrf_token().await;
    let second = browser.csrf_token().await;
    assert_ne!(first, second);

    let (_, body) = status_and_json(
        browser
            .post_json(
                "/csrf/change-email",
                &json!({ "email": "a@first.test", "token": first, "secure": true }),
            )
            .await,
    )
    .await;
    assert_eq!(body["error"], "invalid CSRF token");

    let (_, body) = status_and_json(
        browser
            .post_json(
                "/csrf/change-email",
                &json!({ "email": "a@second.test", "token": second, "secure": true }),
            )
            .await,
    )
    .await;
    assert_eq!(body["email"], "a@second.test");

    server.shutdown().await;
}

#[tokio::test]
async fn test_token_does_not_transfer_between_sessions() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let mut alice = server.browser();
    alice.login(ALICE.0, ALICE.1).await;
    let alice_token = alice.csrf_token().await;

    // A second login by the same user is a different session.
    let mut other_tab = server.browser();
    other_tab.login(ALICE.0, ALICE.1).await;
    other_tab.csrf_token().await;

    let (_, body) = status_and_json(
        other_tab
            .post_json(
                "/csrf/change-email",
                &json!({ "email": "x@cross.test", "token": alice_token, "secure": true }),
            )
            .await,
    )
    .await;
    assert_eq!(body["error"], "invalid CSRF token");

    server.shutdown().await;
}

#[tokio::test]
async fn test_empty_email_is_bad_request() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let mut browser = server.browser();
    browser.login(ALICE.0, ALICE.1).await;
    let token = browser.csrf_token().await;

    let (status, _) = status_and_json(
        browser
            .post_json(
                "/csrf/change-email",
                &json!({ "email": "", "token": token, "secure": true }),
            )
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Without a valid token the guard answers first.
    let (status, body) = status_and_json(
        browser
            .post_json(
                "/csrf/change-email",
                &json!({ "email": "", "token": "", "secure": true }),
            )
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "invalid CSRF token");

    server.shutdown().await;
}
