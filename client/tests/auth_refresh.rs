//! # Auth Interceptor Tests
//!
//! Bearer attachment, one-shot refresh-and-retry, session termination and the
//! login/logout lifecycle, against a scripted transport.

use std::time::Duration;

use client::core::{ApiError, AuthApi, KeyValueStore};
use client::services::api::{AuthService, PostService, RequestBody};
use client::storage::{TokenStore, AUTH_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_DATA_KEY};
use client::testing::{client_with, user_json, FakeTransport};
use reqwest::Method;
use serde_json::{json, Value};
use shared::PaginatedResponse;

const FEED: &str = "/posts/feed";
const REFRESH: &str = "/auth/refresh";

fn post_json(id: &str) -> Value {
    json!({"id": id, "userId": "u1", "images": [], "createdAt": "2024-05-01T12:00:00Z"})
}

fn feed_page() -> PaginatedResponse<Value> {
    PaginatedResponse::last(vec![post_json("p1")])
}

async fn logged_in(client: &client::ApiClient, access: &str, refresh: Option<&str>) {
    client
        .tokens()
        .set_auth_token(access)
        .await
        .expect("Setting token should succeed in test");
    if let Some(refresh) = refresh {
        client
            .tokens()
            .set_refresh_token(refresh)
            .await
            .expect("Setting refresh token should succeed in test");
    }
}

#[tokio::test]
async fn test_expired_token_is_refreshed_and_request_retried() {
    // Arrange
    let fake = FakeTransport::new();
    let (client, storage) = client_with(fake.clone());
    logged_in(&client, "T1", Some("R1")).await;
    fake.unauthorized(Method::GET, FEED)
        .page(Method::GET, FEED, &feed_page())
        .ok(Method::POST, REFRESH, json!({"token": "T2", "refreshToken": "R2", "expiresIn": 3600}));

    // Act
    let page = PostService::new(client.clone())
        .get_feed(None)
        .await
        .expect("Feed should load after refresh");

    // Assert
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, "p1");
    assert_eq!(fake.count(Method::POST, REFRESH), 1);

    let feed_calls = fake.requests_to(Method::GET, FEED);
    assert_eq!(feed_calls.len(), 2);
    assert_eq!(feed_calls[0].authorization(), Some("Bearer T1"));
    assert_eq!(feed_calls[1].authorization(), Some("Bearer T2"));

    let refresh_call = &fake.requests_to(Method::POST, REFRESH)[0];
    assert_eq!(refresh_call.authorization(), None);
    assert_eq!(refresh_call.body, RequestBody::Json(json!({"refreshToken": "R1"})));

    assert_eq!(storage.get(AUTH_TOKEN_KEY).await.unwrap().as_deref(), Some("T2"));
    assert_eq!(storage.get(REFRESH_TOKEN_KEY).await.unwrap().as_deref(), Some("R2"));
    assert!(client.tokens().access_token_expires_at().is_some());
}

#[tokio::test]
async fn test_failed_refresh_ends_session() {
    // Arrange
    let fake = FakeTransport::new();
    let (client, storage) = client_with(fake.clone());
    logged_in(&client, "T1", Some("R1")).await;
    fake.unauthorized(Method::GET, FEED).reply(
        Method::POST,
        REFRESH,
        401,
        json!({"success": false, "error": "Invalid refresh token"}),
    );
    let posts = PostService::new(client.clone());

    // Act
    let err = posts.get_feed(None).await.unwrap_err();

    // Assert
    assert!(err.is_session_ended());
    match err {
        ApiError::SessionExpired(cause) => {
            assert!(matches!(*cause, ApiError::Http { status: 401, ref message } if message == "Invalid refresh token"));
        }
        other => panic!("expected SessionExpired, got {other:?}"),
    }
    assert!(!client.tokens().is_authenticated());
    assert_eq!(client.tokens().get_refresh_token().await.unwrap(), None);
    assert!(storage.is_empty());
    assert_eq!(fake.count(Method::GET, FEED), 1);

    // Later requests go out without credentials.
    fake.page(Method::GET, "/posts/explore", &feed_page());
    posts.get_explore(None).await.expect("Explore should load");
    assert_eq!(fake.requests_to(Method::GET, "/posts/explore")[0].authorization(), None);
}

#[tokio::test]
async fn test_second_401_is_not_retried_again() {
    // Arrange
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    logged_in(&client, "T1", Some("R1")).await;
    fake.unauthorized(Method::GET, FEED)
        .unauthorized(Method::GET, FEED)
        .ok(Method::POST, REFRESH, json!({"token": "T2"}));

    // Act
    let err = PostService::new(client.clone()).get_feed(None).await.unwrap_err();

    // Assert
    assert!(matches!(err, ApiError::Unauthorized(ref m) if m == "Token expired"));
    assert_eq!(fake.count(Method::POST, REFRESH), 1);
    assert_eq!(fake.count(Method::GET, FEED), 2);
    assert_eq!(fake.pending(), 0);
    // The refreshed session is kept; only refresh failure ends it.
    assert_eq!(client.tokens().get_auth_token().await.unwrap().as_deref(), Some("T2"));
    assert_eq!(client.tokens().get_refresh_token().await.unwrap().as_deref(), Some("R1"));
}

#[tokio::test]
async fn test_401_without_refresh_token_clears_auth() {
    // Arrange
    let fake = FakeTransport::new();
    let (client, storage) = client_with(fake.clone());
    logged_in(&client, "T1", None).await;
    fake.unauthorized(Method::GET, FEED);

    // Act
    let err = PostService::new(client.clone()).get_feed(None).await.unwrap_err();

    // Assert
    assert!(matches!(err, ApiError::Unauthorized(ref m) if m == "Token expired"));
    assert_eq!(fake.count(Method::POST, REFRESH), 0);
    assert!(!client.tokens().is_authenticated());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    // Arrange
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    logged_in(&client, "T1", Some("R1")).await;
    fake.unauthorized(Method::GET, FEED)
        .unauthorized(Method::GET, FEED)
        .page(Method::GET, FEED, &feed_page())
        .page(Method::GET, FEED, &feed_page())
        .reply_after(
            Method::POST,
            REFRESH,
            200,
            json!({"success": true, "data": {"token": "T2", "refreshToken": "R2"}}),
            Duration::from_millis(50),
        );
    let posts = PostService::new(client.clone());

    // Act
    let (a, b) = tokio::join!(posts.get_feed(None), posts.get_feed(None));

    // Assert
    assert!(a.is_ok(), "first request failed: {:?}", a.err());
    assert!(b.is_ok(), "second request failed: {:?}", b.err());
    assert_eq!(fake.count(Method::POST, REFRESH), 1);

    let retried: Vec<_> = fake
        .requests_to(Method::GET, FEED)
        .into_iter()
        .filter(|r| r.authorization() == Some("Bearer T2"))
        .collect();
    assert_eq!(retried.len(), 2);
}

#[tokio::test]
async fn test_logout_during_refresh_stays_logged_out() {
    // Arrange
    let fake = FakeTransport::new();
    let (client, storage) = client_with(fake.clone());
    logged_in(&client, "T1", Some("R1")).await;
    fake.unauthorized(Method::GET, FEED)
        .reply_after(
            Method::POST,
            REFRESH,
            200,
            json!({"success": true, "data": {"token": "T2", "refreshToken": "R2"}}),
            Duration::from_millis(100),
        )
        .reply(Method::POST, "/auth/logout", 200, json!({"success": true}));
    let posts = PostService::new(client.clone());
    let auth = AuthService::new(client.clone());

    // Act
    let (feed, logout) = tokio::join!(posts.get_feed(None), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        auth.logout().await
    });

    // Assert
    logout.expect("Logout should succeed");
    assert!(matches!(feed, Err(ApiError::Unauthorized(_))));
    assert!(!client.tokens().is_authenticated());
    assert_eq!(client.tokens().get_auth_token().await.unwrap(), None);
    assert_eq!(client.tokens().get_refresh_token().await.unwrap(), None);
    assert!(storage.is_empty());
    assert_eq!(fake.count(Method::GET, FEED), 1);
}

#[tokio::test]
async fn test_forced_refresh_without_session_is_unauthorized() {
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());

    let err = client.refresh_session().await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized(_)));
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_login_persists_session() {
    // Arrange
    let fake = FakeTransport::new();
    let (client, storage) = client_with(fake.clone());
    fake.ok(
        Method::POST,
        "/auth/login",
        json!({"user": user_json("u1", "alice"), "token": "T", "refreshToken": "R", "expiresIn": 900}),
    );
    let auth = AuthService::new(client.clone());

    // Act
    let session = auth
        .login(" alice@example.com ", "hunter22")
        .await
        .expect("Login should succeed");

    // Assert
    assert_eq!(session.user.username, "alice");
    let login_call = &fake.requests_to(Method::POST, "/auth/login")[0];
    assert_eq!(login_call.authorization(), None);
    assert_eq!(
        login_call.body,
        RequestBody::Json(json!({"email": "alice@example.com", "password": "hunter22"}))
    );
    assert_eq!(storage.len(), 3);
    assert!(storage.get(USER_DATA_KEY).await.unwrap().is_some());

    // A fresh process restores the same session without a network call.
    let restored = TokenStore::new(storage.clone());
    assert!(restored.restore().await.unwrap());
    assert_eq!(restored.get_user().await.unwrap().map(|u| u.id).as_deref(), Some("u1"));
    assert_eq!(fake.requests().len(), 1);
}

#[tokio::test]
async fn test_bad_credentials_do_not_trigger_refresh() {
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    fake.reply(
        Method::POST,
        "/auth/login",
        401,
        json!({"success": false, "error": "Invalid email or password"}),
    );

    let err = AuthService::new(client)
        .login("alice@example.com", "wrong-password")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Http { status: 401, ref message } if message == "Invalid email or password"));
    assert!(!err.is_session_ended());
    assert_eq!(fake.count(Method::POST, REFRESH), 0);
}

#[tokio::test]
async fn test_login_validation_happens_before_network() {
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    let auth = AuthService::new(client);

    assert!(matches!(auth.login("", "pw").await, Err(ApiError::Validation(_))));
    assert!(matches!(auth.login("not-an-email", "pw").await, Err(ApiError::Validation(_))));
    assert!(matches!(auth.login("a@b.io", "").await, Err(ApiError::Validation(_))));
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_logout_drops_authorization_header() {
    // Arrange
    let fake = FakeTransport::new();
    let (client, storage) = client_with(fake.clone());
    fake.ok(
        Method::POST,
        "/auth/login",
        json!({"user": user_json("u1", "alice"), "token": "T", "refreshToken": "R"}),
    )
    .reply(Method::POST, "/auth/logout", 200, json!({"success": true, "message": "Logged out"}))
    .page(Method::GET, FEED, &feed_page());
    let auth = AuthService::new(client.clone());
    auth.login("alice@example.com", "hunter22").await.expect("Login should succeed");

    // Act
    auth.logout().await.expect("Logout should succeed");
    PostService::new(client.clone())
        .get_feed(None)
        .await
        .expect("Feed should load anonymously");

    // Assert
    assert_eq!(
        fake.requests_to(Method::POST, "/auth/logout")[0].authorization(),
        Some("Bearer T")
    );
    assert_eq!(fake.requests_to(Method::GET, FEED)[0].authorization(), None);
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_logout_clears_local_state_when_server_fails() {
    let fake = FakeTransport::new();
    let (client, storage) = client_with(fake.clone());
    logged_in(&client, "T", Some("R")).await;
    fake.network_error(Method::POST, "/auth/logout");

    AuthService::new(client.clone())
        .logout()
        .await
        .expect("Logout should succeed locally");

    assert!(!client.tokens().is_authenticated());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_current_user_refreshes_cached_profile() {
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    logged_in(&client, "T", None).await;
    fake.ok(Method::GET, "/auth/me", user_json("u1", "alice_renamed"));
    let auth = AuthService::new(client.clone());

    let user = auth.current_user().await.expect("Profile should load");

    assert_eq!(user.username, "alice_renamed");
    assert_eq!(
        auth.cached_user().await.unwrap().map(|u| u.username).as_deref(),
        Some("alice_renamed")
    );
}
