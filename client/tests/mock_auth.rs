//! # Mock Authentication Tests

use std::sync::Arc;
use std::time::Duration;

use client::core::{ApiError, AuthApi, KeyValueStore};
use client::services::api::AuthService;
use client::services::mock_auth::{build_auth, MockAuthService, MOCK_TOKEN_PREFIX};
use client::storage::{TokenStore, USER_DATA_KEY};
use client::testing::{client_with, user_json, FakeTransport};
use client::{ApiClient, ClientConfig};
use reqwest::Method;
use serde_json::json;

fn mock_auth(client: &Arc<ApiClient>) -> MockAuthService {
    let real: Arc<dyn AuthApi> = Arc::new(AuthService::new(client.clone()));
    MockAuthService::new(real, client.tokens().clone(), Duration::from_millis(5))
}

#[tokio::test]
async fn test_fixture_login_skips_network() {
    // Arrange
    let fake = FakeTransport::new();
    let (client, storage) = client_with(fake.clone());
    let auth = mock_auth(&client);

    // Act
    let session = auth
        .login("test@example.com", "Test123!@#")
        .await
        .expect("Fixture login should succeed");

    // Assert
    let suffix = session
        .token
        .strip_prefix(&format!("{}mock-user-1-", MOCK_TOKEN_PREFIX))
        .expect("Token should embed the fixture user id");
    assert!(suffix.parse::<i64>().is_ok());
    assert_eq!(session.user.username, "testuser");
    assert!(session.expires_in.is_some());
    assert!(fake.requests().is_empty());
    assert_eq!(
        client.tokens().get_auth_token().await.unwrap().as_deref(),
        Some(session.token.as_str())
    );
    assert!(storage.get(USER_DATA_KEY).await.unwrap().is_some());
}

#[tokio::test]
async fn test_current_user_with_mock_token_skips_network() {
    let fake = FakeTransport::new();
    let (client, storage) = client_with(fake.clone());
    mock_auth(&client)
        .login("test@example.com", "Test123!@#")
        .await
        .expect("Fixture login should succeed");

    // Restart with the cached profile gone; the token alone identifies the user.
    storage.remove(USER_DATA_KEY).await.unwrap();
    let tokens = Arc::new(TokenStore::new(storage.clone()));
    tokens.restore().await.unwrap();
    let restarted = Arc::new(ApiClient::new(fake.clone(), tokens));

    let user = mock_auth(&restarted)
        .current_user()
        .await
        .expect("Mock session should resolve locally");

    assert_eq!(user.id, "mock-user-1");
    assert_eq!(user.username, "testuser");
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_other_credentials_reach_the_api() {
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    fake.ok(
        Method::POST,
        "/auth/login",
        json!({"user": user_json("u7", "real"), "token": "real-jwt"}),
    )
    .ok(Method::GET, "/auth/me", user_json("u7", "real"));
    let auth = mock_auth(&client);

    let session = auth.login("real@example.com", "Password1").await.expect("Login should succeed");
    let me = auth.current_user().await.expect("Profile should load");

    assert_eq!(session.token, "real-jwt");
    assert_eq!(me.id, "u7");
    assert_eq!(fake.count(Method::POST, "/auth/login"), 1);
    assert_eq!(fake.count(Method::GET, "/auth/me"), 1);
}

#[tokio::test]
async fn test_wrong_fixture_password_is_forwarded() {
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    fake.reply(Method::POST, "/auth/login", 401, json!({"success": false, "error": "Invalid credentials"}));

    let err = mock_auth(&client)
        .login("test@example.com", "wrong")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Http { status: 401, .. }));
    assert_eq!(fake.count(Method::POST, "/auth/login"), 1);
}

#[tokio::test]
async fn test_mock_logout_is_local() {
    let fake = FakeTransport::new();
    let (client, storage) = client_with(fake.clone());
    let auth = mock_auth(&client);
    auth.login("demo@example.com", "Demo123!@#").await.expect("Fixture login should succeed");

    auth.logout().await.expect("Logout should succeed");

    assert!(!client.tokens().is_authenticated());
    assert!(storage.is_empty());
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_build_auth_respects_flag() {
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());

    let real = build_auth(&ClientConfig::default(), client.clone());
    assert!(real.login("test@example.com", "Test123!@#").await.is_err());
    assert_eq!(fake.count(Method::POST, "/auth/login"), 1);

    let config = ClientConfig {
        mock_auth: true,
        mock_latency: Duration::ZERO,
        ..ClientConfig::default()
    };
    let mocked = build_auth(&config, client);
    assert!(mocked.login("test@example.com", "Test123!@#").await.is_ok());
    assert_eq!(fake.count(Method::POST, "/auth/login"), 1);
}
