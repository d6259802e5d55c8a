//! # Resource Service Tests
//!
//! Paths, query strings, bodies and envelope handling of the resource
//! services, plus the two best-effort reads.

use client::core::ApiError;
use client::services::api::{
    ApiServices, BookmarkService, CommentService, FileUpload, NotificationService, PostService,
    RequestBody, TradeService, UploadService, UserService, WatchlistService,
};
use client::testing::{client_with, user_json, FakeTransport};
use client::Pager;
use reqwest::Method;
use serde_json::{json, Value};
use shared::{PaginatedResponse, PaginationParams};

fn post_json(id: &str) -> Value {
    json!({"id": id, "userId": "u1", "images": [], "createdAt": "2024-05-01T12:00:00Z"})
}

fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[tokio::test]
async fn test_concurrent_like_and_unlike_both_complete() {
    // Arrange
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    client.tokens().set_auth_token("T").await.unwrap();
    fake.reply(Method::DELETE, "/posts/p1/like", 200, json!({"success": true}))
        .reply(Method::POST, "/posts/p1/like", 200, json!({"success": true, "data": {"likesCount": 5}}));
    let posts = PostService::new(client.clone());

    // Act
    let (unliked, liked) = tokio::join!(posts.unlike_post("p1"), posts.like_post("p1"));

    // Assert
    assert!(unliked.is_ok());
    assert!(liked.is_ok());
    assert_eq!(client.tokens().get_auth_token().await.unwrap().as_deref(), Some("T"));
    assert!(fake.requests().iter().all(|r| r.authorization() == Some("Bearer T")));
}

#[tokio::test]
async fn test_pager_walks_feed_until_has_more_is_false() {
    // Arrange
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    fake.page(
        Method::GET,
        "/posts/feed",
        &PaginatedResponse {
            data: vec![post_json("p1"), post_json("p2")],
            has_more: true,
            next_cursor: Some("c2".to_string()),
            total: Some(3),
        },
    )
    .page(Method::GET, "/posts/feed", &PaginatedResponse::last(vec![post_json("p3")]));
    let posts = PostService::new(client);

    // Act
    let pager = Pager::with_params(PaginationParams::page(1).with_limit(2), move |params: PaginationParams| {
        let posts = posts.clone();
        async move { posts.get_feed(Some(&params)).await }
    });
    let all = pager.collect_all(10).await.expect("Feed pages should load");

    // Assert
    let ids: Vec<_> = all.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["p1", "p2", "p3"]);
    let calls = fake.requests_to(Method::GET, "/posts/feed");
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].query, query(&[("page", "1"), ("limit", "2")]));
    assert_eq!(calls[1].query, query(&[("page", "2"), ("limit", "2"), ("cursor", "c2")]));
}

#[tokio::test]
async fn test_is_bookmarked_is_best_effort() {
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    fake.network_error(Method::GET, "/bookmarks/check/p1")
        .ok(Method::GET, "/bookmarks/check/p1", json!({"isBookmarked": true}))
        .reply(Method::GET, "/bookmarks/check/p1", 200, json!({"success": false, "error": "nope"}));
    let bookmarks = BookmarkService::new(client);

    assert!(!bookmarks.is_bookmarked("p1").await);
    assert!(bookmarks.is_bookmarked("p1").await);
    assert!(!bookmarks.is_bookmarked("p1").await);
}

#[tokio::test]
async fn test_unread_count_is_best_effort() {
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    fake.ok(Method::GET, "/notifications/unread-count", json!({"count": 7}));
    let notifications = NotificationService::new(client);

    assert_eq!(notifications.get_unread_count().await, 7);
    // Nothing scripted: the fake answers 500.
    assert_eq!(notifications.get_unread_count().await, 0);
}

#[tokio::test]
async fn test_envelope_failure_on_2xx_carries_server_message() {
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    fake.reply(
        Method::POST,
        "/posts/p1/comments",
        200,
        json!({"success": false, "error": "Comments are turned off"}),
    );

    let err = CommentService::new(client)
        .create_comment("p1", "nice shot", None)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Api(ref m) if m == "Comments are turned off"));
    assert_eq!(err.to_string(), "Comments are turned off");
}

#[tokio::test]
async fn test_reply_body_and_blank_comment() {
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    fake.ok(
        Method::POST,
        "/posts/p1/comments",
        json!({"id": "c9", "postId": "p1", "userId": "u1", "text": "same", "parentId": "c1",
               "createdAt": "2024-05-01T12:00:00Z"}),
    );
    let comments = CommentService::new(client);

    assert!(matches!(
        comments.create_comment("p1", "   ", None).await,
        Err(ApiError::Validation(_))
    ));
    let reply = comments
        .create_comment("p1", " same ", Some("c1"))
        .await
        .expect("Reply should be created");

    assert_eq!(reply.parent_id.as_deref(), Some("c1"));
    let sent = &fake.requests_to(Method::POST, "/posts/p1/comments")[0];
    assert_eq!(sent.body, RequestBody::Json(json!({"text": "same", "parentId": "c1"})));
    assert_eq!(fake.requests().len(), 1);
}

#[tokio::test]
async fn test_http_errors_keep_status_and_message() {
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    fake.reply(Method::GET, "/posts/gone", 404, json!({"success": false, "error": "Post not found"}))
        .reply_raw(Method::GET, "/posts/html", 200, "<html>maintenance</html>");
    let posts = PostService::new(client);

    assert!(matches!(
        posts.get_post("gone").await,
        Err(ApiError::Http { status: 404, ref message }) if message == "Post not found"
    ));
    assert!(matches!(posts.get_post("html").await, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn test_delete_accepts_empty_204() {
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    fake.reply_raw(Method::DELETE, "/posts/p1", 204, "");

    PostService::new(client)
        .delete_post("p1")
        .await
        .expect("204 should count as success");
}

#[tokio::test]
async fn test_user_search_and_path_escaping() {
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    fake.page(Method::GET, "/users/search", &PaginatedResponse::last(vec![user_json("u2", "bob")]))
        .ok(Method::GET, "/users/username/bob%20smith", user_json("u3", "bob smith"));
    let users = UserService::new(client);

    let found = users.search_users("bob", None).await.expect("Search should succeed");
    let exact = users
        .get_user_by_username("bob smith")
        .await
        .expect("Lookup should succeed");

    assert_eq!(found.data[0].username, "bob");
    assert_eq!(exact.id, "u3");
    assert_eq!(fake.requests_to(Method::GET, "/users/search")[0].query, query(&[("q", "bob")]));
}

#[tokio::test]
async fn test_trade_filter_and_watchlist_symbols() {
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    fake.page(Method::GET, "/investment/trades", &PaginatedResponse::<Value>::last(vec![]))
        .reply(Method::DELETE, "/investment/watchlist/BRK.B", 200, json!({"success": true}));

    TradeService::new(client.clone())
        .get_trades(Some("pf1"), Some(&PaginationParams::page(2)))
        .await
        .expect("Trades should load");
    WatchlistService::new(client)
        .remove_symbol(" brk.b ")
        .await
        .expect("Symbol should be removed");

    assert_eq!(
        fake.requests_to(Method::GET, "/investment/trades")[0].query,
        query(&[("portfolioId", "pf1"), ("page", "2")])
    );
    assert_eq!(fake.count(Method::DELETE, "/investment/watchlist/BRK.B"), 1);
}

#[tokio::test]
async fn test_multi_image_upload() {
    // Arrange
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    fake.ok(
        Method::POST,
        "/upload/images",
        json!({"urls": ["https://cdn.example/a.jpg", "https://cdn.example/b.jpg"]}),
    )
    .ok(Method::POST, "/upload/image", json!({"url": "https://cdn.example/c.jpg"}));
    let upload = UploadService::new(client);

    // Act
    let urls = upload
        .upload_images(vec![
            FileUpload::jpeg("a.jpg", vec![1, 2]),
            FileUpload::jpeg("b.jpg", vec![3]),
        ])
        .await
        .expect("Upload should succeed");
    let single = upload
        .upload_image_as("photo", FileUpload::jpeg("c.jpg", vec![4]))
        .await
        .expect("Upload should succeed");

    // Assert
    assert_eq!(urls.len(), 2);
    assert_eq!(single, "https://cdn.example/c.jpg");
    match &fake.requests_to(Method::POST, "/upload/images")[0].body {
        RequestBody::Multipart(parts) => {
            let fields: Vec<_> = parts.iter().map(|(field, file)| (field.as_str(), file.file_name.as_str())).collect();
            assert_eq!(fields, [("images", "a.jpg"), ("images", "b.jpg")]);
        }
        other => panic!("expected multipart body, got {other:?}"),
    }
    match &fake.requests_to(Method::POST, "/upload/image")[0].body {
        RequestBody::Multipart(parts) => assert_eq!(parts[0].0, "photo"),
        other => panic!("expected multipart body, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_upload_is_rejected_locally() {
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());

    let result = UploadService::new(client).upload_images(Vec::new()).await;

    assert!(matches!(result, Err(ApiError::Validation(_))));
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_services_share_one_session() {
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    fake.page(Method::GET, "/stories/feed", &PaginatedResponse::<Value>::last(vec![]))
        .page(Method::GET, "/investment/watchlist", &PaginatedResponse::<Value>::last(vec![]));
    let api = ApiServices::new(client);

    api.client.tokens().set_auth_token("shared").await.unwrap();
    api.stories.get_feed(None).await.expect("Stories should load");
    api.watchlist.get_watchlist(None).await.expect("Watchlist should load");

    assert!(fake.requests().iter().all(|r| r.authorization() == Some("Bearer shared")));
}

#[tokio::test]
async fn test_small_lists_are_paginated_too() {
    let fake = FakeTransport::new();
    let (client, _storage) = client_with(fake.clone());
    fake.page(Method::GET, "/users/suggestions", &PaginatedResponse::last(vec![user_json("u4", "dana")]))
        .page(
            Method::GET,
            "/investment/portfolios/pf1/holdings",
            &PaginatedResponse::<Value>::last(vec![]),
        );
    let api = ApiServices::new(client);
    let params = PaginationParams::page(2).with_limit(5);

    let suggested = api
        .users
        .get_suggestions(Some(&params))
        .await
        .expect("Suggestions should load");
    let holdings = api
        .portfolios
        .get_holdings("pf1", Some(&params))
        .await
        .expect("Holdings should load");

    assert_eq!(suggested.data[0].username, "dana");
    assert!(!suggested.has_more);
    assert!(holdings.data.is_empty());
    for path in ["/users/suggestions", "/investment/portfolios/pf1/holdings"] {
        assert_eq!(fake.requests_to(Method::GET, path)[0].query, query(&[("page", "2"), ("limit", "5")]));
    }
}
