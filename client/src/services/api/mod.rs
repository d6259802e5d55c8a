//! # Backend API Client Module
//!
//! Typed access to the social API. Every resource service wraps one shared
//! [`ApiClient`], which owns the transport, the token store and the
//! refresh-and-retry logic.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs           - Module exports, ApiServices bundle
//! ├── client.rs        - ApiClient: bearer auth, 401 refresh, envelope unwrap
//! ├── transport.rs     - HttpRequest/HttpResponse, reqwest transport
//! ├── auth.rs          - Login, register, logout, refresh, current user
//! ├── users.rs         - Profiles, search, follow graph
//! ├── posts.rs         - Feed, explore, post CRUD, likes
//! ├── comments.rs      - Comments, replies, comment likes
//! ├── stories.rs       - Story tray, views
//! ├── reels.rs         - Reels feed, likes, views
//! ├── messages.rs      - Conversations and direct messages
//! ├── notifications.rs - Notification list, unread count, read state
//! ├── bookmarks.rs     - Saved posts
//! ├── upload.rs        - Multipart image upload
//! └── investment/      - Portfolios, trades, watchlist, investment posts
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let tokens = Arc::new(TokenStore::new(Arc::new(FileStore::new(&config.storage_path))));
//! tokens.restore().await?;
//! let api = ApiServices::new(Arc::new(ApiClient::from_config(&config, tokens)?));
//!
//! let feed = api.posts.get_feed(Some(&PaginationParams::page(1))).await?;
//! ```

use std::borrow::Cow;
use std::sync::Arc;

pub mod auth;
pub mod bookmarks;
pub mod client;
pub mod comments;
pub mod investment;
pub mod messages;
pub mod notifications;
pub mod posts;
pub mod reels;
pub mod stories;
pub mod transport;
pub mod upload;
pub mod users;

pub use auth::AuthService;
pub use bookmarks::BookmarkService;
pub use client::ApiClient;
pub use comments::CommentService;
pub use investment::{InvestmentPostService, PortfolioService, TradeService, WatchlistService};
pub use messages::MessageService;
pub use notifications::NotificationService;
pub use posts::PostService;
pub use reels::ReelService;
pub use stories::StoryService;
pub use transport::{FileUpload, HttpRequest, HttpResponse, ReqwestTransport, RequestBody};
pub use upload::UploadService;
pub use users::UserService;

/// Percent-encode one path segment (ids, usernames, ticker symbols).
pub(crate) fn segment(raw: &str) -> Cow<'_, str> {
    urlencoding::encode(raw)
}

/// Every resource service over one shared client.
#[derive(Clone)]
pub struct ApiServices {
    pub client: Arc<ApiClient>,
    pub auth: AuthService,
    pub users: UserService,
    pub posts: PostService,
    pub comments: CommentService,
    pub stories: StoryService,
    pub reels: ReelService,
    pub messages: MessageService,
    pub notifications: NotificationService,
    pub bookmarks: BookmarkService,
    pub portfolios: PortfolioService,
    pub trades: TradeService,
    pub watchlist: WatchlistService,
    pub investment_posts: InvestmentPostService,
    pub upload: UploadService,
}

impl ApiServices {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            auth: AuthService::new(client.clone()),
            users: UserService::new(client.clone()),
            posts: PostService::new(client.clone()),
            comments: CommentService::new(client.clone()),
            stories: StoryService::new(client.clone()),
            reels: ReelService::new(client.clone()),
            messages: MessageService::new(client.clone()),
            notifications: NotificationService::new(client.clone()),
            bookmarks: BookmarkService::new(client.clone()),
            portfolios: PortfolioService::new(client.clone()),
            trades: TradeService::new(client.clone()),
            watchlist: WatchlistService::new(client.clone()),
            investment_posts: InvestmentPostService::new(client.clone()),
            upload: UploadService::new(client.clone()),
            client,
        }
    }
}
