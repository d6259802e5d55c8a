//! # Investment Endpoints
//!
//! ```text
//! investment/
//! ├── portfolios.rs - Portfolio CRUD and holdings
//! ├── trades.rs     - Recorded trades
//! ├── watchlist.rs  - Symbol watchlist
//! └── posts.rs      - Investment posts and likes
//! ```

pub mod portfolios;
pub mod posts;
pub mod trades;
pub mod watchlist;

pub use portfolios::PortfolioService;
pub use posts::InvestmentPostService;
pub use trades::TradeService;
pub use watchlist::WatchlistService;
