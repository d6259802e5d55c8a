//! # Pager
//!
//! Drives any list method page by page, the way an infinite-scroll view does:
//! start at page 1, forward `nextCursor`, stop after the first page that
//! reports `hasMore: false`.
//!
//! ```rust,ignore
//! let posts = api.posts.clone();
//! let mut pager = Pager::new(move |params| {
//!     let posts = posts.clone();
//!     async move { posts.get_feed(Some(&params)).await }
//! });
//! while let Some(batch) = pager.next_page().await? {
//!     render(batch);
//! }
//! ```

use std::future::Future;
use std::marker::PhantomData;

use shared::{PaginatedResponse, PaginationParams};

use crate::core::Result;

pub struct Pager<T, F> {
    fetch: F,
    params: PaginationParams,
    done: bool,
    _item: PhantomData<fn() -> T>,
}

impl<T, F, Fut> Pager<T, F>
where
    F: FnMut(PaginationParams) -> Fut,
    Fut: Future<Output = Result<PaginatedResponse<T>>>,
{
    pub fn new(fetch: F) -> Self {
        Self::with_params(PaginationParams::page(1), fetch)
    }

    /// Start from `params` (e.g. a custom `limit`).
    pub fn with_params(params: PaginationParams, fetch: F) -> Self {
        Self {
            fetch,
            params,
            done: false,
            _item: PhantomData,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Parameters the next call will send.
    pub fn params(&self) -> &PaginationParams {
        &self.params
    }

    /// Fetch the next page. `Ok(None)` once the collection is exhausted.
    ///
    /// A failed fetch leaves the position unchanged, so calling again retries
    /// the same page.
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>> {
        if self.done {
            return Ok(None);
        }
        let page = (self.fetch)(self.params.clone()).await?;
        if page.has_more {
            self.params.page = Some(self.params.page.unwrap_or(1).saturating_add(1));
            self.params.cursor = page.next_cursor;
        } else {
            self.done = true;
        }
        Ok(Some(page.data))
    }

    /// Concatenate pages until the end or `max_pages` pages, whichever comes first.
    pub async fn collect_all(mut self, max_pages: usize) -> Result<Vec<T>> {
        let mut items = Vec::new();
        for _ in 0..max_pages {
            match self.next_page().await? {
                Some(batch) => items.extend(batch),
                None => break,
            }
        }
        Ok(items)
    }
}
