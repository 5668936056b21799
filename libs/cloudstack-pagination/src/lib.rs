// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Generic page draining for list commands
//!
//! CloudStack list commands return a `count` (the total number of matching
//! items) next to one page of items. The server picks the page size for the
//! first request on its own, so the client only learns it after the first
//! round trip. [`collect_all`] drives the remaining requests:
//!
//! 1. Issue the first request unchanged.
//! 2. If the first page already holds `count` items, stop.
//! 3. Otherwise reissue with `pagesize` = first page length and
//!    `page` = 2, 3, ... until `count` items have been accumulated.
//!
//! The loop is transport-agnostic: the caller supplies a closure that turns
//! an optional [`PageRequest`] into a [`Page`].

use std::future::Future;

/// First page number requested explicitly; page 1 is the initial request.
pub const FIRST_FOLLOW_UP_PAGE: u32 = 2;

/// Page coordinates for a follow-up request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    /// Items per page
    pub page_size: usize,
}

/// One decoded page of a list response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Total number of items the server reports for the whole listing
    pub count: usize,
    /// Items on this page
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(count: usize, items: Vec<T>) -> Self {
        Self { count, items }
    }
}

/// Iteration state for one listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    page: u32,
    page_size: usize,
    total: usize,
    accumulated: usize,
}

impl PageCursor {
    /// Start a cursor from the first page's reported total and length
    pub fn after_first_page(total: usize, first_page_len: usize) -> Self {
        Self {
            page: FIRST_FOLLOW_UP_PAGE,
            page_size: first_page_len,
            total,
            accumulated: first_page_len,
        }
    }

    /// True once the accumulated count has reached the reported total
    pub fn is_complete(&self) -> bool {
        self.accumulated >= self.total
    }

    /// Coordinates for the next request, or `None` when done
    ///
    /// A zero page size means the server handed out an empty first page
    /// while still reporting items; there is nothing sensible to ask for.
    pub fn next_request(&self) -> Option<PageRequest> {
        if self.is_complete() || self.page_size == 0 {
            return None;
        }
        Some(PageRequest {
            page: self.page,
            page_size: self.page_size,
        })
    }

    /// Record a received follow-up page
    pub fn advance(&mut self, received: usize) {
        self.accumulated += received;
        self.page += 1;
    }

    pub fn accumulated(&self) -> usize {
        self.accumulated
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

/// Drain a paginated listing into a single `Vec`
///
/// `fetch(None)` must issue the request exactly as the caller built it;
/// `fetch(Some(req))` must issue the same request with `page` and
/// `pagesize` overridden. Any error aborts the loop and the items
/// gathered so far are dropped.
pub async fn collect_all<T, E, F, Fut>(mut fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(Option<PageRequest>) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let first = fetch(None).await?;
    let mut cursor = PageCursor::after_first_page(first.count, first.items.len());
    let mut items = first.items;

    while let Some(request) = cursor.next_request() {
        tracing::debug!(
            page = request.page,
            page_size = request.page_size,
            accumulated = cursor.accumulated(),
            total = cursor.total(),
            "fetching next page"
        );

        let page = fetch(Some(request)).await?;
        if page.items.is_empty() {
            tracing::warn!(
                page = request.page,
                accumulated = cursor.accumulated(),
                total = cursor.total(),
                "server returned an empty page before reaching the reported count"
            );
            break;
        }

        cursor.advance(page.items.len());
        items.extend(page.items);
    }

    Ok(items)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::convert::Infallible;

    /// Simulated list endpoint: `data` split server-side into pages of at
    /// most `server_page_size` items unless the request asks for a size.
    struct FakeListing {
        data: Vec<u32>,
        server_page_size: usize,
        calls: RefCell<Vec<Option<PageRequest>>>,
    }

    impl FakeListing {
        fn new(total: u32, server_page_size: usize) -> Self {
            Self {
                data: (0..total).collect(),
                server_page_size,
                calls: RefCell::new(Vec::new()),
            }
        }

        async fn fetch(&self, req: Option<PageRequest>) -> Result<Page<u32>, Infallible> {
            self.calls.borrow_mut().push(req);
            let (page, size) = match req {
                None => (1, self.server_page_size),
                Some(r) => (r.page as usize, r.page_size),
            };
            let start = ((page - 1) * size).min(self.data.len());
            let end = (start + size).min(self.data.len());
            Ok(Page::new(self.data.len(), self.data[start..end].to_vec()))
        }
    }

    #[tokio::test]
    async fn test_collects_every_item_once() {
        let listing = FakeListing::new(10, 3);
        let items = collect_all(|req| listing.fetch(req)).await.unwrap();

        assert_eq!(items, (0..10).collect::<Vec<_>>());
        // 3 + 3 + 3 + 1
        assert_eq!(listing.calls.borrow().len(), 4);
    }

    #[tokio::test]
    async fn test_follow_up_requests_use_first_page_size() {
        let listing = FakeListing::new(7, 2);
        collect_all(|req| listing.fetch(req)).await.unwrap();

        let calls = listing.calls.borrow();
        assert_eq!(calls[0], None);
        assert_eq!(calls[1], Some(PageRequest { page: 2, page_size: 2 }));
        assert_eq!(calls[2], Some(PageRequest { page: 3, page_size: 2 }));
        assert_eq!(calls[3], Some(PageRequest { page: 4, page_size: 2 }));
        assert_eq!(calls.len(), 4);
    }

    #[tokio::test]
    async fn test_single_round_trip_when_complete() {
        let listing = FakeListing::new(5, 500);
        let items = collect_all(|req| listing.fetch(req)).await.unwrap();

        assert_eq!(items.len(), 5);
        assert_eq!(listing.calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_listing() {
        let listing = FakeListing::new(0, 500);
        let items = collect_all(|req| listing.fetch(req)).await.unwrap();

        assert!(items.is_empty());
        assert_eq!(listing.calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_error_discards_partial_results() {
        let mut calls = 0;
        let result: Result<Vec<u32>, &str> = collect_all(|_req| {
            calls += 1;
            let n = calls;
            async move {
                if n == 1 {
                    Ok(Page::new(4, vec![1, 2]))
                } else {
                    Err("connection reset")
                }
            }
        })
        .await;

        assert_eq!(result, Err("connection reset"));
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn test_stops_on_empty_follow_up_page() {
        let mut calls = 0;
        let result: Result<Vec<u32>, Infallible> = collect_all(|req| {
            calls += 1;
            async move {
                match req {
                    None => Ok(Page::new(10, vec![1, 2])),
                    Some(_) => Ok(Page::new(10, vec![])),
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), vec![1, 2]);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_cursor_zero_page_size_is_complete() {
        let cursor = PageCursor::after_first_page(3, 0);
        assert!(!cursor.is_complete());
        assert_eq!(cursor.next_request(), None);
    }

    #[test]
    fn test_cursor_advances() {
        let mut cursor = PageCursor::after_first_page(5, 2);
        assert_eq!(
            cursor.next_request(),
            Some(PageRequest { page: 2, page_size: 2 })
        );
        cursor.advance(2);
        assert_eq!(
            cursor.next_request(),
            Some(PageRequest { page: 3, page_size: 2 })
        );
        cursor.advance(1);
        assert!(cursor.is_complete());
        assert_eq!(cursor.next_request(), None);
    }
}
