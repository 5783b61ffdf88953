//! Paginated list controller.

use std::fmt::Debug;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use exhiibot_core::Pagination;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::FetchOutcome;
use crate::api::{ApiError, Page};

/// Turns a list query into one API call.
pub trait ListSource: Send + Sync {
    type Item: Clone + Send + Sync;
    type Filter: Clone + Debug + Default + Send + Sync;

    /// Resource name used in logs.
    const NAME: &'static str;

    /// Fetch the page described by `query`.
    fn fetch_page(
        &self,
        query: &ListQuery<Self::Filter>,
    ) -> impl Future<Output = Result<Page<Self::Item>, ApiError>> + Send;
}

/// Page, page size and resource filter of a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<F> {
    pub page: u32,
    pub limit: u32,
    pub filter: F,
}

impl<F: Default> Default for ListQuery<F> {
    fn default() -> Self {
        Self {
            page: 1,
            limit: Pagination::DEFAULT_LIMIT,
            filter: F::default(),
        }
    }
}

/// Rows and status of a list as last observed.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
            is_loading: false,
            error: None,
        }
    }
}

struct Inner<S: ListSource> {
    query: ListQuery<S::Filter>,
    state: ListState<S::Item>,
}

/// Local mirror of one paginated resource.
pub struct ResourceList<S: ListSource> {
    source: S,
    inner: RwLock<Inner<S>>,
    latest: AtomicU64,
}

impl<S: ListSource> ResourceList<S> {
    /// Create a controller with the default query (page 1, 20 per page).
    ///
    /// Nothing is fetched until [`load`](Self::load) or a setter is called.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_query(source, ListQuery::default())
    }

    #[must_use]
    pub fn with_query(source: S, query: ListQuery<S::Filter>) -> Self {
        Self {
            source,
            inner: RwLock::new(Inner {
                query,
                state: ListState::default(),
            }),
            latest: AtomicU64::new(0),
        }
    }

    /// Fetch with the current query.
    pub async fn load(&self) -> FetchOutcome {
        self.fetch(|_| {}).await
    }

    /// Fetch again with the current query.
    pub async fn refetch(&self) -> FetchOutcome {
        self.load().await
    }

    /// Go to page `page`.
    pub async fn change_page(&self, page: u32) -> FetchOutcome {
        self.fetch(|query| query.page = page).await
    }

    /// Change the page size, keeping the current page.
    pub async fn set_limit(&self, limit: u32) -> FetchOutcome {
        self.fetch(|query| query.limit = limit).await
    }

    /// Replace the filter and return to page 1.
    pub async fn set_filter(&self, filter: S::Filter) -> FetchOutcome {
        self.update_filter(|current| *current = filter).await
    }

    /// Edit the filter in place and return to page 1.
    pub async fn update_filter(&self, edit: impl FnOnce(&mut S::Filter) + Send) -> FetchOutcome {
        self.fetch(|query| {
            edit(&mut query.filter);
            query.page = 1;
        })
        .await
    }

    /// Run a mutation and refetch when it succeeds.
    ///
    /// On failure the error message is recorded and the loaded rows stay.
    pub async fn mutate<T, Fut>(&self, op: Fut) -> bool
    where
        Fut: Future<Output = Result<T, ApiError>> + Send,
    {
        match op.await {
            Ok(_) => {
                self.refetch().await;
                true
            }
            Err(e) => {
                warn!(resource = S::NAME, error = %e, "Mutation failed");
                self.inner.write().await.state.error = Some(e.user_message());
                false
            }
        }
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> ListState<S::Item> {
        self.inner.read().await.state.clone()
    }

    /// Copy of the query the next refetch will use.
    pub async fn query(&self) -> ListQuery<S::Filter> {
        self.inner.read().await.query.clone()
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    async fn fetch(&self, update: impl FnOnce(&mut ListQuery<S::Filter>) + Send) -> FetchOutcome {
        let (ticket, query) = {
            let mut inner = self.inner.write().await;
            update(&mut inner.query);
            inner.state.is_loading = true;
            inner.state.error = None;
            let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            (ticket, inner.query.clone())
        };

        debug!(resource = S::NAME, ticket, page = query.page, limit = query.limit, filter = ?query.filter, "Fetching");
        let result = self.source.fetch_page(&query).await;

        let mut inner = self.inner.write().await;
        if self.latest.load(Ordering::SeqCst) != ticket {
            debug!(resource = S::NAME, ticket, "Dropping superseded response");
            return FetchOutcome::Superseded;
        }

        inner.state.is_loading = false;
        match result {
            Ok(page) => {
                inner.state.items = page.items;
                inner.state.pagination = page.pagination;
                FetchOutcome::Applied
            }
            Err(e) => {
                warn!(resource = S::NAME, error = %e, "Fetch failed");
                inner.state.error = Some(e.user_message());
                FetchOutcome::Failed
            }
        }
    }
}

impl<S: ListSource + Debug> Debug for ResourceList<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceList")
            .field("source", &self.source)
            .field("latest", &self.latest.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;

    /// Stub source that answers from a script and records every query.
    #[derive(Default)]
    struct Scripted {
        replies: Mutex<VecDeque<Result<Vec<&'static str>, u16>>>,
        seen: Mutex<Vec<ListQuery<Option<bool>>>>,
    }

    impl Scripted {
        fn replying(replies: impl IntoIterator<Item = Result<Vec<&'static str>, u16>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().collect()),
                seen: Mutex::default(),
            }
        }

        fn seen(&self) -> Vec<ListQuery<Option<bool>>> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl ListSource for Scripted {
        type Item = &'static str;
        type Filter = Option<bool>;
        const NAME: &'static str = "scripted";

        async fn fetch_page(
            &self,
            query: &ListQuery<Option<bool>>,
        ) -> Result<Page<&'static str>, ApiError> {
            self.seen.lock().unwrap().push(query.clone());
            let reply = self.replies.lock().unwrap().pop_front().unwrap_or(Ok(Vec::new()));
            match reply {
                Ok(items) => Ok(Page {
                    pagination: Pagination {
                        total: 42,
                        page: query.page,
                        limit: query.limit,
                        pages: 3,
                    },
                    items,
                }),
                Err(status) => Err(ApiError::Api {
                    status,
                    message: format!("boom {status}"),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_initial_state_before_fetch() {
        let list = ResourceList::new(Scripted::default());
        let state = list.snapshot().await;
        assert!(state.items.is_empty());
        assert_eq!(state.pagination, Pagination::default());
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert_eq!(list.query().await.limit, 20);
    }

    #[tokio::test]
    async fn test_change_page_uses_server_page() {
        let list = ResourceList::new(Scripted::replying([Ok(vec!["a"]), Ok(vec!["b"])]));

        assert_eq!(list.load().await, FetchOutcome::Applied);
        assert_eq!(list.change_page(3).await, FetchOutcome::Applied);

        let state = list.snapshot().await;
        assert_eq!(state.items, vec!["b"]);
        assert_eq!(state.pagination.page, 3);
        assert_eq!(list.source().seen().len(), 2);
        assert_eq!(list.source().seen()[1].page, 3);
    }

    #[tokio::test]
    async fn test_failure_keeps_stale_items() {
        let list = ResourceList::new(Scripted::replying([Ok(vec!["a", "b"]), Err(500)]));

        list.load().await;
        assert_eq!(list.change_page(2).await, FetchOutcome::Failed);

        let state = list.snapshot().await;
        assert_eq!(state.items, vec!["a", "b"]);
        assert_eq!(state.error.as_deref(), Some("boom 500"));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_new_fetch_clears_error() {
        let list = ResourceList::new(Scripted::replying([Err(502), Ok(vec!["x"])]));

        list.load().await;
        assert!(list.snapshot().await.error.is_some());

        list.refetch().await;
        let state = list.snapshot().await;
        assert!(state.error.is_none());
        assert_eq!(state.items, vec!["x"]);
    }

    #[tokio::test]
    async fn test_set_filter_resets_page() {
        let list = ResourceList::new(Scripted::default());

        list.change_page(4).await;
        list.set_filter(Some(true)).await;

        let seen = list.source().seen();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].page, 1);
        assert_eq!(seen[1].filter, Some(true));
    }

    #[tokio::test]
    async fn test_set_limit_keeps_page() {
        let list = ResourceList::new(Scripted::default());

        list.change_page(2).await;
        list.set_limit(50).await;

        let query = list.query().await;
        assert_eq!((query.page, query.limit), (2, 50));
    }

    #[tokio::test]
    async fn test_mutate_refetches_on_success() {
        let list = ResourceList::new(Scripted::replying([Ok(vec!["a", "b"]), Ok(vec!["b"])]));
        list.load().await;

        assert!(list.mutate(async { Ok::<_, ApiError>(()) }).await);
        assert_eq!(list.snapshot().await.items, vec!["b"]);
        assert_eq!(list.source().seen().len(), 2);
    }

    #[tokio::test]
    async fn test_mutate_failure_records_error() {
        let list = ResourceList::new(Scripted::replying([Ok(vec!["a"])]));
        list.load().await;

        let failed = list
            .mutate(async {
                Err::<(), _>(ApiError::NotFound("Post not found".to_string()))
            })
            .await;

        assert!(!failed);
        let state = list.snapshot().await;
        assert_eq!(state.error.as_deref(), Some("Post not found"));
        assert_eq!(state.items, vec!["a"]);
        assert_eq!(list.source().seen().len(), 1);
    }

    /// Source whose first page answers slowly.
    struct SlowFirstPage;

    impl ListSource for SlowFirstPage {
        type Item = u32;
        type Filter = ();
        const NAME: &'static str = "slow";

        async fn fetch_page(&self, query: &ListQuery<()>) -> Result<Page<u32>, ApiError> {
            if query.page == 1 {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            Ok(Page {
                items: vec![query.page],
                pagination: Pagination {
                    total: 2,
                    page: query.page,
                    limit: 1,
                    pages: 2,
                },
            })
        }
    }

    #[tokio::test]
    async fn test_superseded_response_is_dropped() {
        let list = ResourceList::new(SlowFirstPage);

        let (first, second) = tokio::join!(list.change_page(1), list.change_page(2));

        assert_eq!(first, FetchOutcome::Superseded);
        assert_eq!(second, FetchOutcome::Applied);
        let state = list.snapshot().await;
        assert_eq!(state.items, vec![2]);
        assert_eq!(state.pagination.page, 2);
        assert!(!state.is_loading);
    }
}
