//! Unpaginated single-value controller (dashboard, analytics).

use std::fmt::Debug;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::FetchOutcome;
use crate::api::ApiError;

/// Turns view parameters into one API call.
pub trait ViewSource: Send + Sync {
    type Data: Clone + Send + Sync;
    type Params: Clone + Debug + Default + Send + Sync;

    /// Resource name used in logs.
    const NAME: &'static str;

    fn fetch(&self, params: &Self::Params)
    -> impl Future<Output = Result<Self::Data, ApiError>> + Send;
}

/// Data and status of a view as last observed.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
        }
    }
}

struct Inner<S: ViewSource> {
    params: S::Params,
    state: ViewState<S::Data>,
}

/// Local mirror of one remote summary.
pub struct ResourceView<S: ViewSource> {
    source: S,
    inner: RwLock<Inner<S>>,
    latest: AtomicU64,
}

impl<S: ViewSource> ResourceView<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            inner: RwLock::new(Inner {
                params: S::Params::default(),
                state: ViewState::default(),
            }),
            latest: AtomicU64::new(0),
        }
    }

    /// Fetch with the current parameters.
    pub async fn load(&self) -> FetchOutcome {
        self.fetch(None).await
    }

    pub async fn refetch(&self) -> FetchOutcome {
        self.load().await
    }

    /// Replace the parameters and fetch.
    pub async fn set_params(&self, params: S::Params) -> FetchOutcome {
        self.fetch(Some(params)).await
    }

    pub async fn snapshot(&self) -> ViewState<S::Data> {
        self.inner.read().await.state.clone()
    }

    pub async fn params(&self) -> S::Params {
        self.inner.read().await.params.clone()
    }

    async fn fetch(&self, params: Option<S::Params>) -> FetchOutcome {
        let (ticket, params) = {
            let mut inner = self.inner.write().await;
            if let Some(params) = params {
                inner.params = params;
            }
            inner.state.is_loading = true;
            inner.state.error = None;
            let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            (ticket, inner.params.clone())
        };

        debug!(resource = S::NAME, ticket, params = ?params, "Fetching");
        let result = self.source.fetch(&params).await;

        let mut inner = self.inner.write().await;
        if self.latest.load(Ordering::SeqCst) != ticket {
            debug!(resource = S::NAME, ticket, "Dropping superseded response");
            return FetchOutcome::Superseded;
        }

        inner.state.is_loading = false;
        match result {
            Ok(data) => {
                inner.state.data = Some(data);
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

impl<S: ViewSource + Debug> Debug for ResourceView<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceView")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
