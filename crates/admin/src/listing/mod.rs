//! Controllers that keep a local copy of a remote list or view.
//!
//! A controller owns the current query and the last applied response. Every
//! parameter change issues exactly one request. Each request is tagged with
//! a monotonically increasing ticket, and a response is applied only while
//! its ticket is still the latest one issued, so a slow earlier request can
//! never overwrite the result of a later one.
//!
//! Failures keep previously loaded data and record the error message.

mod list;
mod view;

pub use list::{ListQuery, ListSource, ListState, ResourceList};
pub use view::{ResourceView, ViewSource, ViewState};

/// What happened to a fetch once its response arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the controller's data.
    Applied,
    /// The request failed; the error message was recorded.
    Failed,
    /// A newer request was issued first; the response was dropped.
    Superseded,
}

impl FetchOutcome {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}
