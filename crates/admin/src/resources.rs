//! List and view sources for each admin resource.
//!
//! A source binds a controller to one client method. The type aliases
//! ([`UserList`], [`PostList`], ...) are what callers normally construct.

use chrono::NaiveDate;
use exhiibot_core::ApplicationStatus;

use crate::api::{
    Activity, ActivityFilter, ApiClient, ApiError, ApplicationFilter, CartOrder, DashboardData,
    DateRange, Event, EventFilter, Page, PlatformAnalytics, Post, PostFilter, Product,
    ProductFilter, ReferralApplication, User, UserFilter,
};
use crate::listing::{FetchOutcome, ListQuery, ListSource, ResourceList, ResourceView, ViewSource};

/// Declare a list source that forwards the query to one client method.
macro_rules! list_source {
    (
        $(#[$meta:meta])*
        $source:ident, $alias:ident, $name:literal, $item:ty, $filter:ty,
        |$client:ident, $query:ident| $call:expr
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $source {
            client: ApiClient,
        }

        impl $source {
            #[must_use]
            pub const fn new(client: ApiClient) -> Self {
                Self { client }
            }
        }

        impl ListSource for $source {
            type Item = $item;
            type Filter = $filter;
            const NAME: &'static str = $name;

            async fn fetch_page(
                &self,
                $query: &ListQuery<$filter>,
            ) -> Result<Page<$item>, ApiError> {
                let $client = &self.client;
                $call.await
            }
        }

        pub type $alias = ResourceList<$source>;
    };
}

list_source!(
    /// Platform users.
    UserSource, UserList, "users", User, UserFilter,
    |client, query| client.list_users(query.page, query.limit, &query.filter)
);

list_source!(
    /// Placed orders. No filters.
    OrderSource, OrderList, "orders", CartOrder, (),
    |client, query| client.list_carts(query.page, query.limit)
);

list_source!(
    /// Shared posts.
    PostSource, PostList, "posts", Post, PostFilter,
    |client, query| client.list_posts(query.page, query.limit, &query.filter)
);

list_source!(
    /// Promoted events.
    EventSource, EventList, "events", Event, EventFilter,
    |client, query| client.list_events(query.page, query.limit, &query.filter)
);

list_source!(
    /// Activity feed.
    ActivitySource, ActivityList, "activities", Activity, ActivityFilter,
    |client, query| client.list_activities(query.page, query.limit, &query.filter)
);

list_source!(
    /// Product catalogue.
    ProductSource, ProductList, "products", Product, ProductFilter,
    |client, query| client.list_products(query.page, query.limit, &query.filter)
);

list_source!(
    /// Referral applications. The endpoint ignores paging.
    ApplicationSource, ApplicationList, "referral applications", ReferralApplication, ApplicationFilter,
    |client, query| client.list_applications(query.filter.status)
);

// =============================================================================
// Resource-specific setters
// =============================================================================

impl UserList {
    /// Search by name, handle or email. An empty term clears the search.
    pub async fn search_users(&self, term: impl Into<String> + Send) -> FetchOutcome {
        let term = term.into();
        let term = (!term.trim().is_empty()).then_some(term);
        self.update_filter(|filter| filter.search = term).await
    }

    /// Restrict by active and profile-completed flags. `None` means either.
    pub async fn filter_users(
        &self,
        is_active: Option<bool>,
        is_completed: Option<bool>,
    ) -> FetchOutcome {
        self.update_filter(|filter| {
            filter.is_active = is_active;
            filter.is_completed = is_completed;
        })
        .await
    }
}

impl PostList {
    pub async fn filter_posts(
        &self,
        platform: Option<String>,
        is_published: Option<bool>,
    ) -> FetchOutcome {
        self.set_filter(PostFilter {
            platform,
            is_published,
        })
        .await
    }
}

impl EventList {
    pub async fn filter_events(&self, kind: Option<String>, is_active: Option<bool>) -> FetchOutcome {
        self.set_filter(EventFilter { kind, is_active }).await
    }
}

impl ActivityList {
    pub async fn filter_activities(&self, kind: Option<String>) -> FetchOutcome {
        self.set_filter(ActivityFilter { kind }).await
    }
}

impl ApplicationList {
    pub async fn filter_applications(&self, status: Option<ApplicationStatus>) -> FetchOutcome {
        self.set_filter(ApplicationFilter { status }).await
    }
}

impl ProductList {
    pub async fn search_products(&self, term: impl Into<String> + Send) -> FetchOutcome {
        let term = term.into();
        let search = (!term.trim().is_empty()).then_some(term);
        self.set_filter(ProductFilter { search }).await
    }
}

// =============================================================================
// Views
// =============================================================================

/// Dashboard counters and recent activity.
#[derive(Debug, Clone)]
pub struct DashboardSource {
    client: ApiClient,
}

impl DashboardSource {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl ViewSource for DashboardSource {
    type Data = DashboardData;
    type Params = ();
    const NAME: &'static str = "dashboard";

    async fn fetch(&self, _params: &()) -> Result<DashboardData, ApiError> {
        self.client.get_dashboard().await
    }
}

pub type DashboardView = ResourceView<DashboardSource>;

/// Platform analytics for a date range.
#[derive(Debug, Clone)]
pub struct AnalyticsSource {
    client: ApiClient,
}

impl AnalyticsSource {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl ViewSource for AnalyticsSource {
    type Data = PlatformAnalytics;
    type Params = DateRange;
    const NAME: &'static str = "analytics";

    async fn fetch(&self, range: &DateRange) -> Result<PlatformAnalytics, ApiError> {
        self.client.get_analytics(range).await
    }
}

pub type AnalyticsView = ResourceView<AnalyticsSource>;

impl AnalyticsView {
    /// Narrow the analytics to `start..=end`. Either bound may be open.
    pub async fn fetch_with_date_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> FetchOutcome {
        self.set_params(DateRange::new(start, end)).await
    }
}
