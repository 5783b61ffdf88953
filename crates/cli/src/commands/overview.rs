//! Dashboard, analytics and activity feed.

use std::io::Write;

use chrono::NaiveDate;
use exhiibot_admin::api::{ActivityFilter, CountBucket};
use exhiibot_admin::display::{format_date, format_datetime, truncate_text};
use exhiibot_admin::listing::{ListQuery, ViewState};
use exhiibot_admin::resources::{
    ActivityList, ActivitySource, AnalyticsSource, AnalyticsView, DashboardSource, DashboardView,
};
use exhiibot_admin::{ApiClient, AppError};

use super::load_list;
use crate::output::{field, footer, table};

/// Unwrap a loaded view, turning a recorded failure into an error.
fn view_data<T>(name: &str, state: ViewState<T>) -> Result<T, AppError> {
    match (state.data, state.error) {
        (_, Some(message)) => Err(AppError::Remote(message)),
        (Some(data), None) => Ok(data),
        (None, None) => Err(AppError::Internal(format!("{name} returned no data"))),
    }
}

pub async fn dashboard<W: Write>(client: &ApiClient, out: &mut W) -> Result<(), AppError> {
    let view = DashboardView::new(DashboardSource::new(client.clone()));
    view.load().await;
    let data = view_data("dashboard", view.snapshot().await)?;
    let stats = data.stats;

    field(out, "Users", stats.total_users)?;
    field(out, "  active", stats.active_users)?;
    field(out, "  inactive", stats.inactive_users)?;
    field(out, "Products", stats.total_products)?;
    field(out, "Posts", stats.total_posts)?;
    field(out, "Events", stats.total_events)?;

    writeln!(out)?;
    writeln!(out, "Recent users")?;
    let users: Vec<Vec<String>> = data
        .recent_users
        .iter()
        .map(|u| {
            vec![
                format!("@{}", u.user_name),
                u.email.clone(),
                format_date(u.created_at),
            ]
        })
        .collect();
    table(out, &["Handle", "Email", "Joined"], &users)?;

    writeln!(out)?;
    writeln!(out, "Recent activity")?;
    let activities: Vec<Vec<String>> = data
        .recent_activities
        .iter()
        .map(|a| {
            vec![
                a.kind.clone(),
                truncate_text(&a.description, 50),
                format_datetime(a.created_at),
            ]
        })
        .collect();
    table(out, &["Type", "Description", "When"], &activities)?;
    Ok(())
}

pub async fn analytics<W: Write>(
    client: &ApiClient,
    out: &mut W,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), AppError> {
    let view = AnalyticsView::new(AnalyticsSource::new(client.clone()));
    view.fetch_with_date_range(start, end).await;
    let data = view_data("analytics", view.snapshot().await)?;

    let totals = data.analytics.unwrap_or_default();
    field(out, "Profile views", totals.total_profile_views)?;
    field(out, "Link clicks", totals.total_link_clicks)?;
    field(out, "New followers", totals.total_new_followers)?;
    field(out, "Bracelet taps", totals.total_bracelet_taps)?;

    writeln!(out)?;
    writeln!(out, "User growth")?;
    let growth: Vec<Vec<String>> = data
        .user_growth
        .iter()
        .map(|p| vec![p.label(), p.count.to_string()])
        .collect();
    table(out, &["Month", "Sign-ups"], &growth)?;

    writeln!(out)?;
    writeln!(out, "Posts by platform")?;
    table(out, &["Platform", "Posts"], &bucket_rows(&data.posts_by_platform))?;

    writeln!(out)?;
    writeln!(out, "Events by type")?;
    table(out, &["Type", "Events"], &bucket_rows(&data.events_by_type))?;
    Ok(())
}

fn bucket_rows(buckets: &[CountBucket]) -> Vec<Vec<String>> {
    buckets
        .iter()
        .map(|b| vec![b.label().to_string(), b.count.to_string()])
        .collect()
}

pub async fn activities<W: Write>(
    client: &ApiClient,
    out: &mut W,
    page: u32,
    limit: u32,
    kind: Option<String>,
) -> Result<(), AppError> {
    let feed = ActivityList::with_query(ActivitySource::new(client.clone()), ListQuery {
        page,
        limit,
        filter: ActivityFilter { kind },
    });
    let state = load_list(&feed).await?;

    let rows: Vec<Vec<String>> = state
        .items
        .iter()
        .map(|a| {
            let actor = a
                .actor
                .as_ref()
                .map(|actor| actor.name.clone())
                .or_else(|| a.user.as_ref().map(|u| format!("@{}", u.user_name)))
                .unwrap_or_else(|| "-".to_string());
            vec![
                a.kind.clone(),
                actor,
                truncate_text(&a.description, 50),
                format_datetime(a.created_at),
            ]
        })
        .collect();

    table(out, &["Type", "Actor", "Description", "When"], &rows)?;
    footer(out, rows.len(), &state.pagination)?;
    Ok(())
}
