//! Event moderation commands.

use std::io::Write;

use chrono::Utc;
use exhiibot_admin::actions::PendingAction;
use exhiibot_admin::api::EventFilter;
use exhiibot_admin::display::{format_datetime, truncate_text, yes_no};
use exhiibot_admin::listing::ListQuery;
use exhiibot_admin::resources::{EventList, EventSource};
use exhiibot_admin::{ApiClient, AppError};
use exhiibot_core::EventId;

use super::{load_list, run_action};
use crate::output::{footer, table};

pub async fn list<W: Write>(
    client: &ApiClient,
    out: &mut W,
    page: u32,
    limit: u32,
    filter: EventFilter,
) -> Result<(), AppError> {
    let events = EventList::with_query(EventSource::new(client.clone()), ListQuery {
        page,
        limit,
        filter,
    });
    let state = load_list(&events).await?;
    let now = Utc::now();

    let rows: Vec<Vec<String>> = state
        .items
        .iter()
        .map(|event| {
            vec![
                event.id.to_string(),
                truncate_text(&event.title, 30),
                event.kind.clone(),
                format_datetime(event.start_date),
                format_datetime(event.end_date),
                yes_no(event.is_running(now)).to_string(),
                event.location.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();

    table(
        out,
        &["ID", "Title", "Type", "Starts", "Ends", "Active", "Location"],
        &rows,
    )?;
    footer(out, rows.len(), &state.pagination)?;
    Ok(())
}

pub async fn delete<W: Write>(
    client: &ApiClient,
    out: &mut W,
    id: String,
    yes: bool,
) -> Result<(), AppError> {
    let action = PendingAction::DeleteEvent(EventId::new(id));
    run_action(client, out, action, yes, "Event deleted.").await
}
