//! Referral application review commands.

use std::io::Write;

use exhiibot_admin::actions::PendingAction;
use exhiibot_admin::api::{ApplicationFilter, ReviewApplication, ReviewDecision};
use exhiibot_admin::display::format_date;
use exhiibot_admin::error::ValidationError;
use exhiibot_admin::listing::ListQuery;
use exhiibot_admin::resources::{ApplicationList, ApplicationSource};
use exhiibot_admin::{ApiClient, AppError};
use exhiibot_core::{ApplicationId, ApplicationStatus};

use super::{load_list, run_action};
use crate::output::{footer, table};

pub async fn list<W: Write>(
    client: &ApiClient,
    out: &mut W,
    status: Option<ApplicationStatus>,
) -> Result<(), AppError> {
    let applications = ApplicationList::with_query(
        ApplicationSource::new(client.clone()),
        ListQuery {
            filter: ApplicationFilter { status },
            ..ListQuery::default()
        },
    );
    let state = load_list(&applications).await?;

    let rows: Vec<Vec<String>> = state
        .items
        .iter()
        .map(|app| {
            vec![
                app.id.to_string(),
                app.full_name.clone(),
                app.platform.clone(),
                app.social_media_handle.clone(),
                app.status.to_string(),
                app.awarded_code().unwrap_or("-").to_string(),
                app.awarded_discount()
                    .map_or_else(|| "-".to_string(), |d| format!("{d}%")),
                app.created_at.map_or_else(|| "-".to_string(), format_date),
            ]
        })
        .collect();

    table(
        out,
        &["ID", "Name", "Platform", "Handle", "Status", "Code", "Discount", "Submitted"],
        &rows,
    )?;
    footer(out, rows.len(), &state.pagination)?;
    Ok(())
}

pub async fn review<W: Write>(
    client: &ApiClient,
    out: &mut W,
    id: &str,
    decision: ReviewDecision,
    notes: Option<String>,
    discount: Option<f64>,
) -> Result<(), AppError> {
    if let Some(discount) = discount
        && !(0.0..=100.0).contains(&discount)
    {
        return Err(ValidationError::Other(format!(
            "discount must be between 0 and 100, got {discount}"
        ))
        .into());
    }

    let review = ReviewApplication {
        status: decision,
        admin_notes: notes.filter(|n| !n.trim().is_empty()),
        discount_percentage: discount,
    };
    let updated = client
        .review_application(&ApplicationId::new(id), &review)
        .await?;

    writeln!(out, "Application {id} {}.", decision.as_str())?;
    if let Some(code) = updated.as_ref().and_then(|app| app.awarded_code()) {
        writeln!(out, "Referral code: {code}")?;
    }
    Ok(())
}

pub async fn revoke<W: Write>(
    client: &ApiClient,
    out: &mut W,
    id: String,
    yes: bool,
) -> Result<(), AppError> {
    let action = PendingAction::RevokeApplication(ApplicationId::new(id));
    run_action(client, out, action, yes, "Application revoked.").await
}
