//! User management commands.

use std::io::Write;

use exhiibot_admin::actions::PendingAction;
use exhiibot_admin::api::{UpdateUser, User, UserFilter};
use exhiibot_admin::display::{follow_counts, format_date, truncate_text, yes_no};
use exhiibot_admin::error::ValidationError;
use exhiibot_admin::listing::ListQuery;
use exhiibot_admin::resources::{UserList, UserSource};
use exhiibot_admin::{ApiClient, AppError};
use exhiibot_core::{Email, UserId};

use super::{load_list, run_action};
use crate::output::{field, footer, table};

pub async fn list<W: Write>(
    client: &ApiClient,
    out: &mut W,
    page: u32,
    limit: u32,
    filter: UserFilter,
) -> Result<(), AppError> {
    let users = UserList::with_query(UserSource::new(client.clone()), ListQuery {
        page,
        limit,
        filter,
    });
    let state = load_list(&users).await?;

    let rows: Vec<Vec<String>> = state
        .items
        .iter()
        .map(|user| {
            vec![
                user.id.to_string(),
                format!("@{}", user.user_name),
                user.email.clone(),
                yes_no(user.is_active).to_string(),
                yes_no(user.is_completed).to_string(),
                user.follower_count().to_string(),
                format_date(user.created_at),
            ]
        })
        .collect();

    table(
        out,
        &["ID", "Handle", "Email", "Active", "Complete", "Followers", "Joined"],
        &rows,
    )?;
    footer(out, rows.len(), &state.pagination)?;
    Ok(())
}

pub async fn show<W: Write>(client: &ApiClient, out: &mut W, id: &str) -> Result<(), AppError> {
    let user = client.get_user(&UserId::new(id)).await?;
    write_user(out, &user)?;
    Ok(())
}

/// Build an update from CLI flags, rejecting an empty one.
pub fn build_update(
    name: Option<String>,
    email: Option<String>,
    bio: Option<String>,
    is_active: Option<bool>,
    is_completed: Option<bool>,
) -> Result<UpdateUser, AppError> {
    let email = email
        .map(|e| Email::parse(&e).map(Email::into_inner))
        .transpose()?;

    let update = UpdateUser {
        name,
        email,
        bio,
        is_active,
        is_completed,
    };
    if update.is_empty() {
        return Err(ValidationError::Other("nothing to update; pass at least one field".to_string()).into());
    }
    Ok(update)
}

pub async fn update<W: Write>(
    client: &ApiClient,
    out: &mut W,
    id: &str,
    update: &UpdateUser,
) -> Result<(), AppError> {
    let user = client.update_user(&UserId::new(id), update).await?;
    writeln!(out, "Updated user {}.", user.id)?;
    write_user(out, &user)?;
    Ok(())
}

pub async fn toggle<W: Write>(client: &ApiClient, out: &mut W, id: &str) -> Result<(), AppError> {
    let user = client.toggle_user_status(&UserId::new(id)).await?;
    let state = if user.is_active { "active" } else { "inactive" };
    writeln!(out, "User @{} is now {state}.", user.user_name)?;
    Ok(())
}

pub async fn delete<W: Write>(
    client: &ApiClient,
    out: &mut W,
    id: String,
    yes: bool,
) -> Result<(), AppError> {
    let action = PendingAction::DeleteUser(UserId::new(id));
    run_action(client, out, action, yes, "User deleted.").await
}

fn write_user<W: Write>(out: &mut W, user: &User) -> std::io::Result<()> {
    field(out, "Name", user.display_name())?;
    field(out, "Handle", format!("@{}", user.user_name))?;
    field(out, "Email", &user.email)?;
    field(out, "User ID", &user.id)?;
    field(out, "Role", &user.role)?;
    field(out, "Active", yes_no(user.is_active))?;
    field(out, "Complete", yes_no(user.is_completed))?;
    field(out, "Network", follow_counts(user))?;
    field(out, "Joined", format_date(user.created_at))?;
    if let Some(address) = user.address.as_deref().filter(|a| !a.is_empty()) {
        field(out, "Address", address)?;
    }
    field(out, "Bio", truncate_text(user.bio.as_deref().unwrap_or_default(), 120))?;
    if !user.tags.is_empty() {
        field(out, "Tags", user.tags.join(", "))?;
    }
    if let Some(links) = &user.social_links {
        for (network, link) in links.iter() {
            field(out, network, link)?;
        }
    }
    Ok(())
}
