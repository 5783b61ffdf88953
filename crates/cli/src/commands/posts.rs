//! Post moderation commands.

use std::io::Write;

use exhiibot_admin::actions::PendingAction;
use exhiibot_admin::api::PostFilter;
use exhiibot_admin::display::{format_date, truncate_text, yes_no};
use exhiibot_admin::listing::ListQuery;
use exhiibot_admin::resources::{PostList, PostSource};
use exhiibot_admin::{ApiClient, AppError};
use exhiibot_core::PostId;

use super::{load_list, run_action};
use crate::output::{footer, table};

pub async fn list<W: Write>(
    client: &ApiClient,
    out: &mut W,
    page: u32,
    limit: u32,
    filter: PostFilter,
) -> Result<(), AppError> {
    let posts = PostList::with_query(PostSource::new(client.clone()), ListQuery {
        page,
        limit,
        filter,
    });
    let state = load_list(&posts).await?;

    let rows: Vec<Vec<String>> = state
        .items
        .iter()
        .map(|post| {
            vec![
                post.id.to_string(),
                post.user
                    .as_ref()
                    .map_or_else(|| "-".to_string(), |u| format!("@{}", u.user_name)),
                post.platform.clone(),
                yes_no(post.is_published).to_string(),
                post.engagement().to_string(),
                post.views.to_string(),
                post.tap_count.to_string(),
                truncate_text(&post.content, 40),
                format_date(post.created_at),
            ]
        })
        .collect();

    table(
        out,
        &["ID", "Author", "Platform", "Published", "Engagement", "Views", "Taps", "Content", "Created"],
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
    let action = PendingAction::DeletePost(PostId::new(id));
    run_action(client, out, action, yes, "Post deleted.").await
}
