//! Command implementations. Each writes its result to `out`.

pub mod auth;
pub mod events;
pub mod orders;
pub mod overview;
pub mod posts;
pub mod products;
pub mod referrals;
pub mod users;

use std::io::{BufRead, Write};

use exhiibot_admin::AppError;
use exhiibot_admin::actions::{ConfirmedAction, PendingAction};
use exhiibot_admin::listing::{ListSource, ListState, ResourceList};
use exhiibot_admin::{ApiClient, api::MessageResponse};

/// Fetch a list once and turn a recorded failure into an error.
async fn load_list<S: ListSource>(list: &ResourceList<S>) -> Result<ListState<S::Item>, AppError> {
    list.load().await;
    let state = list.snapshot().await;
    match state.error {
        Some(message) => Err(AppError::Remote(message)),
        None => Ok(state),
    }
}

/// Ask on stderr whether to go ahead with `action`, unless `assume_yes`.
fn confirm(action: PendingAction, assume_yes: bool) -> Result<ConfirmedAction, AppError> {
    if assume_yes {
        return Ok(action.confirm());
    }

    let mut stderr = std::io::stderr().lock();
    write!(stderr, "{} [y/N] ", action.describe())?;
    stderr.flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    if is_affirmative(&answer) {
        Ok(action.confirm())
    } else {
        tracing::info!(action = %action, "Declined");
        Err(AppError::Cancelled)
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Confirm, execute and report a destructive action.
async fn run_action<W: Write>(
    client: &ApiClient,
    out: &mut W,
    action: PendingAction,
    assume_yes: bool,
    done: &str,
) -> Result<(), AppError> {
    let confirmed = confirm(action, assume_yes)?;
    let MessageResponse { message, .. } = confirmed.execute(client).await?;
    if message.is_empty() {
        writeln!(out, "{done}")?;
    } else {
        writeln!(out, "{message}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("yep"));
    }
}
