//! Login, logout and identity commands.

use std::io::Write;

use exhiibot_admin::{AppError, AuthSession};
use exhiibot_core::{Email, OtpCode};

use crate::output::field;

pub async fn login<W: Write>(session: &AuthSession, out: &mut W, email: &str) -> Result<(), AppError> {
    let email = Email::parse(email)?;
    let response = session.login(&email).await?;

    if response.message.is_empty() {
        writeln!(out, "Login code sent to {email}.")?;
    } else {
        writeln!(out, "{}", response.message)?;
    }
    writeln!(out, "Finish with: exhiibot verify {email} <code>")?;
    Ok(())
}

pub async fn verify<W: Write>(
    session: &AuthSession,
    out: &mut W,
    email: &str,
    otp: &str,
) -> Result<(), AppError> {
    let email = Email::parse(email)?;
    let otp = OtpCode::parse(otp)?;
    let response = session.verify_otp(&email, &otp).await?;

    writeln!(out, "Logged in as {} <{}>", response.user.display_name(), response.user.email)?;
    if !response.profile_completed {
        writeln!(out, "Note: this account's profile is not complete.")?;
    }
    Ok(())
}

pub async fn resend<W: Write>(session: &AuthSession, out: &mut W, email: &str) -> Result<(), AppError> {
    let email = Email::parse(email)?;
    let response = session.resend_otp(&email).await?;

    if response.message.is_empty() {
        writeln!(out, "New code sent to {email}.")?;
    } else {
        writeln!(out, "{}", response.message)?;
    }
    Ok(())
}

pub async fn check_email<W: Write>(
    session: &AuthSession,
    out: &mut W,
    email: &str,
) -> Result<(), AppError> {
    let email = Email::parse(email)?;
    let response = session.check_email(&email).await?;

    if response.exists {
        writeln!(out, "An account exists for {email}.")?;
    } else {
        writeln!(out, "No account for {email}.")?;
    }
    Ok(())
}

pub async fn logout<W: Write>(session: &AuthSession, out: &mut W) -> Result<(), AppError> {
    let was_logged_in = session.is_authenticated().await;
    session.logout().await?;
    if was_logged_in {
        writeln!(out, "Logged out.")?;
    } else {
        writeln!(out, "Not logged in.")?;
    }
    Ok(())
}

pub async fn whoami<W: Write>(session: &AuthSession, out: &mut W) -> Result<(), AppError> {
    let Some(user) = session.current_user().await else {
        writeln!(out, "Not logged in. Run: exhiibot login <email>")?;
        return Ok(());
    };

    field(out, "Name", user.display_name())?;
    field(out, "Email", &user.email)?;
    field(out, "User ID", &user.id)?;
    if !user.user_name.is_empty() {
        field(out, "Handle", format!("@{}", user.user_name))?;
    }
    if let Some(created_at) = user.created_at {
        field(out, "Member since", exhiibot_admin::display::format_date(created_at))?;
    }
    Ok(())
}
