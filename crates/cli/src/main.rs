//! Exhiibot CLI - admin console for the Exhiibot platform.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (emails a 4-digit code, then exchanges it for a session)
//! exhiibot login staff@exhiibot.com
//! exhiibot verify staff@exhiibot.com 1234
//!
//! # Browse
//! exhiibot dashboard
//! exhiibot users list --search ada --active true
//! exhiibot orders show 65f0c2a1 --page 2
//!
//! # Moderate (asks for confirmation unless --yes)
//! exhiibot posts delete 65f0c2a1
//! exhiibot referrals review 65f0c2a1 --decision approved --discount 10
//! ```
//!
//! Command output goes to stdout; logs go to stderr. Exit code is 1 on any
//! error.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use exhiibot_admin::api::ReviewDecision;
use exhiibot_admin::session::{FileSessionStore, SessionStore};
use exhiibot_admin::{AdminConfig, ApiClient, AppError, AuthSession};
use exhiibot_core::ApplicationStatus;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "exhiibot")]
#[command(author, version, about = "Exhiibot admin console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Email a one-time login code
    Login { email: String },
    /// Complete login with the emailed code
    Verify { email: String, otp: String },
    /// Send a fresh login code
    ResendOtp { email: String },
    /// Check whether an account exists for an email
    CheckEmail { email: String },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Headline counters and recent activity
    Dashboard,
    /// Platform analytics
    Analytics {
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Platform activity feed
    Activities {
        #[command(flatten)]
        paging: PageArgs,
        /// Activity type
        #[arg(long = "type")]
        kind: Option<String>,
    },
    /// Manage users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Browse placed orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Moderate posts
    Posts {
        #[command(subcommand)]
        action: PostsAction,
    },
    /// Moderate events
    Events {
        #[command(subcommand)]
        action: EventsAction,
    },
    /// Manage the product catalogue
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Review referral applications
    Referrals {
        #[command(subcommand)]
        action: ReferralsAction,
    },
}

/// Page selection shared by list commands.
#[derive(Args, Debug, Clone, Copy)]
struct PageArgs {
    /// Page number (1-indexed)
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Rows per page
    #[arg(long, default_value_t = 20)]
    limit: u32,
}

#[derive(Subcommand)]
enum UsersAction {
    /// List users
    List {
        #[command(flatten)]
        paging: PageArgs,
        /// Search name, handle or email
        #[arg(long)]
        search: Option<String>,
        /// Only active (true) or inactive (false) users
        #[arg(long, action = ArgAction::Set)]
        active: Option<bool>,
        /// Only completed (true) or incomplete (false) profiles
        #[arg(long, action = ArgAction::Set)]
        completed: Option<bool>,
    },
    /// Show one user
    Show { id: String },
    /// Update profile fields or flags
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long, action = ArgAction::Set)]
        active: Option<bool>,
        #[arg(long, action = ArgAction::Set)]
        completed: Option<bool>,
    },
    /// Flip a user's active flag
    Toggle { id: String },
    /// Permanently delete a user
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders
    List {
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Show one order from the given page
    Show {
        id: String,
        #[command(flatten)]
        paging: PageArgs,
    },
}

#[derive(Subcommand)]
enum PostsAction {
    /// List posts
    List {
        #[command(flatten)]
        paging: PageArgs,
        /// Source platform (e.g. instagram, tiktok)
        #[arg(long)]
        platform: Option<String>,
        #[arg(long, action = ArgAction::Set)]
        published: Option<bool>,
    },
    /// Delete a post
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum EventsAction {
    /// List events
    List {
        #[command(flatten)]
        paging: PageArgs,
        /// Event type
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long, action = ArgAction::Set)]
        active: Option<bool>,
    },
    /// Delete an event
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products
    List {
        #[command(flatten)]
        paging: PageArgs,
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a product
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        /// Image URL
        #[arg(long)]
        image: String,
        /// Price in naira (e.g. 49999 or 49,999.00)
        #[arg(long)]
        price: String,
    },
    /// Change fields of a product
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Image URL
        #[arg(long)]
        image: Option<String>,
        /// Price in naira
        #[arg(long)]
        price: Option<String>,
    },
    /// Delete a product
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ReferralsAction {
    /// List applications
    List {
        /// pending, approved or rejected
        #[arg(long)]
        status: Option<ApplicationStatus>,
    },
    /// Approve or reject an application
    Review {
        id: String,
        /// approved or rejected
        #[arg(long)]
        decision: ReviewDecision,
        /// Note stored with the decision
        #[arg(long)]
        notes: Option<String>,
        /// Discount percentage for the issued code
        #[arg(long)]
        discount: Option<f64>,
    },
    /// Revoke an application and its referral code
    Revoke {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &AdminConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Log to stderr: JSON in production, text otherwise.
fn init_tracing(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "exhiibot_admin=info,exhiibot_cli=info".into());

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration first; it decides the log format and Sentry setup
    let config = AdminConfig::from_env();
    let sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing(config.as_ref().is_ok_and(|c| c.app.is_production()));

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(AppError::from(e)),
    };

    if let Err(e) = result {
        if e.is_reportable() {
            sentry::capture_error(&e);
        }
        tracing::error!(error = %e, "Command failed");
        let _ = writeln!(std::io::stderr().lock(), "error: {e}");
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: AdminConfig) -> Result<(), AppError> {
    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&config.session_file));
    let client = ApiClient::new(&config.api, store)?;
    let session = AuthSession::new(client.clone());
    session.restore().await?;

    tracing::debug!(app = %config.app.name, env = %config.app.environment, base_url = client.base_url(), "Starting");

    let mut out = std::io::stdout().lock();
    let out = &mut out;

    match cli.command {
        Commands::Login { email } => commands::auth::login(&session, out, &email).await?,
        Commands::Verify { email, otp } => {
            commands::auth::verify(&session, out, &email, &otp).await?;
        }
        Commands::ResendOtp { email } => commands::auth::resend(&session, out, &email).await?,
        Commands::CheckEmail { email } => {
            commands::auth::check_email(&session, out, &email).await?;
        }
        Commands::Logout => commands::auth::logout(&session, out).await?,
        Commands::Whoami => commands::auth::whoami(&session, out).await?,
        Commands::Dashboard => commands::overview::dashboard(&client, out).await?,
        Commands::Analytics { start, end } => {
            commands::overview::analytics(&client, out, start, end).await?;
        }
        Commands::Activities { paging, kind } => {
            commands::overview::activities(&client, out, paging.page, paging.limit, kind).await?;
        }
        Commands::Users { action } => run_users(&client, out, action).await?,
        Commands::Orders { action } => match action {
            OrdersAction::List { paging } => {
                commands::orders::list(&client, out, paging.page, paging.limit).await?;
            }
            OrdersAction::Show { id, paging } => {
                commands::orders::show(&client, out, &id, paging.page, paging.limit).await?;
            }
        },
        Commands::Posts { action } => match action {
            PostsAction::List {
                paging,
                platform,
                published,
            } => {
                let filter = exhiibot_admin::api::PostFilter {
                    platform,
                    is_published: published,
                };
                commands::posts::list(&client, out, paging.page, paging.limit, filter).await?;
            }
            PostsAction::Delete { id, yes } => commands::posts::delete(&client, out, id, yes).await?,
        },
        Commands::Events { action } => match action {
            EventsAction::List {
                paging,
                kind,
                active,
            } => {
                let filter = exhiibot_admin::api::EventFilter {
                    kind,
                    is_active: active,
                };
                commands::events::list(&client, out, paging.page, paging.limit, filter).await?;
            }
            EventsAction::Delete { id, yes } => {
                commands::events::delete(&client, out, id, yes).await?;
            }
        },
        Commands::Products { action } => match action {
            ProductsAction::List { paging, search } => {
                commands::products::list(&client, out, paging.page, paging.limit, search).await?;
            }
            ProductsAction::Create {
                name,
                description,
                image,
                price,
            } => {
                commands::products::create(&client, out, name, description, image, &price)
                    .await?;
            }
            ProductsAction::Update {
                id,
                name,
                description,
                image,
                price,
            } => {
                let update = commands::products::build_update(name, description, image, price)?;
                commands::products::update(&client, out, &id, &update).await?;
            }
            ProductsAction::Delete { id, yes } => {
                commands::products::delete(&client, out, id, yes).await?;
            }
        },
        Commands::Referrals { action } => match action {
            ReferralsAction::List { status } => {
                commands::referrals::list(&client, out, status).await?;
            }
            ReferralsAction::Review {
                id,
                decision,
                notes,
                discount,
            } => {
                commands::referrals::review(&client, out, &id, decision, notes, discount).await?;
            }
            ReferralsAction::Revoke { id, yes } => {
                commands::referrals::revoke(&client, out, id, yes).await?;
            }
        },
    }

    out.flush()?;
    Ok(())
}

async fn run_users(
    client: &ApiClient,
    out: &mut impl Write,
    action: UsersAction,
) -> Result<(), AppError> {
    match action {
        UsersAction::List {
            paging,
            search,
            active,
            completed,
        } => {
            let filter = exhiibot_admin::api::UserFilter {
                search,
                is_active: active,
                is_completed: completed,
            };
            commands::users::list(client, out, paging.page, paging.limit, filter).await
        }
        UsersAction::Show { id } => commands::users::show(client, out, &id).await,
        UsersAction::Update {
            id,
            name,
            email,
            bio,
            active,
            completed,
        } => {
            let update = commands::users::build_update(name, email, bio, active, completed)?;
            commands::users::update(client, out, &id, &update).await
        }
        UsersAction::Toggle { id } => commands::users::toggle(client, out, &id).await,
        UsersAction::Delete { id, yes } => commands::users::delete(client, out, id, yes).await,
    }
}
