//! Wire types for the platform REST API.
//!
//! Field names follow the API (camelCase, document-store `_id`, snake_case
//! `created_at`). Optional or frequently-absent fields default rather than
//! fail, since the API omits empty arrays and unset profile fields.

pub mod activity;
pub mod analytics;
pub mod auth;
pub mod cart;
pub mod common;
pub mod dashboard;
pub mod event;
pub mod post;
pub mod product;
pub mod referral;
pub mod user;

// Re-export all types for convenience
pub use activity::*;
pub use analytics::*;
pub use auth::*;
pub use cart::*;
pub use common::*;
pub use dashboard::*;
pub use event::*;
pub use post::*;
pub use product::*;
pub use referral::*;
pub use user::*;
