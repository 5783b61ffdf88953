//! Exhiibot Admin library.
//!
//! Typed access to the platform's admin REST API plus the controllers the
//! `exhiibot` CLI is built on.
//!
//! # Layers
//!
//! - [`api`] - `ApiClient` and the wire types, one method per endpoint
//! - [`session`] - OTP login and the persisted bearer token
//! - [`listing`] - list/view controllers with stale-response protection
//! - [`resources`] - one source per admin resource, plus filter setters
//! - [`actions`] - confirmation-gated deletes and revocations
//! - [`display`] - date, price and text formatting
//!
//! # Security
//!
//! The session file grants full staff access to the platform. It is written
//! with owner-only permissions and removed on logout.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod actions;
pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod listing;
pub mod resources;
pub mod session;

pub use api::{ApiClient, ApiError};
pub use config::AdminConfig;
pub use error::AppError;
pub use session::AuthSession;
