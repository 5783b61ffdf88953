//! Exhiibot Core - Shared types library.
//!
//! This crate provides common types used across the Exhiibot admin tooling:
//! - `admin` - REST client, session handling and list controllers
//! - `cli` - The `exhiibot` command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no clocks. Anything time-dependent takes `now` as an argument so
//! the derivation rules stay independently testable.
//!
//! # Modules
//!
//! - [`types`] - Record IDs, emails, OTP codes, prices, pagination and the
//!   derived order/event status rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
