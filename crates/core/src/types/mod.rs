//! Core types for Exhiibot.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod otp;
pub mod pagination;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use otp::{OtpCode, OtpError};
pub use pagination::Pagination;
pub use price::{CurrencyCode, PLATFORM_CURRENCY, Price, PriceError};
pub use status::*;
