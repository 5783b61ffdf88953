//! One-time passcode sent to an admin's inbox during login.

use core::fmt;

use serde::Serialize;

/// Errors that can occur when parsing an [`OtpCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// Fewer or more digits than the code length.
    #[error("please enter the complete {expected}-digit code")]
    Incomplete {
        /// Required number of digits.
        expected: usize,
    },
    /// A character other than an ASCII digit was supplied.
    #[error("code must contain digits only")]
    NonDigit,
}

/// A login one-time passcode.
///
/// The platform issues 4-digit codes. Validation happens locally so an
/// incomplete code never reaches the API.
///
/// ```
/// use exhiibot_core::OtpCode;
///
/// assert!(OtpCode::parse("0427").is_ok());
/// assert!(OtpCode::parse(" 0427\n").is_ok());
/// assert!(OtpCode::parse("042").is_err());
/// assert!(OtpCode::parse("04a7").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OtpCode(String);

impl OtpCode {
    /// Number of digits in a code.
    pub const LENGTH: usize = 4;

    /// Parse a code, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::NonDigit`] if any character is not an ASCII digit,
    /// or [`OtpError::Incomplete`] if the digit count is not [`Self::LENGTH`].
    pub fn parse(s: &str) -> Result<Self, OtpError> {
        let s = s.trim();

        if !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(OtpError::NonDigit);
        }

        if s.len() != Self::LENGTH {
            return Err(OtpError::Incomplete {
                expected: Self::LENGTH,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Codes are short-lived credentials; keep them out of logs.
impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode([REDACTED])")
    }
}

impl std::str::FromStr for OtpCode {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
