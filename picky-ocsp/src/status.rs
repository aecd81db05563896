//! Revocation status tracked for a certificate

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusParseError {
    #[error("invalid status code '{input}': {source}")]
    NotAnInteger { input: String, source: ParseIntError },

    #[error("invalid status code {0}: expected 0 (good), 1 (revoked) or 2 (unknown)")]
    OutOfRange(i64),
}

/// Status of a certificate as reported in OCSP responses.
///
/// Discriminants are the OCSP `CertStatus` CHOICE tag numbers. A certificate the
/// authority has never heard of is `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CertStatus {
    Good = 0,
    Revoked = 1,
    #[default]
    Unknown = 2,
}

impl CertStatus {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for CertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl TryFrom<i64> for CertStatus {
    type Error = StatusParseError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Good),
            1 => Ok(Self::Revoked),
            2 => Ok(Self::Unknown),
            _ => Err(StatusParseError::OutOfRange(code)),
        }
    }
}

impl FromStr for CertStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let code = trimmed
            .parse::<i64>()
            .map_err(|source| StatusParseError::NotAnInteger {
                input: trimmed.to_owned(),
                source,
            })?;
        Self::try_from(code)
    }
}
