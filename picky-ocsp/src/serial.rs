//! Certificate serial numbers and their canonical decimal rendering

use der::asn1::Int;
use num_bigint_dig::{BigInt, ParseBigIntError};
use std::fmt;
use std::str::FromStr;

/// Serial number as carried in a `CertID`.
///
/// `Display` renders the canonical key: the signed decimal value of the integer
/// (e.g. `12345` or `77755216819522827257146252342218643432`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialNumber(Int);

impl SerialNumber {
    pub fn new(int: Int) -> Self {
        Self(int)
    }

    pub fn as_int(&self) -> &Int {
        &self.0
    }

    fn to_bigint(&self) -> BigInt {
        BigInt::from_signed_bytes_be(self.0.as_bytes())
    }
}

impl From<Int> for SerialNumber {
    fn from(int: Int) -> Self {
        Self(int)
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_bigint())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SerialParseError {
    #[error("invalid decimal serial number: {0}")]
    Decimal(#[from] ParseBigIntError),

    #[error("invalid serial number: {0}")]
    Asn1(#[from] der::Error),
}

impl FromStr for SerialNumber {
    type Err = SerialParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = BigInt::from_str(s)?;
        Ok(Self(Int::new(&value.to_signed_bytes_be())?))
    }
}
