//! OCSP responder building blocks
//!
//! This crate provides the ASN.1 types defined by [RFC 6960](https://tools.ietf.org/html/rfc6960),
//! decoding of inbound `OCSPRequest`s and generation of signed `OCSPResponse`s using picky keys
//! and signature algorithms.

pub mod asn1;
pub mod error;
pub mod issuer;
pub mod oids;
pub mod responder;
pub mod serial;
pub mod status;

pub use error::OcspError;
pub use issuer::IssuerIdentity;
pub use responder::ResponseTemplate;
pub use serial::{SerialNumber, SerialParseError};
pub use status::{CertStatus, StatusParseError};

pub use der;
