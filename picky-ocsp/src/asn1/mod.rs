//! ASN.1 types defined by [RFC 6960](https://tools.ietf.org/html/rfc6960#section-4)
//!
//! ```text
//! -- Object Identifiers
//! id-kp-OCSPSigning            OBJECT IDENTIFIER ::= { id-kp 9 }
//! id-pkix-ocsp                 OBJECT IDENTIFIER ::= { id-ad-ocsp }
//! id-pkix-ocsp-basic           OBJECT IDENTIFIER ::= { id-pkix-ocsp 1 }
//! id-pkix-ocsp-nonce           OBJECT IDENTIFIER ::= { id-pkix-ocsp 2 }
//! ```
//!
//! The module is defined with `EXPLICIT TAGS`, which is also the `der` derive default.

mod request;
mod response;

pub use request::{OcspRequest, Request, Signature, TbsRequest};
pub use response::{
    BasicOcspResponse, CertStatusInfo, CrlReason, OcspResponse, OcspResponseStatus, ResponderId, ResponseBytes,
    ResponseData, RevokedInfo, SingleResponse,
};

use der::asn1::{Int, OctetString};
use der::{Enumerated, Sequence};
use spki::AlgorithmIdentifierOwned;

/// ```text
/// Version ::= INTEGER { v1(0) }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Enumerated)]
#[asn1(type = "INTEGER")]
#[repr(u8)]
pub enum Version {
    V1 = 0,
}

impl Default for Version {
    fn default() -> Self {
        Self::V1
    }
}

/// [RFC 6960 #4.1.1](https://tools.ietf.org/html/rfc6960#section-4.1.1)
///
/// ```text
/// CertID ::= SEQUENCE {
///     hashAlgorithm           AlgorithmIdentifier,
///     issuerNameHash          OCTET STRING, -- Hash of issuer's DN
///     issuerKeyHash           OCTET STRING, -- Hash of issuer's public key
///     serialNumber            CertificateSerialNumber }
/// ```
///
/// The serial number is kept as a plain `INTEGER`: clients are known to send
/// zero or negative serials and those must still be answered.
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct CertId {
    pub hash_algorithm: AlgorithmIdentifierOwned,
    pub issuer_name_hash: OctetString,
    pub issuer_key_hash: OctetString,
    pub serial_number: Int,
}
