use crate::asn1::OcspResponseStatus;
use der::oid::ObjectIdentifier;
use picky::key::KeyError;
use picky::pem::PemError;
use picky::signature::SignatureError;
use picky::x509::certificate::CertError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcspError {
    /// ASN.1 encoding or decoding failed
    #[error("asn1 error: {0}")]
    Asn1(#[from] der::Error),

    #[error("OCSP request doesn't contain any certificate request")]
    EmptyRequestList,

    #[error("invalid pem: {0}")]
    Pem(#[from] PemError),

    #[error("invalid issuer certificate: {0}")]
    Certificate(#[from] CertError),

    #[error("invalid issuer key: {0}")]
    Key(#[from] KeyError),

    /// The private key can't produce signatures verifiable with the certificate public key
    #[error("issuer private key doesn't match the issuer certificate")]
    KeyMismatch,

    #[error("signature error: {0}")]
    Signature(#[from] SignatureError),

    #[error("validity window of {0:?} goes past the latest representable time")]
    ValidityOverflow(std::time::Duration),

    #[error("unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("OCSP response status is not successful: {0:?}")]
    Unsuccessful(OcspResponseStatus),

    #[error("successful OCSP response doesn't carry any response bytes")]
    MissingResponseBytes,

    #[error("unexpected OCSP response type: {0}")]
    UnexpectedResponseType(ObjectIdentifier),
}
