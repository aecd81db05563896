use super::{CertId, Version};
use crate::error::OcspError;
use crate::oids;
use der::asn1::BitString;
use der::{Decode, Sequence};
use spki::AlgorithmIdentifierOwned;
use x509_cert::ext::pkix::name::GeneralName;
use x509_cert::ext::Extensions;
use x509_cert::Certificate;

/// [RFC 6960 #4.1.1](https://tools.ietf.org/html/rfc6960#section-4.1.1)
///
/// ```text
/// OCSPRequest ::= SEQUENCE {
///     tbsRequest                  TBSRequest,
///     optionalSignature   [0]     EXPLICIT Signature OPTIONAL }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct OcspRequest {
    pub tbs_request: TbsRequest,
    #[asn1(context_specific = "0", optional = "true")]
    pub optional_signature: Option<Signature>,
}

/// ```text
/// TBSRequest ::= SEQUENCE {
///     version             [0]     EXPLICIT Version DEFAULT v1,
///     requestorName       [1]     EXPLICIT GeneralName OPTIONAL,
///     requestList                 SEQUENCE OF Request,
///     requestExtensions   [2]     EXPLICIT Extensions OPTIONAL }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct TbsRequest {
    #[asn1(context_specific = "0", default = "Default::default")]
    pub version: Version,
    #[asn1(context_specific = "1", optional = "true")]
    pub requestor_name: Option<GeneralName>,
    pub request_list: Vec<Request>,
    #[asn1(context_specific = "2", optional = "true")]
    pub request_extensions: Option<Extensions>,
}

/// ```text
/// Signature ::= SEQUENCE {
///     signatureAlgorithm      AlgorithmIdentifier,
///     signature               BIT STRING,
///     certs               [0] EXPLICIT SEQUENCE OF Certificate OPTIONAL }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct Signature {
    pub signature_algorithm: AlgorithmIdentifierOwned,
    pub signature: BitString,
    #[asn1(context_specific = "0", optional = "true")]
    pub certs: Option<Vec<Certificate>>,
}

/// ```text
/// Request ::= SEQUENCE {
///     reqCert                     CertID,
///     singleRequestExtensions [0] EXPLICIT Extensions OPTIONAL }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct Request {
    pub req_cert: CertId,
    #[asn1(context_specific = "0", optional = "true")]
    pub single_request_extensions: Option<Extensions>,
}

impl OcspRequest {
    /// Decodes a DER `OCSPRequest` carrying at least one certificate request.
    pub fn parse(der: &[u8]) -> Result<Self, OcspError> {
        let request = Self::from_der(der)?;
        if request.tbs_request.request_list.is_empty() {
            return Err(OcspError::EmptyRequestList);
        }
        Ok(request)
    }

    /// CertID of the first certificate request.
    ///
    /// Responders built on this crate answer for a single certificate per request.
    pub fn cert_id(&self) -> Result<&CertId, OcspError> {
        self.tbs_request
            .request_list
            .first()
            .map(|request| &request.req_cert)
            .ok_or(OcspError::EmptyRequestList)
    }

    /// Value of the `id-pkix-ocsp-nonce` request extension, if any.
    pub fn nonce(&self) -> Option<&[u8]> {
        self.tbs_request
            .request_extensions
            .as_ref()?
            .iter()
            .find(|extension| extension.extn_id == oids::OCSP_NONCE)
            .map(|extension| extension.extn_value.as_bytes())
    }
}
