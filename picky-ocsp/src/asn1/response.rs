use super::{CertId, Version};
use crate::error::OcspError;
use crate::oids;
use der::asn1::{BitString, GeneralizedTime, Null, ObjectIdentifier, OctetString};
use der::{Choice, Decode, Encode, Enumerated, Sequence};
use spki::AlgorithmIdentifierOwned;
use x509_cert::ext::Extensions;
use x509_cert::name::Name;
use x509_cert::Certificate;

/// [RFC 6960 #4.2.1](https://tools.ietf.org/html/rfc6960#section-4.2.1)
///
/// ```text
/// OCSPResponse ::= SEQUENCE {
///    responseStatus         OCSPResponseStatus,
///    responseBytes          [0] EXPLICIT ResponseBytes OPTIONAL }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct OcspResponse {
    pub response_status: OcspResponseStatus,
    #[asn1(context_specific = "0", optional = "true")]
    pub response_bytes: Option<ResponseBytes>,
}

/// ```text
/// OCSPResponseStatus ::= ENUMERATED {
///     successful            (0),  -- Response has valid confirmations
///     malformedRequest      (1),  -- Illegal confirmation request
///     internalError         (2),  -- Internal error in issuer
///     tryLater              (3),  -- Try again later
///                                 -- (4) is not used
///     sigRequired           (5),  -- Must sign the request
///     unauthorized          (6)   -- Request unauthorized
/// }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Enumerated)]
#[repr(u32)]
pub enum OcspResponseStatus {
    Successful = 0,
    MalformedRequest = 1,
    InternalError = 2,
    TryLater = 3,
    SigRequired = 5,
    Unauthorized = 6,
}

/// ```text
/// ResponseBytes ::=       SEQUENCE {
///     responseType   OBJECT IDENTIFIER,
///     response       OCTET STRING }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct ResponseBytes {
    pub response_type: ObjectIdentifier,
    pub response: OctetString,
}

/// ```text
/// BasicOCSPResponse       ::= SEQUENCE {
///    tbsResponseData      ResponseData,
///    signatureAlgorithm   AlgorithmIdentifier,
///    signature            BIT STRING,
///    certs            [0] EXPLICIT SEQUENCE OF Certificate OPTIONAL }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct BasicOcspResponse {
    pub tbs_response_data: ResponseData,
    pub signature_algorithm: AlgorithmIdentifierOwned,
    pub signature: BitString,
    #[asn1(context_specific = "0", optional = "true")]
    pub certs: Option<Vec<Certificate>>,
}

/// ```text
/// ResponseData ::= SEQUENCE {
///    version              [0] EXPLICIT Version DEFAULT v1,
///    responderID              ResponderID,
///    producedAt               GeneralizedTime,
///    responses                SEQUENCE OF SingleResponse,
///    responseExtensions   [1] EXPLICIT Extensions OPTIONAL }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct ResponseData {
    #[asn1(context_specific = "0", default = "Default::default")]
    pub version: Version,
    pub responder_id: ResponderId,
    pub produced_at: GeneralizedTime,
    pub responses: Vec<SingleResponse>,
    #[asn1(context_specific = "1", optional = "true")]
    pub response_extensions: Option<Extensions>,
}

/// ```text
/// ResponderID ::= CHOICE {
///    byName               [1] Name,
///    byKey                [2] KeyHash }
///
/// KeyHash ::= OCTET STRING -- SHA-1 hash of responder's public key
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Choice)]
pub enum ResponderId {
    #[asn1(context_specific = "1", tag_mode = "EXPLICIT", constructed = "true")]
    ByName(Name),
    #[asn1(context_specific = "2", tag_mode = "EXPLICIT", constructed = "true")]
    ByKey(OctetString),
}

/// ```text
/// SingleResponse ::= SEQUENCE {
///    certID                       CertID,
///    certStatus                   CertStatus,
///    thisUpdate                   GeneralizedTime,
///    nextUpdate         [0]       EXPLICIT GeneralizedTime OPTIONAL,
///    singleExtensions   [1]       EXPLICIT Extensions OPTIONAL }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct SingleResponse {
    pub cert_id: CertId,
    pub cert_status: CertStatusInfo,
    pub this_update: GeneralizedTime,
    #[asn1(context_specific = "0", optional = "true")]
    pub next_update: Option<GeneralizedTime>,
    #[asn1(context_specific = "1", optional = "true")]
    pub single_extensions: Option<Extensions>,
}

/// ```text
/// CertStatus ::= CHOICE {
///     good        [0]     IMPLICIT NULL,
///     revoked     [1]     IMPLICIT RevokedInfo,
///     unknown     [2]     IMPLICIT UnknownInfo }
///
/// UnknownInfo ::= NULL
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Choice)]
pub enum CertStatusInfo {
    #[asn1(context_specific = "0", tag_mode = "IMPLICIT")]
    Good(Null),
    #[asn1(context_specific = "1", tag_mode = "IMPLICIT", constructed = "true")]
    Revoked(RevokedInfo),
    #[asn1(context_specific = "2", tag_mode = "IMPLICIT")]
    Unknown(Null),
}

/// ```text
/// RevokedInfo ::= SEQUENCE {
///     revocationTime              GeneralizedTime,
///     revocationReason    [0]     EXPLICIT CRLReason OPTIONAL }
/// ```
///
/// The reason is kept as its raw `ENUMERATED` value.
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct RevokedInfo {
    pub revocation_time: GeneralizedTime,
    #[asn1(context_specific = "0", optional = "true")]
    pub revocation_reason: Option<CrlReason>,
}

/// ```text
/// CRLReason ::= ENUMERATED {
///      unspecified             (0),
///      keyCompromise           (1),
///      cACompromise            (2),
///      affiliationChanged      (3),
///      superseded              (4),
///      cessationOfOperation    (5),
///      certificateHold         (6),
///           -- value 7 is not used
///      removeFromCRL           (8),
///      privilegeWithdrawn      (9),
///      aACompromise           (10) }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Enumerated)]
#[repr(u32)]
pub enum CrlReason {
    Unspecified = 0,
    KeyCompromise = 1,
    CaCompromise = 2,
    AffiliationChanged = 3,
    Superseded = 4,
    CessationOfOperation = 5,
    CertificateHold = 6,
    RemoveFromCrl = 8,
    PrivilegeWithdrawn = 9,
    AaCompromise = 10,
}

impl OcspResponse {
    /// Wraps a basic response into a `successful` OCSP response.
    pub fn successful(basic: &BasicOcspResponse) -> Result<Self, OcspError> {
        Ok(Self {
            response_status: OcspResponseStatus::Successful,
            response_bytes: Some(ResponseBytes {
                response_type: oids::OCSP_BASIC_RESPONSE,
                response: OctetString::new(basic.to_der()?)?,
            }),
        })
    }

    /// Decodes the `id-pkix-ocsp-basic` response carried by a successful OCSP response.
    pub fn basic_response(&self) -> Result<BasicOcspResponse, OcspError> {
        if self.response_status != OcspResponseStatus::Successful {
            return Err(OcspError::Unsuccessful(self.response_status));
        }

        let bytes = self.response_bytes.as_ref().ok_or(OcspError::MissingResponseBytes)?;
        if bytes.response_type != oids::OCSP_BASIC_RESPONSE {
            return Err(OcspError::UnexpectedResponseType(bytes.response_type));
        }

        Ok(BasicOcspResponse::from_der(bytes.response.as_bytes())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::asn1::Int;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn cert_id() -> CertId {
        CertId {
            hash_algorithm: AlgorithmIdentifierOwned {
                oid: oids::SHA1,
                parameters: None,
            },
            issuer_name_hash: OctetString::new(vec![0x11; 20]).unwrap(),
            issuer_key_hash: OctetString::new(vec![0x22; 20]).unwrap(),
            serial_number: Int::new(&[0x30, 0x39]).unwrap(),
        }
    }

    #[test]
    fn cert_status_tags() {
        let good = CertStatusInfo::Good(Null).to_der().unwrap();
        assert_eq!(good, [0x80, 0x00]);

        let unknown = CertStatusInfo::Unknown(Null).to_der().unwrap();
        assert_eq!(unknown, [0x82, 0x00]);

        let revoked = CertStatusInfo::Revoked(RevokedInfo {
            revocation_time: GeneralizedTime::from_unix_duration(Duration::from_secs(0)).unwrap(),
            revocation_reason: Some(CrlReason::KeyCompromise),
        });
        let revoked_der = revoked.to_der().unwrap();
        // [1] constructed, then GeneralizedTime "19700101000000Z"
        assert_eq!(revoked_der[0], 0xA1);
        assert_eq!(revoked_der[2], 0x18);
        assert_eq!(CertStatusInfo::from_der(&revoked_der).unwrap(), revoked);
    }

    #[test]
    fn single_response_next_update_is_explicitly_tagged() {
        let time = GeneralizedTime::from_unix_duration(Duration::from_secs(1_700_000_000)).unwrap();
        let single = SingleResponse {
            cert_id: cert_id(),
            cert_status: CertStatusInfo::Good(Null),
            this_update: time,
            next_update: Some(time),
            single_extensions: None,
        };

        let der = single.to_der().unwrap();
        let time_der = time.to_der().unwrap();
        let mut tagged_time = vec![0xA0, time_der.len() as u8];
        tagged_time.extend_from_slice(&time_der);
        assert!(der.ends_with(&tagged_time));

        assert_eq!(SingleResponse::from_der(&der).unwrap(), single);
    }

    #[test]
    fn unsuccessful_response_has_no_basic_response() {
        let response = OcspResponse {
            response_status: OcspResponseStatus::TryLater,
            response_bytes: None,
        };
        let der = response.to_der().unwrap();
        assert_eq!(der, [0x30, 0x03, 0x0A, 0x01, 0x03]);

        let err = OcspResponse::from_der(&der).unwrap().basic_response().unwrap_err();
        assert!(matches!(err, OcspError::Unsuccessful(OcspResponseStatus::TryLater)));
    }

    #[test]
    fn foreign_response_type_is_rejected() {
        let response = OcspResponse {
            response_status: OcspResponseStatus::Successful,
            response_bytes: Some(ResponseBytes {
                response_type: oids::OCSP_NONCE,
                response: OctetString::new(vec![0x05, 0x00]).unwrap(),
            }),
        };

        let err = response.basic_response().unwrap_err();
        assert!(matches!(err, OcspError::UnexpectedResponseType(oid) if oid == oids::OCSP_NONCE));
    }
}
