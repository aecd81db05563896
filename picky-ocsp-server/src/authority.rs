use crate::config::{Config, ConfigError};
use crate::store::StatusStore;
use base64::engine::general_purpose;
use base64::Engine as _;
use picky::signature::SignatureAlgorithm;
use picky_ocsp::asn1::OcspRequest;
use picky_ocsp::{CertStatus, IssuerIdentity, OcspError, ResponseTemplate, SerialNumber, StatusParseError};
use std::fmt;
use std::string::FromUtf8Error;
use std::time::{Duration, SystemTime};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthorityError {
    #[error("status body is not valid utf-8: {0}")]
    NonUtf8Status(#[from] std::str::Utf8Error),

    #[error("{0}")]
    InvalidStatus(#[from] StatusParseError),

    #[error("invalid percent-encoding in OCSP request: {0}")]
    InvalidPercentEncoding(#[source] FromUtf8Error),

    #[error("invalid base64 OCSP request: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("malformed OCSP request: {0}")]
    MalformedRequest(#[source] OcspError),

    #[error("couldn't sign OCSP response: {0}")]
    Signing(#[source] OcspError),
}

/// Current status of a serial, rendered as `"{serial} {status code}"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub serial: String,
    pub status: CertStatus,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.serial, self.status)
    }
}

/// OCSP authority for a single issuer.
///
/// Statuses are changed at runtime through [`OcspAuthority::set_status`] and every protocol
/// request gets a freshly signed answer reflecting the status at that time.
pub struct OcspAuthority {
    store: StatusStore,
    issuer: IssuerIdentity,
    signing_algorithm: SignatureAlgorithm,
    validity: Duration,
}

impl OcspAuthority {
    pub fn new(issuer: IssuerIdentity, signing_algorithm: SignatureAlgorithm, validity: Duration) -> Self {
        Self {
            store: StatusStore::new(),
            issuer,
            signing_algorithm,
            validity,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let issuer = config.load_issuer()?;
        log::debug!("issuer identity loaded: {:?}", issuer);
        Ok(Self::new(issuer, config.signing_algorithm, config.validity()))
    }

    pub fn issuer(&self) -> &IssuerIdentity {
        &self.issuer
    }

    pub fn status(&self, serial: &str) -> StatusReport {
        StatusReport {
            serial: serial.to_owned(),
            status: self.store.get(serial),
        }
    }

    /// Parses `body` as a decimal status code and records it for `serial`.
    ///
    /// The store is left untouched when the body isn't a valid status code.
    pub fn set_status(&self, serial: &str, body: &[u8]) -> Result<StatusReport, AuthorityError> {
        let status = std::str::from_utf8(body)?.parse::<CertStatus>()?;
        self.store.set(serial, status);
        log::info!("status of {} set to {} ({} serials tracked)", serial, status, self.store.len());
        Ok(StatusReport {
            serial: serial.to_owned(),
            status,
        })
    }

    /// Answers an OCSP request given as (possibly percent-encoded) standard base64 DER.
    ///
    /// Returns the DER encoding of the signed `OCSPResponse`.
    pub fn respond(&self, encoded_request: &str) -> Result<Vec<u8>, AuthorityError> {
        let encoded_request = urlencoding::decode(encoded_request).map_err(AuthorityError::InvalidPercentEncoding)?;
        let der = general_purpose::STANDARD.decode(encoded_request.as_bytes())?;
        let request = OcspRequest::parse(&der).map_err(AuthorityError::MalformedRequest)?;
        let cert_id = request.cert_id().map_err(AuthorityError::MalformedRequest)?;

        let serial_number = SerialNumber::new(cert_id.serial_number.clone());
        let serial = serial_number.to_string();
        let entry = self.store.entry(&serial);
        let status = entry.map(|entry| entry.status).unwrap_or_default();
        log::debug!("OCSP request for {}: status {}", serial, status);

        let mut template = ResponseTemplate::new(status, serial_number, SystemTime::now(), self.validity)
            .map_err(AuthorityError::Signing)?;
        if let Some(entry) = entry.filter(|entry| entry.status == CertStatus::Revoked) {
            template = template.revoked_at(entry.updated_at);
        }

        template
            .sign(&self.issuer, self.signing_algorithm)
            .map_err(AuthorityError::Signing)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use picky::hash::HashAlgorithm;
    use picky_ocsp::asn1::{BasicOcspResponse, CertStatusInfo, OcspResponse};
    use picky_ocsp::der::Decode;
    use pretty_assertions::assert_eq;

    pub(crate) fn authority_with(signing_algorithm: SignatureAlgorithm) -> OcspAuthority {
        let issuer = IssuerIdentity::from_pem_str(picky_test_data::OCSP_CA_CERT, picky_test_data::OCSP_CA_KEY)
            .expect("load issuer identity");
        OcspAuthority::new(issuer, signing_algorithm, Duration::from_secs(4))
    }

    pub(crate) fn authority() -> OcspAuthority {
        authority_with(SignatureAlgorithm::RsaPkcs1v15(HashAlgorithm::SHA2_256))
    }

    pub(crate) fn decode_response(authority: &OcspAuthority, der: &[u8]) -> BasicOcspResponse {
        let basic = OcspResponse::from_der(der)
            .expect("decode ocsp response")
            .basic_response()
            .expect("basic response");
        basic
            .verify(&authority.issuer().public_key())
            .expect("response signed by the issuer");
        basic
    }

    #[test]
    fn set_and_get_status() {
        let authority = authority();
        assert_eq!(authority.status("12345").to_string(), "12345 2");

        let report = authority.set_status("12345", b"0").unwrap();
        assert_eq!(report.to_string(), "12345 0");
        assert_eq!(authority.status("12345").to_string(), "12345 0");
    }

    #[test]
    fn invalid_status_leaves_store_untouched() {
        let authority = authority();
        authority.set_status("12345", b"1").unwrap();

        for body in [&b"revoked"[..], b"", b"7", b"\xff"] {
            let err = authority.set_status("12345", body).unwrap_err();
            assert!(matches!(
                err,
                AuthorityError::InvalidStatus(_) | AuthorityError::NonUtf8Status(_)
            ));
        }

        assert_eq!(authority.status("12345").status, CertStatus::Revoked);
    }

    #[test]
    fn responds_with_current_status() {
        let authority = authority();
        authority.set_status(picky_test_data::OCSP_SERVER_SERIAL, b"0").unwrap();

        let before = SystemTime::now();
        let basic = decode_response(&authority, &authority.respond(picky_test_data::OCSP_REQUEST_B64).unwrap());
        let single = &basic.tbs_response_data.responses[0];
        assert_eq!(single.status(), CertStatus::Good);
        assert_eq!(
            SerialNumber::new(single.cert_id.serial_number.clone()).to_string(),
            picky_test_data::OCSP_SERVER_SERIAL
        );

        // GeneralizedTime has second precision
        let this_update = single.this_update.to_system_time();
        let next_update = single.next_update.expect("next update").to_system_time();
        assert!(this_update + Duration::from_secs(1) >= before);
        assert_eq!(next_update.duration_since(this_update).unwrap(), Duration::from_secs(4));

        // no caching: the next request sees the new status
        authority.set_status(picky_test_data::OCSP_SERVER_SERIAL, b"1").unwrap();
        let basic = decode_response(&authority, &authority.respond(picky_test_data::OCSP_REQUEST_B64).unwrap());
        match &basic.tbs_response_data.responses[0].cert_status {
            CertStatusInfo::Revoked(info) => {
                let entry_time = authority.store.entry(picky_test_data::OCSP_SERVER_SERIAL).unwrap().updated_at;
                let revocation_time = info.revocation_time.to_system_time();
                assert!(revocation_time <= entry_time);
                assert!(revocation_time + Duration::from_secs(1) > entry_time);
            }
            other => panic!("expected revoked status, got {:?}", other),
        }
    }

    #[test]
    fn unknown_serial() {
        let authority = authority();
        let basic = decode_response(
            &authority,
            &authority.respond(picky_test_data::OCSP_REQUEST_12345_B64).unwrap(),
        );
        assert_eq!(basic.tbs_response_data.responses[0].status(), CertStatus::Unknown);
        assert_eq!(authority.store.len(), 0);
    }

    #[test]
    fn percent_encoded_request() {
        let authority = authority();
        let encoded = urlencoding::encode(picky_test_data::OCSP_REQUEST_B64);
        assert!(encoded.contains("%2F"));

        let basic = decode_response(&authority, &authority.respond(&encoded).unwrap());
        assert_eq!(basic.tbs_response_data.responses[0].status(), CertStatus::Unknown);
    }

    #[test]
    fn malformed_requests() {
        let authority = authority();

        let err = authority.respond("not base64!").unwrap_err();
        assert!(matches!(err, AuthorityError::InvalidBase64(_)));

        // valid base64, not DER
        let err = authority.respond("aGVsbG8gd29ybGQ=").unwrap_err();
        assert!(matches!(err, AuthorityError::MalformedRequest(_)));

        let err = authority.respond("").unwrap_err();
        assert!(matches!(err, AuthorityError::MalformedRequest(_)));

        let err = authority.respond("%FF%FE").unwrap_err();
        assert!(matches!(err, AuthorityError::InvalidPercentEncoding(_)));

        assert_eq!(authority.store.len(), 0);
    }

    #[test]
    fn signing_failure() {
        let authority = authority_with(SignatureAlgorithm::Ecdsa(HashAlgorithm::SHA2_256));
        let err = authority.respond(picky_test_data::OCSP_REQUEST_B64).unwrap_err();
        assert!(matches!(err, AuthorityError::Signing(_)));
    }

    #[test]
    fn oversized_validity_window_is_a_signing_failure() {
        for validity in [Duration::from_secs(u64::MAX), Duration::from_secs(10_000 * 365 * 24 * 3600)] {
            let mut authority = authority();
            authority.validity = validity;

            let err = authority.respond(picky_test_data::OCSP_REQUEST_B64).unwrap_err();
            assert!(matches!(err, AuthorityError::Signing(_)));
        }
    }
}
