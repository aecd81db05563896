//! Answers requests produced by `openssl ocsp` for certificates issued by the test authority.

use base64::engine::general_purpose;
use base64::Engine as _;
use picky::hash::HashAlgorithm;
use picky::signature::SignatureAlgorithm;
use picky_ocsp::asn1::{OcspRequest, OcspResponse};
use picky_ocsp::der::Decode;
use picky_ocsp::{CertStatus, IssuerIdentity, ResponseTemplate, SerialNumber};
use pretty_assertions::assert_eq;
use std::time::{Duration, SystemTime};

fn answer(request_b64: &str, status: CertStatus) -> (OcspRequest, picky_ocsp::asn1::BasicOcspResponse) {
    let issuer = IssuerIdentity::from_pem_str(picky_test_data::OCSP_CA_CERT, picky_test_data::OCSP_CA_KEY)
        .expect("load issuer identity");

    let der = general_purpose::STANDARD.decode(request_b64).expect("valid base64");
    let request = OcspRequest::parse(&der).expect("parse request");
    let serial = SerialNumber::new(request.cert_id().unwrap().serial_number.clone());

    let response_der = ResponseTemplate::new(status, serial, SystemTime::now(), Duration::from_secs(4))
        .expect("response window")
        .sign(&issuer, SignatureAlgorithm::RsaPkcs1v15(HashAlgorithm::SHA2_256))
        .expect("sign response");

    let basic = OcspResponse::from_der(&response_der)
        .expect("decode response")
        .basic_response()
        .expect("basic response");
    basic.verify(&issuer.public_key()).expect("valid signature");

    (request, basic)
}

#[test]
fn response_cert_id_matches_request_cert_id() {
    let (request, basic) = answer(picky_test_data::OCSP_REQUEST_B64, CertStatus::Good);

    let single = &basic.tbs_response_data.responses[0];
    assert_eq!(&single.cert_id, request.cert_id().unwrap());
    assert_eq!(single.status(), CertStatus::Good);
}

#[test]
fn nonce_requests_are_answered() {
    let (request, basic) = answer(picky_test_data::OCSP_REQUEST_NONCE_B64, CertStatus::Revoked);

    assert!(request.nonce().is_some());
    assert!(basic.tbs_response_data.response_extensions.is_none());
    assert_eq!(basic.tbs_response_data.responses[0].status(), CertStatus::Revoked);
}

#[test]
fn small_serial() {
    let (request, basic) = answer(picky_test_data::OCSP_REQUEST_12345_B64, CertStatus::Unknown);

    let serial = SerialNumber::new(request.cert_id().unwrap().serial_number.clone());
    assert_eq!(serial.to_string(), "12345");
    assert_eq!(&basic.tbs_response_data.responses[0].cert_id, request.cert_id().unwrap());
}
