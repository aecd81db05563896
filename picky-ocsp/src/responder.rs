//! Signed OCSP response generation

use crate::asn1::{
    BasicOcspResponse, CertStatusInfo, OcspResponse, ResponderId, ResponseData, RevokedInfo, SingleResponse, Version,
};
use crate::error::OcspError;
use crate::issuer::IssuerIdentity;
use crate::oids;
use crate::serial::SerialNumber;
use crate::status::CertStatus;
use der::asn1::{AnyRef, BitString, GeneralizedTime, Null};
use der::oid::ObjectIdentifier;
use der::Encode;
use picky::hash::HashAlgorithm;
use picky::key::PublicKey;
use picky::signature::SignatureAlgorithm;
use spki::AlgorithmIdentifierOwned;
use std::time::{Duration, SystemTime};

/// Content of a single certificate OCSP response, before signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseTemplate {
    pub status: CertStatus,
    pub serial_number: SerialNumber,
    pub this_update: SystemTime,
    pub next_update: SystemTime,
    /// Defaults to `this_update` for revoked certificates when unset
    pub revocation_time: Option<SystemTime>,
}

impl ResponseTemplate {
    /// `next_update` is `this_update + validity`.
    pub fn new(
        status: CertStatus,
        serial_number: SerialNumber,
        this_update: SystemTime,
        validity: Duration,
    ) -> Result<Self, OcspError> {
        let next_update = this_update
            .checked_add(validity)
            .ok_or(OcspError::ValidityOverflow(validity))?;

        Ok(Self {
            status,
            serial_number,
            this_update,
            next_update,
            revocation_time: None,
        })
    }

    pub fn revoked_at(mut self, revocation_time: SystemTime) -> Self {
        self.revocation_time = Some(revocation_time);
        self
    }

    pub fn to_single_response(&self, issuer: &IssuerIdentity) -> Result<SingleResponse, OcspError> {
        let cert_status = match self.status {
            CertStatus::Good => CertStatusInfo::Good(Null),
            CertStatus::Revoked => CertStatusInfo::Revoked(RevokedInfo {
                revocation_time: GeneralizedTime::from_system_time(self.revocation_time.unwrap_or(self.this_update))?,
                revocation_reason: None,
            }),
            CertStatus::Unknown => CertStatusInfo::Unknown(Null),
        };

        Ok(SingleResponse {
            cert_id: issuer.cert_id(&self.serial_number)?,
            cert_status,
            this_update: GeneralizedTime::from_system_time(self.this_update)?,
            next_update: Some(GeneralizedTime::from_system_time(self.next_update)?),
            single_extensions: None,
        })
    }

    /// Signs the response with the issuer key, the issuer acting as its own responder.
    ///
    /// Returns the DER encoding of a `successful` `OCSPResponse` wrapping a `BasicOCSPResponse`.
    /// Nothing is produced if signing fails.
    pub fn sign(&self, issuer: &IssuerIdentity, algorithm: SignatureAlgorithm) -> Result<Vec<u8>, OcspError> {
        let signature_algorithm = algorithm_identifier(algorithm)?;

        let tbs_response_data = ResponseData {
            version: Version::V1,
            responder_id: ResponderId::ByName(issuer.subject().clone()),
            produced_at: GeneralizedTime::from_system_time(self.this_update)?,
            responses: vec![self.to_single_response(issuer)?],
            response_extensions: None,
        };

        let signature = algorithm.sign(&tbs_response_data.to_der()?, issuer.private_key())?;

        let basic = BasicOcspResponse {
            tbs_response_data,
            signature_algorithm,
            signature: BitString::from_bytes(&signature)?,
            certs: None,
        };

        Ok(OcspResponse::successful(&basic)?.to_der()?)
    }
}

impl BasicOcspResponse {
    /// Verifies the response signature against the responder public key.
    pub fn verify(&self, public_key: &PublicKey) -> Result<(), OcspError> {
        let algorithm = signature_algorithm(&self.signature_algorithm)?;
        let tbs = self.tbs_response_data.to_der()?;
        algorithm.verify(public_key, &tbs, self.signature.raw_bytes())?;
        Ok(())
    }
}

impl SingleResponse {
    pub fn status(&self) -> CertStatus {
        match self.cert_status {
            CertStatusInfo::Good(_) => CertStatus::Good,
            CertStatusInfo::Revoked(_) => CertStatus::Revoked,
            CertStatusInfo::Unknown(_) => CertStatus::Unknown,
        }
    }
}

fn algorithm_identifier(algorithm: SignatureAlgorithm) -> Result<AlgorithmIdentifierOwned, OcspError> {
    // RSA identifiers carry explicit NULL parameters, ECDSA ones carry none (RFC 5758)
    let (oid, parameters) = match algorithm {
        SignatureAlgorithm::RsaPkcs1v15(HashAlgorithm::SHA1) => (oids::SHA1_WITH_RSA_ENCRYPTION, true),
        SignatureAlgorithm::RsaPkcs1v15(HashAlgorithm::SHA2_224) => (oids::SHA224_WITH_RSA_ENCRYPTION, true),
        SignatureAlgorithm::RsaPkcs1v15(HashAlgorithm::SHA2_256) => (oids::SHA256_WITH_RSA_ENCRYPTION, true),
        SignatureAlgorithm::RsaPkcs1v15(HashAlgorithm::SHA2_384) => (oids::SHA384_WITH_RSA_ENCRYPTION, true),
        SignatureAlgorithm::RsaPkcs1v15(HashAlgorithm::SHA2_512) => (oids::SHA512_WITH_RSA_ENCRYPTION, true),
        SignatureAlgorithm::Ecdsa(HashAlgorithm::SHA2_256) => (oids::ECDSA_WITH_SHA256, false),
        SignatureAlgorithm::Ecdsa(HashAlgorithm::SHA2_384) => (oids::ECDSA_WITH_SHA384, false),
        SignatureAlgorithm::Ecdsa(HashAlgorithm::SHA2_512) => (oids::ECDSA_WITH_SHA512, false),
        unsupported => return Err(OcspError::UnsupportedAlgorithm(format!("{:?}", unsupported))),
    };

    Ok(AlgorithmIdentifierOwned {
        oid,
        parameters: parameters.then(|| AnyRef::NULL.into()),
    })
}

fn signature_algorithm(identifier: &AlgorithmIdentifierOwned) -> Result<SignatureAlgorithm, OcspError> {
    const KNOWN_ALGORITHMS: [(ObjectIdentifier, SignatureAlgorithm); 8] = [
        (oids::SHA1_WITH_RSA_ENCRYPTION, SignatureAlgorithm::RsaPkcs1v15(HashAlgorithm::SHA1)),
        (oids::SHA224_WITH_RSA_ENCRYPTION, SignatureAlgorithm::RsaPkcs1v15(HashAlgorithm::SHA2_224)),
        (oids::SHA256_WITH_RSA_ENCRYPTION, SignatureAlgorithm::RsaPkcs1v15(HashAlgorithm::SHA2_256)),
        (oids::SHA384_WITH_RSA_ENCRYPTION, SignatureAlgorithm::RsaPkcs1v15(HashAlgorithm::SHA2_384)),
        (oids::SHA512_WITH_RSA_ENCRYPTION, SignatureAlgorithm::RsaPkcs1v15(HashAlgorithm::SHA2_512)),
        (oids::ECDSA_WITH_SHA256, SignatureAlgorithm::Ecdsa(HashAlgorithm::SHA2_256)),
        (oids::ECDSA_WITH_SHA384, SignatureAlgorithm::Ecdsa(HashAlgorithm::SHA2_384)),
        (oids::ECDSA_WITH_SHA512, SignatureAlgorithm::Ecdsa(HashAlgorithm::SHA2_512)),
    ];

    KNOWN_ALGORITHMS
        .iter()
        .find(|(oid, _)| *oid == identifier.oid)
        .map(|(_, algorithm)| *algorithm)
        .ok_or_else(|| OcspError::UnsupportedAlgorithm(identifier.oid.to_string()))
}
