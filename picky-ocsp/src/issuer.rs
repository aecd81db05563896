//! Identity of the certificate issuer answering OCSP requests

use crate::asn1::CertId;
use crate::error::OcspError;
use crate::oids;
use crate::serial::SerialNumber;
use der::asn1::{AnyRef, OctetString};
use der::{Decode, Encode};
use picky::hash::HashAlgorithm;
use picky::key::{PrivateKey, PublicKey};
use picky::pem::parse_pem;
use picky::x509::Cert;
use spki::AlgorithmIdentifierOwned;
use std::fmt;
use x509_cert::name::Name;
use x509_cert::Certificate;

/// Issuer certificate and private key.
///
/// The issuer signs responses for the certificates it issued, acting as its own
/// OCSP responder. Issuer hashes used in `CertID`s are computed once.
pub struct IssuerIdentity {
    cert: Cert,
    key: PrivateKey,
    subject: Name,
    name_hash: Vec<u8>,
    key_hash: Vec<u8>,
}

impl IssuerIdentity {
    pub fn from_der(cert_der: &[u8], key: PrivateKey) -> Result<Self, OcspError> {
        let cert = Cert::from_der(cert_der)?;

        if cert.public_key().to_der()? != key.to_public_key()?.to_der()? {
            return Err(OcspError::KeyMismatch);
        }

        // hashes are computed on the encoding found in the certificate, not on picky's re-encoding
        let tbs_certificate = Certificate::from_der(cert_der)?.tbs_certificate;
        let name_hash = HashAlgorithm::SHA1.digest(&tbs_certificate.subject.to_der()?);
        let public_key_bits = tbs_certificate.subject_public_key_info.subject_public_key.raw_bytes();
        let key_hash = HashAlgorithm::SHA1.digest(public_key_bits);

        Ok(Self {
            cert,
            key,
            subject: tbs_certificate.subject,
            name_hash,
            key_hash,
        })
    }

    pub fn from_pem_str(cert_pem: &str, key_pem: &str) -> Result<Self, OcspError> {
        let cert_pem = parse_pem(cert_pem)?;
        let key = PrivateKey::from_pem(&parse_pem(key_pem)?)?;
        Self::from_der(cert_pem.data(), key)
    }

    pub fn cert(&self) -> &Cert {
        &self.cert
    }

    pub fn public_key(&self) -> PublicKey {
        self.cert.public_key().clone()
    }

    pub(crate) fn private_key(&self) -> &PrivateKey {
        &self.key
    }

    /// Subject name of the issuer, used as responder ID.
    pub fn subject(&self) -> &Name {
        &self.subject
    }

    /// SHA-1 hash of the DER-encoded issuer subject name.
    pub fn name_hash(&self) -> &[u8] {
        &self.name_hash
    }

    /// SHA-1 hash of the issuer public key bits (excluding tag, length and unused bits count).
    pub fn key_hash(&self) -> &[u8] {
        &self.key_hash
    }

    /// Builds the SHA-1 `CertID` identifying `serial_number` under this issuer.
    pub fn cert_id(&self, serial_number: &SerialNumber) -> Result<CertId, OcspError> {
        Ok(CertId {
            hash_algorithm: AlgorithmIdentifierOwned {
                oid: oids::SHA1,
                parameters: Some(AnyRef::NULL.into()),
            },
            issuer_name_hash: OctetString::new(self.name_hash.clone())?,
            issuer_key_hash: OctetString::new(self.key_hash.clone())?,
            serial_number: serial_number.as_int().clone(),
        })
    }
}

impl fmt::Debug for IssuerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuerIdentity")
            .field("subject", &self.subject.to_string())
            .field("name_hash", &hex::encode(&self.name_hash))
            .field("key_hash", &hex::encode(&self.key_hash))
            .finish_non_exhaustive()
    }
}
