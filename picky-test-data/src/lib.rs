//! Test data shared between the picky OCSP crates.

// openssl req -x509 -newkey rsa:2048 -nodes -days 3650 -subj "/CN=Picky OCSP Test Authority" \
//     -set_serial 1 -addext basicConstraints=critical,CA:TRUE -keyout ca-key.pem -out ca-cert.pem
// openssl rsa -in ca-key.pem -traditional -out ca-key.pem
pub const OCSP_CA_CERT: &str = include_str!("../test_assets/ocsp/ca-cert.pem");
pub const OCSP_CA_KEY: &str = include_str!("../test_assets/ocsp/ca-key.pem");

// openssl req -newkey rsa:2048 -nodes -subj "/CN=localhost" -keyout server-key.pem -out server.csr
// openssl x509 -req -in server.csr -CA ca-cert.pem -CAkey ca-key.pem -days 3650 \
//     -set_serial 0x3A7F1C2B9D4E5F60718293A4B5C6D7E8 -out server-cert.pem
pub const OCSP_SERVER_CERT: &str = include_str!("../test_assets/ocsp/server-cert.pem");
pub const OCSP_SERVER_KEY: &str = include_str!("../test_assets/ocsp/server-key.pem");

/// Decimal rendering of the `server-cert.pem` serial number.
pub const OCSP_SERVER_SERIAL: &str = "77755216819522827257146252342218643432";

// SHA-1 hashes openssl puts in the CertID of requests for certificates issued by `ca-cert.pem`
pub const OCSP_ISSUER_NAME_HASH: &str = "4CCAA758275DAB054CD5FC3190712A25B95D6F84";
pub const OCSP_ISSUER_KEY_HASH: &str = "01FB808BBBBBF9FF23691C4813DF8771124E47CE";

// openssl ocsp -issuer ca-cert.pem -cert server-cert.pem -no_nonce -reqout req.der
// base64 -w0 req.der
pub const OCSP_REQUEST_B64: &str = include_str!("../test_assets/ocsp/req.b64");

// openssl ocsp -issuer ca-cert.pem -cert server-cert.pem -reqout req-nonce.der
// base64 -w0 req-nonce.der
pub const OCSP_REQUEST_NONCE_B64: &str = include_str!("../test_assets/ocsp/req-nonce.b64");

// openssl ocsp -issuer ca-cert.pem -serial 12345 -no_nonce -reqout req-12345.der
// base64 -w0 req-12345.der
pub const OCSP_REQUEST_12345_B64: &str = include_str!("../test_assets/ocsp/req-12345.b64");
