//! OIDs used by OCSP requests and responses

use der::oid::ObjectIdentifier;

macro_rules! define_oid {
    ( $( $uppercase:ident => $str_value:literal, )+ ) => {
        $( pub const $uppercase: ObjectIdentifier = ObjectIdentifier::new_unwrap($str_value); )+
    };
}

define_oid! {
    // hash algorithms
    SHA1 => "1.3.14.3.2.26",

    // signature algorithms
    SHA1_WITH_RSA_ENCRYPTION => "1.2.840.113549.1.1.5",
    SHA224_WITH_RSA_ENCRYPTION => "1.2.840.113549.1.1.14",
    SHA256_WITH_RSA_ENCRYPTION => "1.2.840.113549.1.1.11",
    SHA384_WITH_RSA_ENCRYPTION => "1.2.840.113549.1.1.12",
    SHA512_WITH_RSA_ENCRYPTION => "1.2.840.113549.1.1.13",
    ECDSA_WITH_SHA256 => "1.2.840.10045.4.3.2",
    ECDSA_WITH_SHA384 => "1.2.840.10045.4.3.3",
    ECDSA_WITH_SHA512 => "1.2.840.10045.4.3.4",

    // ocsp
    OCSP_BASIC_RESPONSE => "1.3.6.1.5.5.7.48.1.1",
    OCSP_NONCE => "1.3.6.1.5.5.7.48.1.2",
}
