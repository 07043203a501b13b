//!
//! Parse RSA keys for use by the body signer
//!

use const_oid::db::rfc5912::RSA_ENCRYPTION;
use miette::Diagnostic;
use pkcs8::{der::Decode, Document, PrivateKeyInfo, SecretDocument, SubjectPublicKeyInfoRef};
use rsa::{pkcs1, pkcs1v15::VerifyingKey, BigUint, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use thiserror::Error;

/// Largest modulus accepted for public keys, in bits
pub const MAX_MODULUS_BITS: usize = 16_384;

/// Verifying key accepted by [`verify`](super::verify)
pub type PublicKey = VerifyingKey<Sha256>;

/// Key parsing error
#[derive(Debug, Diagnostic, Error)]
pub enum KeyError {
    /// Credential isn't valid Base64
    #[error(transparent)]
    Base64(#[from] base64_simd::Error),

    /// Malformed DER structure
    #[error(transparent)]
    Der(#[from] pkcs8::der::Error),

    /// Malformed key
    #[error("Malformed key")]
    MalformedKey,

    /// Malformed PKCS#8 document
    #[error(transparent)]
    Pkcs8(#[from] pkcs8::Error),

    /// Key components rejected
    #[error(transparent)]
    Rsa(#[from] rsa::Error),

    /// Key is not an RSA key
    #[error("Unknown key type")]
    UnknownKeyType,
}

/// Parse an RSA private key from its PKCS#8 DER form
///
/// The modulus size isn't restricted
#[inline]
pub fn private_key_der(der: &[u8]) -> Result<RsaPrivateKey, KeyError> {
    let private_key_info = PrivateKeyInfo::from_der(der)?;
    if private_key_info.algorithm.oid != RSA_ENCRYPTION {
        return Err(KeyError::UnknownKeyType);
    }

    Ok(RsaPrivateKey::try_from(private_key_info)?)
}

/// Parse an RSA private key from its PKCS#8 PEM form (`BEGIN PRIVATE KEY`)
#[inline]
pub fn private_key_pem(pem: &str) -> Result<RsaPrivateKey, KeyError> {
    let (_tag_line, document) = SecretDocument::from_pem(pem)?;
    private_key_der(document.as_bytes())
}

/// Parse an RSA public key from its SPKI PEM form (`BEGIN PUBLIC KEY`)
#[inline]
pub fn public_key(pem: &str) -> Result<PublicKey, KeyError> {
    let (_pem_tag, document) = Document::from_pem(pem)?;
    let spki: SubjectPublicKeyInfoRef<'_> = document.decode_msg()?;

    if spki.algorithm.oid != RSA_ENCRYPTION {
        return Err(KeyError::UnknownKeyType);
    }

    let raw_bytes = spki
        .subject_public_key
        .as_bytes()
        .ok_or(KeyError::MalformedKey)?;
    let key = pkcs1::RsaPublicKey::from_der(raw_bytes)?;

    let public_key = RsaPublicKey::new_with_max_size(
        BigUint::from_bytes_be(key.modulus.as_bytes()),
        BigUint::from_bytes_be(key.public_exponent.as_bytes()),
        MAX_MODULUS_BITS,
    )?;

    Ok(VerifyingKey::new(public_key))
}
