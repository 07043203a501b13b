use super::{
    parse::{self, KeyError, PublicKey},
    Error as CryptoError,
};
use miette::Diagnostic;
use rsa::{
    pkcs1v15,
    signature::{Keypair, SignatureEncoding, Signer},
    traits::PublicKeyParts,
};
use sha2::Sha256;
use std::fmt;
use thiserror::Error;

/// Signing failure reported by the cryptography backend
#[derive(Debug, Diagnostic, Error)]
#[error("Failed to sign payload")]
pub struct SignError;

/// RSA signing key
///
/// Load it once at startup and share it. Signing only needs a shared reference.
pub struct SigningKey {
    inner: pkcs1v15::SigningKey<Sha256>,
}

impl SigningKey {
    /// Decode a key from the Base64 encoding of its PKCS#8 DER form
    ///
    /// ASCII whitespace inside the encoding is ignored, so line-wrapped values work too
    pub fn from_base64_pkcs8(encoded: &str) -> Result<Self, KeyError> {
        let encoded: String = encoded.split_ascii_whitespace().collect();
        let der = base64_simd::STANDARD.decode_to_vec(encoded)?;

        Self::from_pkcs8_der(&der)
    }

    /// Parse a key from its PKCS#8 DER form
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self, KeyError> {
        parse::private_key_der(der).map(|key| Self {
            inner: pkcs1v15::SigningKey::new(key),
        })
    }

    /// Parse a key from its PKCS#8 PEM form
    pub fn from_pkcs8_pem(pem: &str) -> Result<Self, KeyError> {
        parse::private_key_pem(pem).map(|key| Self {
            inner: pkcs1v15::SigningKey::new(key),
        })
    }

    /// Key that verifies signatures created by this key
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        self.inner.verifying_key()
    }

    /// Sign the message
    ///
    /// PKCS#1 v1.5 padding is deterministic, so the same message and key always produce the same signature
    pub fn sign(&self, msg: &[u8]) -> Result<Vec<u8>, SignError> {
        self.inner
            .try_sign(msg)
            .map(|signature| signature.to_vec())
            .map_err(|_| SignError)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("modulus_len", &self.inner.as_ref().size())
            .finish_non_exhaustive()
    }
}

/// Sign the payload and encode the signature in Base64
#[inline]
pub fn sign(payload: &[u8], key: &SigningKey) -> Result<String, SignError> {
    key.sign(payload)
        .map(|signature| base64_simd::STANDARD.encode_to_string(signature))
}

/// Decode the Base64 PKCS#8 credential and sign the payload with it
///
/// Decoding the key for every call is wasteful. Prefer loading a [`SigningKey`] once and calling [`sign`].
#[inline]
pub fn sign_with_credential(payload: &[u8], credential: &str) -> Result<String, CryptoError> {
    let key = SigningKey::from_base64_pkcs8(credential)?;
    Ok(sign(payload, &key)?)
}
