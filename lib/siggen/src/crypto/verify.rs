use super::PublicKey;
use miette::Diagnostic;
use rsa::{pkcs1v15::Signature, signature::Verifier};
use thiserror::Error;

/// Verification error
#[derive(Debug, Diagnostic, Error)]
pub enum VerifyError {
    /// Failed to decode the Base64 payload
    #[error(transparent)]
    Base64(#[from] base64_simd::Error),

    /// Verification failed
    #[error("Verification failed")]
    Verification,
}

/// Verify that the Base64 encoded signature was produced over the message by the key matching `key`
#[inline]
pub fn verify(msg: &[u8], encoded_signature: &str, key: &PublicKey) -> Result<(), VerifyError> {
    let signature = base64_simd::STANDARD.decode_to_vec(encoded_signature)?;
    let signature =
        Signature::try_from(signature.as_slice()).map_err(|_| VerifyError::Verification)?;

    key.verify(msg, &signature)
        .map_err(|_| VerifyError::Verification)
}
