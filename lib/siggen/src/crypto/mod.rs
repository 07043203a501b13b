//!
//! Signing and verification of request bodies
//!
//! The scheme is fixed to RSASSA-PKCS1-v1_5 over SHA-256, which is what Java calls "SHA256withRSA".
//! Signatures travel as standard Base64 without line breaks.
//!

use miette::Diagnostic;
use thiserror::Error;

mod sign;
mod verify;

pub mod parse;

pub use self::parse::{KeyError, PublicKey};
pub use self::sign::{sign, sign_with_credential, SignError, SigningKey};
pub use self::verify::{verify, VerifyError};

/// Error of the one-shot signing operation
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Credential couldn't be decoded into an RSA private key
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Signing itself failed
    #[error(transparent)]
    Sign(#[from] SignError),
}
