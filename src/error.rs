//! Error types for the encryption pipeline.
//!
//! Every failure maps to a fixed message. Messages never carry key material,
//! plaintext or bytes taken from the payload.

use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Caller-supplied salt is not 32 bytes.
    #[error("salt must be 32 bytes")]
    InvalidSalt,

    #[error("unknown version")]
    UnsupportedVersion,

    #[error(transparent)]
    Format(#[from] FormatError),

    /// The payload tag does not match the ciphertext.
    #[error("invalid hmac")]
    Authentication,

    #[error(transparent)]
    Padding(#[from] PaddingError),

    /// Decrypted bytes are not valid UTF-8.
    #[error("invalid utf-8")]
    Encoding,

    #[error(transparent)]
    KeyAgreement(#[from] KeyAgreementError),

    #[error("key derivation failed")]
    KeyDerivation,

    #[error("OS random generator unavailable")]
    RandomSource,

    /// Conversation key input is not 32 bytes of hex.
    #[error("conversation key must be 32 bytes")]
    InvalidConversationKey,
}

/// Malformed transport encoding.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid base64")]
    InvalidBase64,

    #[error("invalid size")]
    InvalidSize,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PaddingError {
    /// Raised while padding a plaintext that is empty or too long.
    #[error("plaintext should be between 1b and 64kB")]
    PlaintextLength,

    /// Raised while stripping padding from a decrypted buffer.
    #[error("invalid padding")]
    Invalid,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum KeyAgreementError {
    #[error("invalid secret key")]
    InvalidSecretKey,

    #[error("invalid public key")]
    InvalidPublicKey,
}
