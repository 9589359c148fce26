//! Versioned, padded and authenticated encryption for direct messages
//! between two secp256k1 key pairs (payload version 2).
//!
//! ```
//! use nip44::{EncryptOptions, decrypt, encrypt, generate_conversation_key, x_only_public_key};
//!
//! let alice = [0x11u8; 32];
//! let bob = [0x22u8; 32];
//!
//! let key = generate_conversation_key(&alice, &x_only_public_key(&bob)?)?;
//! let payload = encrypt(&key, "hello bob", &EncryptOptions::default())?;
//!
//! let key = generate_conversation_key(&bob, &x_only_public_key(&alice)?)?;
//! assert_eq!(decrypt(&key, &payload)?, "hello bob");
//! # Ok::<(), nip44::Error>(())
//! ```
//!
//! Payloads carry no replay protection; callers deduplicate.

pub mod crypto;
mod error;
pub mod format;
pub mod padding;

use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::{cipher, kdf, mac, random};
use crate::format::Payload;

pub use crate::crypto::{
    ConversationKey, DOMAIN, KEY_LEN, KeyAgreement, MAC_LEN, MessageKeys, NONCE_LEN, OsRandom,
    RandomSource, SALT_LEN, Secp256k1, message_keys, x_only_public_key,
};
pub use crate::error::{Error, FormatError, KeyAgreementError, PaddingError, Result};
pub use crate::padding::{MAX_PLAINTEXT_SIZE, calc_padding, pad, unpad};

/// Payload version produced by [`encrypt`].
pub const VERSION: u8 = format::CURRENT_VERSION;

/// Optional overrides for [`encrypt`].
#[derive(Debug, Clone, Default)]
pub struct EncryptOptions {
    salt: Option<Vec<u8>>,
    version: Option<u8>,
}

impl EncryptOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `salt` instead of fresh random bytes. Must be 32 bytes.
    pub fn with_salt(mut self, salt: impl Into<Vec<u8>>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    pub fn with_version(mut self, version: u8) -> Self {
        self.version = Some(version);
        self
    }
}

/// Derives the conversation key between `secret_key` and the peer's
/// `public_key` (x-only or SEC1).
pub fn generate_conversation_key(secret_key: &[u8; 32], public_key: &[u8]) -> Result<ConversationKey> {
    ConversationKey::derive(&Secp256k1, secret_key, public_key)
}

/// Encrypts `plaintext` into a base64 payload, drawing the salt from the OS
/// generator unless one is supplied.
pub fn encrypt(
    conversation_key: &ConversationKey,
    plaintext: &str,
    options: &EncryptOptions,
) -> Result<String> {
    encrypt_with(conversation_key, plaintext, options, &OsRandom)
}

/// Like [`encrypt`], with an explicit randomness source.
pub fn encrypt_with(
    conversation_key: &ConversationKey,
    plaintext: &str,
    options: &EncryptOptions,
    rng: &impl RandomSource,
) -> Result<String> {
    let version = options.version.unwrap_or(VERSION);
    if version != VERSION {
        return Err(Error::UnsupportedVersion);
    }

    let salt: [u8; SALT_LEN] = match &options.salt {
        Some(salt) => salt.as_slice().try_into().map_err(|_| Error::InvalidSalt)?,
        None => random::random_array(rng)?,
    };

    let keys = kdf::message_keys(conversation_key, &salt)?;

    let mut padded = padding::pad(plaintext.as_bytes())?;
    cipher::apply_keystream(keys.enc_key(), keys.nonce(), &mut padded);
    let ciphertext = std::mem::take(&mut *padded);

    let tag = mac::hmac_sha256(keys.auth_key(), &ciphertext)?;

    let encoded = format::encode(&Payload::new(salt, ciphertext, tag))?;
    debug!(version, payload_len = encoded.len(), "encrypted payload");
    Ok(encoded)
}

/// Decrypts a base64 payload.
///
/// Validation order is fixed: framing, version, authentication, padding,
/// then UTF-8. Nothing is decrypted before the tag checks out.
pub fn decrypt(conversation_key: &ConversationKey, payload: &str) -> Result<String> {
    let result = open(conversation_key, payload);
    if let Err(err) = &result {
        debug!(error = %err, payload_len = payload.len(), "rejected payload");
    }
    result
}

fn open(conversation_key: &ConversationKey, payload: &str) -> Result<String> {
    let payload = format::decode(payload)?;

    let keys = kdf::message_keys(conversation_key, payload.salt())?;
    mac::verify(keys.auth_key(), payload.ciphertext(), payload.mac())?;

    let padded = Zeroizing::new(cipher::chacha20(
        keys.enc_key(),
        keys.nonce(),
        payload.ciphertext(),
    ));
    let plaintext = padding::unpad(&padded)?;

    let text = std::str::from_utf8(plaintext).map_err(|_| Error::Encoding)?;
    Ok(text.to_owned())
}
