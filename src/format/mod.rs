//! Transport framing for encrypted payloads.
//!
//! Provides version-aware parsing and serialization of the base64 payload.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::crypto::{MAC_LEN, SALT_LEN};
use crate::error::{Error, FormatError, Result};

pub mod v2;

/// Length of the version field.
pub const VER_LEN: usize = 1;
/// Latest payload version.
pub const CURRENT_VERSION: u8 = v2::VERSION_V2;
/// Leading character reserved for future, non-base64 encodings.
const NON_BASE64_FLAG: char = '#';

/// A decoded payload, prior to authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    version: u8,
    salt: [u8; SALT_LEN],
    ciphertext: Vec<u8>,
    mac: [u8; MAC_LEN],
}

impl Payload {
    /// Creates a payload at the current version.
    pub fn new(salt: [u8; SALT_LEN], ciphertext: Vec<u8>, mac: [u8; MAC_LEN]) -> Self {
        Self {
            version: CURRENT_VERSION,
            salt,
            ciphertext,
            mac,
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn mac(&self) -> &[u8; MAC_LEN] {
        &self.mac
    }
}

/// Decodes a transport string into a [`Payload`].
///
/// Checks run in a fixed order: version flag, base64, size, version byte.
///
/// # Errors
///
/// - [`Error::UnsupportedVersion`] for a `#` prefix or unknown version byte
/// - [`FormatError::InvalidBase64`] if the string is not standard base64
/// - [`FormatError::InvalidSize`] if the decoded length is out of range
pub fn decode(payload: &str) -> Result<Payload> {
    if payload.starts_with(NON_BASE64_FLAG) {
        return Err(Error::UnsupportedVersion);
    }

    let data = STANDARD
        .decode(payload)
        .map_err(|_| FormatError::InvalidBase64)?;

    if !(v2::MIN_PAYLOAD_LEN..=v2::MAX_PAYLOAD_LEN).contains(&data.len()) {
        return Err(FormatError::InvalidSize.into());
    }

    match data[0] {
        v2::VERSION_V2 => v2::parse(&data),
        _ => Err(Error::UnsupportedVersion),
    }
}

/// Serializes a [`Payload`] to its base64 transport form.
///
/// # Errors
///
/// Returns an error if the version is unsupported.
pub fn encode(payload: &Payload) -> Result<String> {
    let raw = match payload.version() {
        v2::VERSION_V2 => v2::serialize(payload)?,
        _ => return Err(Error::UnsupportedVersion),
    };
    Ok(STANDARD.encode(raw))
}
