//! Payload format v2.
//!
//! ```text
//! VERSION (1) | SALT (32) | CIPHERTEXT (2 + calc_padding(n)) | MAC (32)
//! ```

use super::{Payload, VER_LEN};
use crate::crypto::{MAC_LEN, SALT_LEN};
use crate::error::{Error, FormatError, Result};
use crate::padding::LENGTH_PREFIX_LEN;

/// Payload version handled by this module.
pub const VERSION_V2: u8 = 2;

const HEADER_LEN: usize = VER_LEN + SALT_LEN;

/// Smallest payload: a 1-byte plaintext padded to 32.
pub const MIN_PAYLOAD_LEN: usize = HEADER_LEN + LENGTH_PREFIX_LEN + 32 + MAC_LEN;
/// Largest payload: the longest plaintext padded to its bucket.
pub const MAX_PAYLOAD_LEN: usize = HEADER_LEN + LENGTH_PREFIX_LEN + 65536 + MAC_LEN;

/// Parses raw v2 payload bytes.
///
/// # Errors
///
/// Returns an error if the buffer is outside the v2 size range or carries a
/// different version byte.
pub fn parse(data: &[u8]) -> Result<Payload> {
    if data.len() < MIN_PAYLOAD_LEN || data.len() > MAX_PAYLOAD_LEN {
        return Err(FormatError::InvalidSize.into());
    }
    if data[0] != VERSION_V2 {
        return Err(Error::UnsupportedVersion);
    }

    let (header, rest) = data.split_at(HEADER_LEN);
    let (ciphertext, mac) = rest.split_at(rest.len() - MAC_LEN);

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&header[VER_LEN..]);
    let mut tag = [0u8; MAC_LEN];
    tag.copy_from_slice(mac);

    Ok(Payload::new(salt, ciphertext.to_vec(), tag))
}

/// Serializes a payload to raw v2 bytes.
///
/// # Errors
///
/// Returns an error if the payload is not v2.
pub fn serialize(payload: &Payload) -> Result<Vec<u8>> {
    if payload.version() != VERSION_V2 {
        return Err(Error::UnsupportedVersion);
    }

    let mut buf = Vec::with_capacity(HEADER_LEN + payload.ciphertext().len() + MAC_LEN);

    buf.push(VERSION_V2);
    buf.extend_from_slice(payload.salt());
    buf.extend_from_slice(payload.ciphertext());
    buf.extend_from_slice(payload.mac());

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::padding::{MAX_PLAINTEXT_SIZE, calc_padding};

    #[test]
    fn size_bounds() {
        assert_eq!(MIN_PAYLOAD_LEN, 99);
        assert_eq!(MAX_PAYLOAD_LEN, 65603);
        assert_eq!(
            MAX_PAYLOAD_LEN,
            HEADER_LEN + LENGTH_PREFIX_LEN + calc_padding(MAX_PLAINTEXT_SIZE - 1) + MAC_LEN
        );
    }

    #[test]
    fn parse_splits_fields() {
        let mut data = vec![VERSION_V2];
        data.extend_from_slice(&[7u8; SALT_LEN]);
        data.extend_from_slice(&[8u8; 34]);
        data.extend_from_slice(&[9u8; MAC_LEN]);

        let payload = parse(&data).unwrap();
        assert_eq!(payload.version(), VERSION_V2);
        assert_eq!(payload.salt(), &[7u8; SALT_LEN]);
        assert_eq!(payload.ciphertext(), &[8u8; 34]);
        assert_eq!(payload.mac(), &[9u8; MAC_LEN]);

        assert_eq!(serialize(&payload).unwrap(), data);
    }

    #[test]
    fn parse_too_short_fails() {
        let data = vec![VERSION_V2; MIN_PAYLOAD_LEN - 1];
        assert!(parse(&data).is_err());
    }

    #[test]
    fn parse_wrong_version_fails() {
        let mut data = vec![0u8; MIN_PAYLOAD_LEN];
        data[0] = 3;
        assert_eq!(parse(&data), Err(Error::UnsupportedVersion));
    }
}
