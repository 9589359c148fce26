//! Length padding.
//!
//! Plaintext lengths are rounded up into power-of-two scaled buckets so the
//! ciphertext length reveals only a coarse size class:
//!
//! ```text
//! LEN (2, big-endian) | PLAINTEXT (LEN) | ZERO FILL (calc_padding(LEN) - LEN)
//! ```

use zeroize::Zeroizing;

use crate::error::PaddingError;

/// Plaintexts must be strictly shorter than this many bytes.
pub const MAX_PLAINTEXT_SIZE: usize = 65536 - 128;
/// Size of the big-endian length prefix.
pub const LENGTH_PREFIX_LEN: usize = 2;

const MIN_PADDED_LEN: usize = 32;

/// Padded length for a plaintext of `len` bytes (prefix excluded).
///
/// Only lengths below [`MAX_PLAINTEXT_SIZE`] can be padded; larger inputs
/// still return a bucket, saturating at `usize::MAX`.
///
/// ```
/// use nip44::calc_padding;
///
/// assert_eq!(calc_padding(1), 32);
/// assert_eq!(calc_padding(33), 64);
/// assert_eq!(calc_padding(257), 320);
/// ```
pub fn calc_padding(len: usize) -> usize {
    if len <= MIN_PADDED_LEN {
        return MIN_PADDED_LEN;
    }
    // next_power = 2^(floor(log2(len - 1)) + 1), chunk = next_power / 8
    let chunk_shift = usize::BITS - (len - 1).leading_zeros() - 3;
    let chunk = MIN_PADDED_LEN.max(1usize << chunk_shift);
    chunk.saturating_mul((len - 1) / chunk + 1)
}

/// Prefixes `plaintext` with its length and zero-fills to its bucket.
pub fn pad(plaintext: &[u8]) -> Result<Zeroizing<Vec<u8>>, PaddingError> {
    let len = plaintext.len();
    if len < 1 || len >= MAX_PLAINTEXT_SIZE {
        return Err(PaddingError::PlaintextLength);
    }
    let padded_len = LENGTH_PREFIX_LEN + calc_padding(len);

    let mut out = Zeroizing::new(Vec::with_capacity(padded_len));
    out.extend_from_slice(&(len as u16).to_be_bytes());
    out.extend_from_slice(plaintext);
    out.resize(padded_len, 0);

    Ok(out)
}

/// Validates a padded buffer and returns the plaintext it carries.
///
/// The declared length must be in range, the buffer must be exactly the
/// bucket size for that length, and the fill must be all zero.
pub fn unpad(padded: &[u8]) -> Result<&[u8], PaddingError> {
    let Some((prefix, body)) = padded.split_first_chunk::<LENGTH_PREFIX_LEN>() else {
        return Err(PaddingError::Invalid);
    };
    let len = u16::from_be_bytes(*prefix) as usize;

    if len < 1 || len >= MAX_PLAINTEXT_SIZE {
        return Err(PaddingError::Invalid);
    }
    if body.len() != calc_padding(len) {
        return Err(PaddingError::Invalid);
    }

    let (plaintext, fill) = body.split_at(len);
    if fill.iter().any(|&b| b != 0) {
        return Err(PaddingError::Invalid);
    }

    Ok(plaintext)
}
