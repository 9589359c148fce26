use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::{KEY_LEN, MAC_LEN};
use crate::error::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 of `ciphertext` under `key`.
pub fn hmac_sha256(key: &[u8; KEY_LEN], ciphertext: &[u8]) -> Result<[u8; MAC_LEN]> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| Error::KeyDerivation)?;
    mac.update(ciphertext);
    Ok(mac.finalize().into_bytes().into())
}

/// Checks `tag` against the HMAC of `ciphertext` in constant time.
pub fn verify(key: &[u8; KEY_LEN], ciphertext: &[u8], tag: &[u8; MAC_LEN]) -> Result<()> {
    let expected = hmac_sha256(key, ciphertext)?;
    if bool::from(expected.ct_eq(tag)) {
        Ok(())
    } else {
        Err(Error::Authentication)
    }
}
