//! secp256k1 key agreement.
//!
//! Only the X coordinate of the shared point leaves this module; the rest of
//! the pipeline sees 32 opaque bytes.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{PublicKey, SecretKey, ecdh::diffie_hellman};
use zeroize::Zeroizing;

use super::KEY_LEN;
use crate::error::KeyAgreementError;

/// Length of an x-only public key.
pub const X_ONLY_LEN: usize = 32;
const COMPRESSED_LEN: usize = 33;
const UNCOMPRESSED_LEN: usize = 65;

/// Computes the X coordinate of `secret_key * public_key`.
pub trait KeyAgreement {
    fn shared_x(
        &self,
        secret_key: &[u8; KEY_LEN],
        public_key: &[u8],
    ) -> Result<Zeroizing<[u8; KEY_LEN]>, KeyAgreementError>;
}

/// Key agreement on secp256k1 backed by `k256`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1;

impl KeyAgreement for Secp256k1 {
    fn shared_x(
        &self,
        secret_key: &[u8; KEY_LEN],
        public_key: &[u8],
    ) -> Result<Zeroizing<[u8; KEY_LEN]>, KeyAgreementError> {
        let secret = parse_secret_key(secret_key)?;
        let public = parse_public_key(public_key)?;

        let shared = diffie_hellman(secret.to_nonzero_scalar(), public.as_affine());

        let mut x = Zeroizing::new([0u8; KEY_LEN]);
        x.copy_from_slice(shared.raw_secret_bytes());
        Ok(x)
    }
}

/// Returns the x-only (BIP-340 style) public key for a secret key.
pub fn x_only_public_key(secret_key: &[u8; KEY_LEN]) -> Result<[u8; X_ONLY_LEN], KeyAgreementError> {
    let secret = parse_secret_key(secret_key)?;
    let point = secret.public_key().to_encoded_point(true);

    let mut x = [0u8; X_ONLY_LEN];
    x.copy_from_slice(&point.as_bytes()[1..]);
    Ok(x)
}

fn parse_secret_key(bytes: &[u8; KEY_LEN]) -> Result<SecretKey, KeyAgreementError> {
    // rejects zero and scalars >= n
    SecretKey::from_slice(bytes).map_err(|_| KeyAgreementError::InvalidSecretKey)
}

/// Accepts x-only keys (even Y is implied) as well as SEC1 encodings.
fn parse_public_key(bytes: &[u8]) -> Result<PublicKey, KeyAgreementError> {
    match bytes.len() {
        X_ONLY_LEN => {
            let mut sec1 = [0u8; COMPRESSED_LEN];
            sec1[0] = 0x02;
            sec1[1..].copy_from_slice(bytes);
            PublicKey::from_sec1_bytes(&sec1)
        }
        COMPRESSED_LEN | UNCOMPRESSED_LEN => PublicKey::from_sec1_bytes(bytes),
        _ => return Err(KeyAgreementError::InvalidPublicKey),
    }
    .map_err(|_| KeyAgreementError::InvalidPublicKey)
}
