use std::fmt;

use hkdf::Hkdf;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::{DOMAIN, KEY_LEN, NONCE_LEN, SALT_LEN, ecdh::KeyAgreement};
use crate::error::{Error, Result};

const MESSAGE_KEYS_LEN: usize = KEY_LEN + NONCE_LEN + KEY_LEN;

/// Symmetric key shared by the two parties of a conversation.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ConversationKey([u8; KEY_LEN]);

impl ConversationKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let key: [u8; KEY_LEN] = bytes
            .try_into()
            .map_err(|_| Error::InvalidConversationKey)?;
        Ok(Self(key))
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = Zeroizing::new(hex::decode(s).map_err(|_| Error::InvalidConversationKey)?);
        Self::from_slice(&bytes)
    }

    /// Derives the key from our secret key and the peer's public key.
    ///
    /// The shared X coordinate is run through HKDF-extract with the domain
    /// string as salt; both sides of the conversation arrive at the same key.
    pub fn derive(
        agreement: &impl KeyAgreement,
        secret_key: &[u8; KEY_LEN],
        public_key: &[u8],
    ) -> Result<Self> {
        let shared_x = agreement.shared_x(secret_key, public_key)?;
        let (prk, _) = Hkdf::<Sha256>::extract(Some(DOMAIN), shared_x.as_slice());

        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&prk);
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl PartialEq for ConversationKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for ConversationKey {}

impl fmt::Debug for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConversationKey(..)")
    }
}

/// Per-message keys, expanded from the conversation key and the salt.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MessageKeys {
    enc_key: [u8; KEY_LEN],
    nonce: [u8; NONCE_LEN],
    auth_key: [u8; KEY_LEN],
}

impl MessageKeys {
    pub fn enc_key(&self) -> &[u8; KEY_LEN] {
        &self.enc_key
    }

    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    pub fn auth_key(&self) -> &[u8; KEY_LEN] {
        &self.auth_key
    }
}

/// Expands `conversation_key` and `salt` into encryption key, nonce and
/// authentication key, in that order.
pub fn message_keys(conversation_key: &ConversationKey, salt: &[u8; SALT_LEN]) -> Result<MessageKeys> {
    let hk = Hkdf::<Sha256>::new(Some(salt.as_slice()), conversation_key.as_bytes());

    let mut okm = Zeroizing::new([0u8; MESSAGE_KEYS_LEN]);
    hk.expand(DOMAIN, okm.as_mut_slice())
        .map_err(|_| Error::KeyDerivation)?;

    let mut keys = MessageKeys {
        enc_key: [0u8; KEY_LEN],
        nonce: [0u8; NONCE_LEN],
        auth_key: [0u8; KEY_LEN],
    };
    keys.enc_key.copy_from_slice(&okm[..KEY_LEN]);
    keys.nonce
        .copy_from_slice(&okm[KEY_LEN..KEY_LEN + NONCE_LEN]);
    keys.auth_key.copy_from_slice(&okm[KEY_LEN + NONCE_LEN..]);

    Ok(keys)
}
