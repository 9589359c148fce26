//! Cryptographic primitives for the payload pipeline.
//!
//! Provides key agreement, key derivation, the stream cipher, the
//! authenticator and the randomness source.

pub mod cipher;
pub mod ecdh;
pub mod kdf;
pub mod mac;
pub mod random;

pub use cipher::chacha20;
pub use ecdh::{KeyAgreement, Secp256k1, x_only_public_key};
pub use kdf::{ConversationKey, MessageKeys, message_keys};
pub use mac::{hmac_sha256, verify};
pub use random::{OsRandom, RandomSource};

/// Domain separation string, used as HKDF extract salt and as expand info.
pub const DOMAIN: &[u8] = b"nip44-v2";
/// Length of keys: conversation key, encryption key, auth key (32 bytes).
pub const KEY_LEN: usize = 32;
/// Length of the per-message salt (32 bytes).
pub const SALT_LEN: usize = 32;
/// Length of the ChaCha20 nonce (12 bytes, IETF variant).
pub const NONCE_LEN: usize = 12;
/// Length of the HMAC-SHA256 tag (32 bytes).
pub const MAC_LEN: usize = 32;
