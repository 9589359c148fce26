use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::{ChaCha20, Key, Nonce};

use super::{KEY_LEN, NONCE_LEN};

/// Applies the ChaCha20 keystream to `data` in place.
///
/// Encryption and decryption are the same operation. The cipher gives no
/// integrity; callers authenticate the output separately.
pub fn apply_keystream(key: &[u8; KEY_LEN], nonce: &[u8; NONCE_LEN], data: &mut [u8]) {
    let mut cipher = ChaCha20::new(Key::from_slice(key), Nonce::from_slice(nonce));
    cipher.apply_keystream(data);
}

/// Encrypts or decrypts `message`, returning a buffer of the same length.
pub fn chacha20(key: &[u8; KEY_LEN], nonce: &[u8; NONCE_LEN], message: &[u8]) -> Vec<u8> {
    let mut out = message.to_vec();
    apply_keystream(key, nonce, &mut out);
    out
}
