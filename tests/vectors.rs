use nip44::{
    ConversationKey, EncryptOptions, Error, FormatError, KeyAgreementError, PaddingError,
    calc_padding, decrypt, encrypt, generate_conversation_key, message_keys,
};
use serde::Deserialize;
use sha2::{Digest, Sha256};

const VECTORS: &str = include_str!("vectors/nip44.vectors.json");

#[derive(Deserialize)]
struct Vectors {
    v2: V2,
}

#[derive(Deserialize)]
struct V2 {
    valid: Valid,
    invalid: Invalid,
}

#[derive(Deserialize)]
struct Valid {
    get_conversation_key: Vec<ConversationKeyCase>,
    get_message_keys: MessageKeysCases,
    calc_padded_len: Vec<(usize, usize)>,
    encrypt_decrypt: Vec<EncryptDecryptCase>,
    encrypt_decrypt_long_msg: Vec<LongMessageCase>,
}

#[derive(Deserialize)]
struct Invalid {
    encrypt_msg_lengths: Vec<usize>,
    get_conversation_key: Vec<InvalidConversationKeyCase>,
    decrypt: Vec<InvalidDecryptCase>,
}

#[derive(Deserialize)]
struct ConversationKeyCase {
    sec1: String,
    pub2: String,
    conversation_key: String,
}

#[derive(Deserialize)]
struct MessageKeysCases {
    conversation_key: String,
    keys: Vec<MessageKeysCase>,
}

#[derive(Deserialize)]
struct MessageKeysCase {
    salt: String,
    chacha_key: String,
    chacha_nonce: String,
    hmac_key: String,
}

#[derive(Deserialize)]
struct EncryptDecryptCase {
    conversation_key: String,
    salt: String,
    plaintext: String,
    payload: String,
}

#[derive(Deserialize)]
struct LongMessageCase {
    conversation_key: String,
    salt: String,
    pattern: String,
    repeat: usize,
    payload_sha256: String,
    payload_len: usize,
}

#[derive(Deserialize)]
struct InvalidConversationKeyCase {
    sec1: String,
    pub2: String,
    note: String,
}

#[derive(Deserialize)]
struct InvalidDecryptCase {
    conversation_key: String,
    payload: String,
    note: String,
}

fn vectors() -> V2 {
    serde_json::from_str::<Vectors>(VECTORS).unwrap().v2
}

fn secret(hex_str: &str) -> [u8; 32] {
    hex::decode(hex_str).unwrap().try_into().unwrap()
}

fn salt(hex_str: &str) -> [u8; 32] {
    hex::decode(hex_str).unwrap().try_into().unwrap()
}

#[test]
fn conversation_keys() {
    for case in vectors().valid.get_conversation_key {
        let key = generate_conversation_key(&secret(&case.sec1), &hex::decode(&case.pub2).unwrap())
            .unwrap();
        assert_eq!(key.to_hex(), case.conversation_key, "sec1 {}", case.sec1);
    }
}

#[test]
fn invalid_conversation_keys() {
    for case in vectors().invalid.get_conversation_key {
        let err = generate_conversation_key(&secret(&case.sec1), &hex::decode(&case.pub2).unwrap())
            .unwrap_err();
        let expected = match case.note.as_str() {
            "invalid secret key" => KeyAgreementError::InvalidSecretKey,
            _ => KeyAgreementError::InvalidPublicKey,
        };
        assert_eq!(err, Error::KeyAgreement(expected), "pub2 {}", case.pub2);
        assert_eq!(err.to_string(), case.note);
    }
}

#[test]
fn message_key_expansion() {
    let cases = vectors().valid.get_message_keys;
    let key = ConversationKey::from_hex(&cases.conversation_key).unwrap();

    for case in cases.keys {
        let keys = message_keys(&key, &salt(&case.salt)).unwrap();
        assert_eq!(hex::encode(keys.enc_key()), case.chacha_key);
        assert_eq!(hex::encode(keys.nonce()), case.chacha_nonce);
        assert_eq!(hex::encode(keys.auth_key()), case.hmac_key);
    }
}

#[test]
fn padded_lengths() {
    for (len, padded) in vectors().valid.calc_padded_len {
        assert_eq!(calc_padding(len), padded, "len {len}");
    }
}

#[test]
fn encrypt_and_decrypt() {
    for case in vectors().valid.encrypt_decrypt {
        let key = ConversationKey::from_hex(&case.conversation_key).unwrap();
        let options = EncryptOptions::new().with_salt(salt(&case.salt));

        let payload = encrypt(&key, &case.plaintext, &options).unwrap();
        assert_eq!(payload, case.payload, "plaintext {:?}", case.plaintext);

        assert_eq!(decrypt(&key, &case.payload).unwrap(), case.plaintext);
    }
}

#[test]
fn encrypt_and_decrypt_longest_message() {
    for case in vectors().valid.encrypt_decrypt_long_msg {
        let key = ConversationKey::from_hex(&case.conversation_key).unwrap();
        let plaintext = case.pattern.repeat(case.repeat);
        let options = EncryptOptions::new().with_salt(salt(&case.salt));

        let payload = encrypt(&key, &plaintext, &options).unwrap();
        assert_eq!(payload.len(), case.payload_len);
        assert_eq!(hex::encode(Sha256::digest(payload.as_bytes())), case.payload_sha256);

        assert_eq!(decrypt(&key, &payload).unwrap(), plaintext);
    }
}

#[test]
fn invalid_message_lengths() {
    let key = ConversationKey::from_bytes([1u8; 32]);
    for len in vectors().invalid.encrypt_msg_lengths {
        let plaintext = "x".repeat(len);
        assert_eq!(
            encrypt(&key, &plaintext, &EncryptOptions::default()),
            Err(Error::Padding(PaddingError::PlaintextLength)),
            "len {len}"
        );
    }
}

#[test]
fn invalid_payloads() {
    for case in vectors().invalid.decrypt {
        let key = ConversationKey::from_hex(&case.conversation_key).unwrap();
        let err = decrypt(&key, &case.payload).unwrap_err();

        let expected = match case.note.as_str() {
            "unknown version" => Error::UnsupportedVersion,
            "invalid base64" => Error::Format(FormatError::InvalidBase64),
            "invalid hmac" => Error::Authentication,
            "invalid padding" => Error::Padding(PaddingError::Invalid),
            other => panic!("unexpected note {other}"),
        };
        assert_eq!(err, expected, "payload {}", case.payload);
        assert_eq!(err.to_string(), case.note);
    }
}
