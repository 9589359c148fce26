use anyhow::{Context, Result, bail};
use std::io::{self, BufRead, IsTerminal};
use zeroize::Zeroizing;

/// Environment variable holding the local secret key as hex.
pub const SECRET_KEY_ENV: &str = "NIP44_SECRET_KEY";

/// Reads the local secret key.
///
/// Sources, in order: `NIP44_SECRET_KEY`, piped stdin, interactive prompt.
pub fn read_secret_key() -> Result<Zeroizing<[u8; 32]>> {
    let hex_key = read_secret_hex()?;
    parse_secret_key(&hex_key)
}

fn read_secret_hex() -> Result<Zeroizing<String>> {
    //  NIP44_SECRET_KEY=<hex> nip44 pubkey
    if let Ok(sk) = std::env::var(SECRET_KEY_ENV) {
        if !sk.is_empty() {
            return Ok(Zeroizing::new(sk));
        }
    }

    //  printf "%s" "$SECRET" | nip44 conversation-key --peer <hex>
    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().lock().read_line(&mut buf)?;
        let sk = Zeroizing::new(buf.trim().to_string());

        if !sk.is_empty() {
            return Ok(sk);
        }
    }

    if io::stdin().is_terminal() {
        let sk = Zeroizing::new(rpassword::prompt_password("Secret key (hex): ")?);
        if !sk.is_empty() {
            return Ok(sk);
        }
    }

    bail!("no secret key provided")
}

fn parse_secret_key(hex_key: &str) -> Result<Zeroizing<[u8; 32]>> {
    let mut key = Zeroizing::new([0u8; 32]);
    hex::decode_to_slice(hex_key.trim(), key.as_mut_slice())
        .context("secret key must be 32 bytes of hex")?;
    Ok(key)
}

/// Decodes a hex argument into exactly `N` bytes.
pub fn parse_hex_array<const N: usize>(name: &str, value: &str) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    hex::decode_to_slice(value.trim(), &mut out)
        .with_context(|| format!("{name} must be {N} bytes of hex"))?;
    Ok(out)
}
