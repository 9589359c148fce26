//! Source of salts for new payloads.

use getrandom::fill;

use crate::error::{Error, Result};

/// Fills buffers with cryptographically secure random bytes.
///
/// Passed explicitly into [`crate::encrypt_with`] so tests can pin the salt.
pub trait RandomSource {
    fn fill_bytes(&self, buf: &mut [u8]) -> Result<()>;
}

/// The operating system generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, buf: &mut [u8]) -> Result<()> {
        fill(buf).map_err(|_| Error::RandomSource)
    }
}

/// Generate a fresh value of `N` random bytes.
pub fn random_array<const N: usize>(source: &impl RandomSource) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    source.fill_bytes(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl RandomSource for Failing {
        fn fill_bytes(&self, _buf: &mut [u8]) -> Result<()> {
            Err(Error::RandomSource)
        }
    }

    #[test]
    fn os_random_fills_buffer() {
        let a: [u8; 32] = random_array(&OsRandom).unwrap();
        let b: [u8; 32] = random_array(&OsRandom).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn failing_source_propagates() {
        assert_eq!(
            random_array::<32>(&Failing).unwrap_err(),
            Error::RandomSource
        );
    }
}
