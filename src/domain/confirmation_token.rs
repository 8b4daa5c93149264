//! Module that includes the confirmation token type and its generator.

use rand::rngs::OsRng;
use rand::RngCore;

/// The 62-symbol alphabet used for confirmation tokens.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Largest multiple of the alphabet size that fits in a byte (4 * 62).
/// Bytes at or above this value are discarded and redrawn, so every symbol
/// is picked with exactly the same probability.
const REJECTION_CEILING: u8 = 248;

/// Raised when the OS entropy source cannot satisfy a read.
#[derive(thiserror::Error, Debug)]
#[error("failed to read from the system entropy source")]
pub struct TokenGenerationError(#[from] rand::Error);

/// A single-use credential that guards the confirmation step.
///
/// # Description
///
/// Tokens are opaque, random, alphanumeric strings. They are generated from
/// the OS cryptographically secure random source, never from a
/// general-purpose PRNG: whoever holds a token can confirm the subscription
/// it was issued for.
#[derive(Debug, Clone)]
pub struct ConfirmationToken(String);

impl ConfirmationToken {
    /// Token length used throughout the application.
    pub const STANDARD_LENGTH: usize = 32;

    /// Generate a fresh random token of `length` symbols.
    pub fn generate(length: usize) -> Result<ConfirmationToken, TokenGenerationError> {
        let mut token = String::with_capacity(length);
        let mut buffer = [0u8; 64];

        while token.len() < length {
            OsRng.try_fill_bytes(&mut buffer)?;
            for &byte in buffer.iter() {
                if byte >= REJECTION_CEILING {
                    continue;
                }
                token.push(ALPHABET[(byte % ALPHABET.len() as u8) as usize] as char);
                if token.len() == length {
                    break;
                }
            }
        }

        Ok(Self(token))
    }
}

impl AsRef<str> for ConfirmationToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
