//! Cryptographic utilities for share-token generation.

use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

/// Number of random bytes behind a snapshot share token (128 bits).
pub const SHARE_TOKEN_BYTES: usize = 16;

/// The operating system's random source could not be read.
#[derive(Debug, Error)]
#[error("secure random source unavailable: {0}")]
pub struct RandomnessError(String);

/// Generates `len` bytes from the OS CSPRNG and returns them hex encoded.
///
/// The resulting string is `2 * len` lowercase hex characters.
pub fn generate_hex_token(len: usize) -> Result<String, RandomnessError> {
    let mut bytes = vec![0u8; len];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| RandomnessError(e.to_string()))?;
    Ok(hex::encode(bytes))
}

/// Generates a snapshot share token: 16 random bytes, 32 hex characters.
pub fn generate_share_token() -> Result<String, RandomnessError> {
    generate_hex_token(SHARE_TOKEN_BYTES)
}
