use aes_gcm::aead::OsRng;
use aes_gcm::aead::rand_core::RngCore;
use anyhow::{Result, anyhow};
use base64::{
    Engine as _,
    engine::general_purpose::{STANDARD as BASE64, URL_SAFE as BASE64_URL},
};

/// Generate a random 256-bit key for message encryption at rest.
pub fn generate_message_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    key
}

/// Encode a key to base64 for storing in the environment.
pub fn key_to_base64(key: &[u8; 32]) -> String {
    BASE64.encode(key)
}

/// Decode a base64 key. Both the standard and the URL-safe alphabet are
/// accepted so keys minted by older tooling keep loading.
pub fn key_from_base64(encoded: &str) -> Result<[u8; 32]> {
    let encoded = encoded.trim();
    let bytes = BASE64
        .decode(encoded)
        .or_else(|_| BASE64_URL.decode(encoded))
        .map_err(|e| anyhow!("Invalid key encoding: {}", e))?;
    let key: [u8; 32] = bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow!("Invalid key length: expected 32 bytes, got {}", b.len()))?;
    Ok(key)
}
