/// SkillSwap Crypto Library
///
/// At-rest encryption for direct message content. A single process-wide
/// AES-256-GCM key is loaded at startup; every message gets a fresh nonce.
/// Stored values carry a textual prefix so readers can tell ciphertext apart
/// from legacy plaintext rows written before encryption was enabled.

pub mod cipher;
pub mod keys;

pub use cipher::{CIPHERTEXT_PREFIX, Decrypted, MessageCipher, UNAVAILABLE_PLACEHOLDER, is_encrypted};
