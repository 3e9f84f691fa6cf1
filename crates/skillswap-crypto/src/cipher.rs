use std::fmt;

use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, KeyInit, OsRng, rand_core::RngCore},
};
use anyhow::{Result, anyhow};
use base64::{
    Engine as _,
    engine::general_purpose::{STANDARD as BASE64, URL_SAFE as BASE64_URL},
};

use crate::keys::key_from_base64;

/// Marks a stored value as ciphertext produced by [`MessageCipher::encrypt`].
/// Anything without it is treated as legacy plaintext.
pub const CIPHERTEXT_PREFIX: &str = "enc:v1:";

/// Shown in place of content that carries the prefix but cannot be decrypted
/// with the active key.
pub const UNAVAILABLE_PLACEHOLDER: &str = "[message unavailable]";

const NONCE_LEN: usize = 12;

/// Fernet tokens (written by the previous message store) open with the
/// version byte 0x80 and a big-endian timestamp, which base64 renders as
/// `gAAAAA`.
const FERNET_PREFIX: &str = "gAAAAA";
const FERNET_VERSION: u8 = 0x80;
/// version + timestamp + IV + one AES block + HMAC-SHA256.
const FERNET_MIN_LEN: usize = 1 + 8 + 16 + 16 + 32;

/// Result of reading a stored message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decrypted {
    /// Real content: either decrypted ciphertext or legacy plaintext.
    Text(String),
    /// Ciphertext that the active key cannot open (rotated key, corruption).
    Degraded,
}

impl Decrypted {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded)
    }

    /// The text to display; the placeholder when degraded.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Degraded => UNAVAILABLE_PLACEHOLDER,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Degraded => UNAVAILABLE_PLACEHOLDER.to_string(),
        }
    }
}

/// Returns true when `stored` is ciphertext: ours, or a Fernet token left by
/// the previous store.
pub fn is_encrypted(stored: &str) -> bool {
    stored.starts_with(CIPHERTEXT_PREFIX) || is_fernet_token(stored)
}

fn is_fernet_token(stored: &str) -> bool {
    if !stored.starts_with(FERNET_PREFIX) {
        return false;
    }
    match BASE64_URL.decode(stored.trim_end()) {
        Ok(raw) => raw.len() >= FERNET_MIN_LEN && raw[0] == FERNET_VERSION,
        Err(_) => false,
    }
}

/// Encrypts and decrypts message bodies with AES-256-GCM.
///
/// Output format: `enc:v1:` followed by base64 of `nonce || ciphertext`.
#[derive(Clone)]
pub struct MessageCipher {
    cipher: Aes256Gcm,
}

impl fmt::Debug for MessageCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageCipher").finish_non_exhaustive()
    }
}

impl MessageCipher {
    pub fn new(key: &[u8; 32]) -> Self {
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key)),
        }
    }

    /// Build a cipher from a base64 key, as found in configuration.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        Ok(Self::new(&key_from_base64(encoded)?))
    }

    /// Encrypt a message body. Empty input stays empty.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        if plaintext.is_empty() {
            return Ok(String::new());
        }

        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| anyhow!("Encryption failed: {}", e))?;

        let mut payload = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        payload.extend_from_slice(&nonce_bytes);
        payload.extend_from_slice(&ciphertext);

        Ok(format!("{}{}", CIPHERTEXT_PREFIX, BASE64.encode(payload)))
    }

    /// Decrypt a stored body. Never fails: plaintext passes through as
    /// legacy content, undecryptable ciphertext (including Fernet tokens,
    /// whose key is not ours) comes back as [`Decrypted::Degraded`].
    pub fn decrypt(&self, stored: &str) -> Decrypted {
        match stored.strip_prefix(CIPHERTEXT_PREFIX) {
            Some(encoded) => self
                .open(encoded)
                .map(Decrypted::Text)
                .unwrap_or(Decrypted::Degraded),
            None if is_fernet_token(stored) => Decrypted::Degraded,
            None => Decrypted::Text(stored.to_string()),
        }
    }

    fn open(&self, encoded: &str) -> Option<String> {
        let payload = BASE64.decode(encoded).ok()?;
        if payload.len() < NONCE_LEN {
            return None;
        }
        let (nonce_bytes, ciphertext) = payload.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .ok()?;
        String::from_utf8(plaintext).ok()
    }
}
