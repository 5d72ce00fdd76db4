use std::path::Path;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use anyhow::Context;
use base64::Engine as _;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// AES-256-GCM cipher for note bodies. Output format:
/// `v1:<base64 nonce>:<base64 ciphertext>` with a fresh 96-bit nonce per
/// encryption.
#[derive(Clone)]
pub struct NoteCipher {
    cipher: Aes256Gcm,
}

impl NoteCipher {
    pub fn new(key: &[u8; 32]) -> Self {
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key)),
        }
    }

    /// Derive the key from an operator-provided secret.
    pub fn from_secret(secret: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        let out = hasher.finalize();
        let mut k = [0u8; 32];
        k.copy_from_slice(&out);
        Self::new(&k)
    }

    pub fn encrypt(&self, plaintext: &str) -> anyhow::Result<String> {
        let mut nonce_bytes = [0u8; 12];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);
        let ct = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| anyhow::anyhow!("encrypt failed: {}", e))?;
        let n_b64 = base64::engine::general_purpose::STANDARD.encode(nonce_bytes);
        let c_b64 = base64::engine::general_purpose::STANDARD.encode(ct);
        Ok(format!("v1:{}:{}", n_b64, c_b64))
    }

    pub fn decrypt(&self, ciphertext: &str) -> anyhow::Result<String> {
        // Bodies written before encryption was enabled are stored as-is
        if !ciphertext.starts_with("v1:") {
            return Ok(ciphertext.to_string());
        }
        let parts: Vec<&str> = ciphertext.splitn(3, ':').collect();
        if parts.len() != 3 {
            anyhow::bail!("invalid format");
        }
        let nonce_bytes = base64::engine::general_purpose::STANDARD
            .decode(parts[1])
            .map_err(|e| anyhow::anyhow!("b64 decode nonce: {}", e))?;
        if nonce_bytes.len() != 12 {
            anyhow::bail!("invalid nonce length");
        }
        let ct_bytes = base64::engine::general_purpose::STANDARD
            .decode(parts[2])
            .map_err(|e| anyhow::anyhow!("b64 decode ct: {}", e))?;
        let nonce = Nonce::from_slice(&nonce_bytes);
        let pt = self
            .cipher
            .decrypt(nonce, ct_bytes.as_ref())
            .map_err(|e| anyhow::anyhow!("decrypt failed: {}", e))?;
        String::from_utf8(pt).context("note body is not valid utf-8")
    }
}

/// Read the base64-encoded key from `path`, generating and persisting a
/// fresh 32-byte key on first run.
pub fn load_or_create_key(path: &Path) -> anyhow::Result<[u8; 32]> {
    if path.exists() {
        let encoded = std::fs::read_to_string(path)
            .with_context(|| format!("read key file {}", path.display()))?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .context("key file is not valid base64")?;
        bytes
            .as_slice()
            .try_into()
            .map_err(|_| anyhow::anyhow!("key file must hold exactly 32 bytes"))
    } else {
        let mut key = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut key);
        std::fs::write(path, base64::engine::general_purpose::STANDARD.encode(key))
            .with_context(|| format!("write key file {}", path.display()))?;
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn roundtrip() {
        let cipher = NoteCipher::from_secret("alohomora");
        let ct = cipher.encrypt("the chamber of secrets has been opened").unwrap();
        assert!(ct.starts_with("v1:"));
        assert_eq!(
            cipher.decrypt(&ct).unwrap(),
            "the chamber of secrets has been opened"
        );
    }

    #[test]
    fn fresh_nonce_per_encryption() {
        let cipher = NoteCipher::from_secret("alohomora");
        let a = cipher.encrypt("same text").unwrap();
        let b = cipher.encrypt("same text").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn tampered_ciphertext_is_rejected() {
        let cipher = NoteCipher::from_secret("alohomora");
        let ct = cipher.encrypt("secret").unwrap();
        let parts: Vec<&str> = ct.splitn(3, ':').collect();
        let mut bytes = base64::engine::general_purpose::STANDARD
            .decode(parts[2])
            .unwrap();
        bytes[0] ^= 0x01;
        let tampered = format!(
            "v1:{}:{}",
            parts[1],
            base64::engine::general_purpose::STANDARD.encode(bytes)
        );
        assert!(cipher.decrypt(&tampered).is_err());
    }

    #[test]
    fn wrong_key_fails() {
        let ct = NoteCipher::from_secret("alohomora").encrypt("secret").unwrap();
        assert!(NoteCipher::from_secret("expelliarmus").decrypt(&ct).is_err());
    }

    #[test]
    fn unprefixed_input_passes_through() {
        let cipher = NoteCipher::from_secret("alohomora");
        assert_eq!(cipher.decrypt("plain old text").unwrap(), "plain old text");
    }

    #[test]
    fn key_file_is_created_once_and_reused() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".note_key");
        let first = load_or_create_key(&path).unwrap();
        assert!(path.exists());
        let second = load_or_create_key(&path).unwrap();
        assert_eq!(first, second);

        let ct = NoteCipher::new(&first).encrypt("hello").unwrap();
        assert_eq!(NoteCipher::new(&second).decrypt(&ct).unwrap(), "hello");
    }

    #[test]
    fn garbage_key_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".note_key");
        std::fs::write(&path, "not base64 at all!!!").unwrap();
        assert!(load_or_create_key(&path).is_err());
    }
}
