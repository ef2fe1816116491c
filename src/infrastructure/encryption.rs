use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::RngCore;
use secrecy::SecretString;

#[derive(Debug, thiserror::Error)]
pub enum EncryptionError {
    #[error("encryption failed: {0}")]
    EncryptFailed(String),

    #[error("decryption failed: {0}")]
    DecryptFailed(String),
}

/// AES-256-GCM cipher for per-store LINE channel credentials. Ciphertexts
/// are nonce-prefixed and base64 encoded.
pub struct CredentialCipher {
    key: [u8; 32],
}

impl CredentialCipher {
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String, EncryptionError> {
        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| EncryptionError::EncryptFailed(e.to_string()))?;

        let mut nonce_bytes = [0u8; 12];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| EncryptionError::EncryptFailed(e.to_string()))?;

        let mut combined = nonce_bytes.to_vec();
        combined.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(&combined))
    }

    pub fn decrypt(&self, ciphertext: &str) -> Result<Vec<u8>, EncryptionError> {
        let combined = STANDARD
            .decode(ciphertext)
            .map_err(|e| EncryptionError::DecryptFailed(e.to_string()))?;

        if combined.len() < 12 {
            return Err(EncryptionError::DecryptFailed(
                "ciphertext too short".to_string(),
            ));
        }

        let (nonce_bytes, encrypted) = combined.split_at(12);
        let nonce = Nonce::from_slice(nonce_bytes);

        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| EncryptionError::DecryptFailed(e.to_string()))?;

        cipher
            .decrypt(nonce, encrypted)
            .map_err(|e| EncryptionError::DecryptFailed(e.to_string()))
    }

    /// Decrypts a UTF-8 secret (access tokens) into a redacted wrapper so
    /// it cannot leak through Debug output.
    pub fn decrypt_string(&self, ciphertext: &str) -> Result<SecretString, EncryptionError> {
        let bytes = self.decrypt(ciphertext)?;
        let plaintext = String::from_utf8(bytes)
            .map_err(|e| EncryptionError::DecryptFailed(e.to_string()))?;
        Ok(SecretString::new(plaintext))
    }
}
