//! Per-object encryption of strings and streams.

use super::aes;
use super::rc4;
use super::EncryptionAlgorithm;
use crate::error::Result;
use crate::object::ObjectId;
use md5::{Digest, Md5};

/// Encrypts the strings and stream payloads of one document.
///
/// Every object gets its own key derived from the document key and the
/// object number, so the same plaintext encrypts differently per object.
#[derive(Debug, Clone)]
pub struct EncryptionWriteHandler {
    /// The document encryption key
    encryption_key: Vec<u8>,
    algorithm: EncryptionAlgorithm,
}

impl EncryptionWriteHandler {
    /// Create a handler from an already computed document key.
    pub fn from_key(encryption_key: Vec<u8>, algorithm: EncryptionAlgorithm) -> Self {
        Self {
            encryption_key,
            algorithm,
        }
    }

    /// Derive the object-specific key.
    ///
    /// PDF Spec: Algorithm 1 - MD5 over the document key, the low 3 bytes of
    /// the object number and the 2-byte generation (both little-endian),
    /// plus `sAlT` for AES. Truncated to `min(n + 5, 16)` bytes.
    pub(crate) fn derive_object_key(&self, id: ObjectId) -> Vec<u8> {
        let mut hasher = Md5::new();
        hasher.update(&self.encryption_key);
        hasher.update(&id.number().to_le_bytes()[..3]);
        hasher.update(0u16.to_le_bytes());
        if self.algorithm.is_aes() {
            hasher.update(b"sAlT");
        }
        let hash = hasher.finalize();
        let key_length = (self.encryption_key.len() + 5).min(16);
        hash[..key_length].to_vec()
    }

    /// Encrypt a string or stream payload belonging to object `id`.
    ///
    /// AES output is the 16-byte IV followed by the ciphertext.
    pub fn encrypt(&self, data: &[u8], id: ObjectId) -> Result<Vec<u8>> {
        let key = self.derive_object_key(id);
        match self.algorithm {
            EncryptionAlgorithm::Rc4_128 => Ok(rc4::rc4_crypt(&key, data)),
            EncryptionAlgorithm::Aes128 => {
                let iv = Self::generate_iv();
                let ciphertext = aes::aes128_encrypt(&key, &iv, data)?;
                let mut out = Vec::with_capacity(16 + ciphertext.len());
                out.extend_from_slice(&iv);
                out.extend(ciphertext);
                Ok(out)
            },
        }
    }

    /// Random 16-byte IV from a UUID and the clock.
    fn generate_iv() -> [u8; 16] {
        let mut hasher = Md5::new();
        hasher.update(uuid::Uuid::new_v4().as_bytes());
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();
        hasher.update(now.as_nanos().to_le_bytes());
        let mut iv = [0u8; 16];
        iv.copy_from_slice(&hasher.finalize());
        iv
    }

    /// Get the encryption algorithm.
    pub fn algorithm(&self) -> EncryptionAlgorithm {
        self.algorithm
    }
}
