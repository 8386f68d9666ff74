//! AES-128 in CBC mode with PKCS#7 padding.
//!
//! PDF Spec: Section 7.6.2 - General Encryption Algorithm

use crate::error::{Error, Result};
use aes::cipher::{BlockEncryptMut, KeyIvInit};
use aes::Aes128;
use cbc::Encryptor;

type Aes128CbcEnc = Encryptor<Aes128>;

/// Encrypt data using AES-128 in CBC mode with PKCS#7 padding.
///
/// Returns the ciphertext only; the caller prepends the IV.
pub fn aes128_encrypt(key: &[u8], iv: &[u8; 16], data: &[u8]) -> Result<Vec<u8>> {
    if key.len() != 16 {
        return Err(Error::Encryption(format!(
            "AES-128 key must be 16 bytes, got {}",
            key.len()
        )));
    }

    // PKCS#7: always pad, a full block when already aligned
    let padding_len = 16 - (data.len() % 16);
    let mut buffer = Vec::with_capacity(data.len() + padding_len);
    buffer.extend_from_slice(data);
    buffer.resize(data.len() + padding_len, padding_len as u8);

    let len = buffer.len();
    Aes128CbcEnc::new(key.into(), iv.as_slice().into())
        .encrypt_padded_mut::<aes::cipher::block_padding::NoPadding>(&mut buffer, len)
        .map_err(|_| Error::Encryption("AES-128 block encryption failed".to_string()))?;

    Ok(buffer)
}

#[cfg(test)]
pub(crate) fn aes128_decrypt(key: &[u8], iv: &[u8], data: &[u8]) -> Vec<u8> {
    use aes::cipher::BlockDecryptMut;
    let mut buffer = data.to_vec();
    let plain = cbc::Decryptor::<Aes128>::new(key.into(), iv.into())
        .decrypt_padded_mut::<aes::cipher::block_padding::Pkcs7>(&mut buffer)
        .unwrap();
    plain.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aes128_round_trip() {
        let key = [0x2Bu8; 16];
        let iv = [0x01u8; 16];
        let plaintext = b"BT /F1 12 Tf (Hello) Tj ET";
        let ciphertext = aes128_encrypt(&key, &iv, plaintext).unwrap();
        assert_eq!(ciphertext.len(), 32);
        assert_eq!(aes128_decrypt(&key, &iv, &ciphertext), plaintext.to_vec());
    }

    #[test]
    fn test_aligned_input_gets_full_padding_block() {
        let ciphertext = aes128_encrypt(&[0u8; 16], &[0u8; 16], &[7u8; 16]).unwrap();
        assert_eq!(ciphertext.len(), 32);
    }

    #[test]
    fn test_wrong_key_length() {
        let result = aes128_encrypt(&[0u8; 5], &[0u8; 16], b"data");
        assert!(matches!(result, Err(Error::Encryption(_))));
    }
}
